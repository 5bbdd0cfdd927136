use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use growth_core::{Industry, ScenarioCalculator, UserData};
use tracing::{debug, info};

use growth_ui::utils::{clamp_conversion_rate, parse_number};
use growth_ui::logging::{self, ConsoleTarget, LogOptions};
use growth_ui::{AppConfig, Session, render_batch};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Revenue growth survey for local service businesses.
///
/// Asks four questions about the business and projects three growth
/// scenarios over the next twelve months. Supplying every metric as a flag
/// skips the questions and prints the results directly.
#[derive(Debug, Parser)]
#[command(name = "GrowthSurvey", version, about, long_about = None)]
struct Cli {
    /// TOML file with scenario labels, multipliers and display settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Business category, e.g. "Window Cleaning".
    #[arg(long)]
    industry: Option<Industry>,

    /// Monthly enquiries.
    #[arg(long)]
    enquiries: Option<String>,

    /// Average spend per new customer.
    #[arg(long)]
    spend: Option<String>,

    /// Conversion rate in percent; values above 100 are capped.
    #[arg(long)]
    conversion: Option<String>,

    /// Customers pay the spend every month rather than once.
    #[arg(long, default_value_t = false)]
    recurring: bool,

    /// Log filter, e.g. "debug" or "growth_core=trace". Giving one also
    /// shows logs on stderr during the interactive survey.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Hide console log output on stderr. The log file is unaffected.
    #[arg(long, default_value_t = false)]
    quiet_logs: bool,
}

impl Cli {
    /// True when any answer was supplied as a flag.
    fn is_batch(&self) -> bool {
        self.industry.is_some()
            || [&self.enquiries, &self.spend, &self.conversion]
                .iter()
                .any(|flag| flag.is_some())
    }

    /// Answers for batch mode, or `None` when no metric flag was given.
    fn batch_data(
        &self,
        currency_symbol: &str,
    ) -> Result<Option<UserData>> {
        if !self.is_batch() {
            return Ok(None);
        }

        let (Some(industry), Some(enquiries), Some(spend), Some(conversion)) = (
            self.industry,
            self.enquiries.as_deref(),
            self.spend.as_deref(),
            self.conversion.as_deref(),
        ) else {
            anyhow::bail!("batch mode needs --industry, --enquiries, --spend and --conversion");
        };

        Ok(Some(UserData {
            industry: Some(industry),
            current_enquiries: parse_number(enquiries, currency_symbol).unwrap_or_default(),
            avg_client_spend: parse_number(spend, currency_symbol).unwrap_or_default(),
            conversion_rate: clamp_conversion_rate(
                parse_number(conversion, currency_symbol).unwrap_or_default(),
            ),
            is_recurring: self.recurring,
        }))
    }
}

// ─── logging ─────────────────────────────────────────────────────────────────

fn init_logging(
    cli: &Cli,
    interactive: bool,
) -> Result<()> {
    logging::init(&LogOptions {
        level: cli.log_level.clone(),
        console: ConsoleTarget::choose(cli.quiet_logs, interactive, cli.log_level.is_some()),
        file: cli.log_file.clone(),
    })
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli, !cli.is_batch())?;
    debug!(app = env!("CARGO_PKG_NAME"), "starting");

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => AppConfig::default(),
    };
    let batch = cli.batch_data(&config.display.currency_symbol)?;

    let calculator =
        ScenarioCalculator::new(config.scenarios).context("Invalid scenario configuration")?;

    let stdout = io::stdout();
    match batch {
        Some(data) => {
            info!(industry = ?data.industry, "rendering results for supplied answers");
            render_batch(&mut stdout.lock(), data, &calculator, &config.display)
                .context("Failed to render results")?;
        }
        None => {
            let mut session = Session::new(io::stdin().lock(), stdout.lock(), calculator, config.display);
            session.run().context("Survey session failed")?;
        }
    }
    Ok(())
}
