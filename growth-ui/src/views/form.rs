//! Survey form prompts, one per input step.

use std::io::{self, Write};

use growth_core::{Industry, SurveyState, SurveyStep};

use crate::config::DisplayConfig;

const PROGRESS_WIDTH: usize = 30;

/// Renders `[#########.....]  40%` for the given step.
pub fn progress_bar(step: SurveyStep) -> String {
    let percent = usize::from(step.progress_percent());
    let filled = PROGRESS_WIDTH * percent / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(PROGRESS_WIDTH - filled),
        percent
    )
}

/// Writes the heading, progress bar and question for the current step.
///
/// Does nothing on the results step; the dashboard owns that screen.
pub fn render_step<W: Write>(
    out: &mut W,
    state: &SurveyState,
    display: &DisplayConfig,
) -> io::Result<()> {
    let step = state.step();
    if step == SurveyStep::Results {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "{}", progress_bar(step))?;
    writeln!(out)?;

    let data = state.data();
    match step {
        SurveyStep::Industry => {
            writeln!(out, "What is your industry?")?;
            writeln!(
                out,
                "Select the category that best describes your service business."
            )?;
            for (index, industry) in Industry::all().iter().enumerate() {
                let marker = if data.industry == Some(*industry) { '*' } else { ' ' };
                writeln!(out, " {marker}{:>2}. {industry}", index + 1)?;
            }
        }
        SurveyStep::Enquiries => {
            writeln!(out, "How many enquiries do you typically get each month?")?;
            writeln!(
                out,
                "Estimate your average number of phone calls, emails, or form submissions (e.g. 20)."
            )?;
        }
        SurveyStep::Spend => {
            writeln!(
                out,
                "What is the average client spend for a new customer?"
            )?;
            writeln!(
                out,
                "How much is a typical job or contract worth to your business? (e.g. {}1400)",
                display.currency_symbol
            )?;
        }
        SurveyStep::Conversion => {
            writeln!(out, "What is your conversion rate for new enquiries?")?;
            writeln!(
                out,
                "If 10 people contact you, how many typically become customers? (e.g. 60)"
            )?;
            writeln!(out, "A 60% rate means you close 6 out of every 10 leads.")?;
        }
        SurveyStep::Results => {}
    }

    if step != SurveyStep::Industry {
        writeln!(out, "Enter 'b' to go back or 'q' to quit.")?;
    }
    Ok(())
}

/// Prompt shown before reading the answer for the current step.
pub fn input_prompt(
    state: &SurveyState,
    display: &DisplayConfig,
) -> String {
    match state.step() {
        SurveyStep::Industry => format!("Choose 1-{} > ", Industry::all().len()),
        SurveyStep::Enquiries => "Enquiries > ".to_string(),
        SurveyStep::Spend => format!("Average spend ({}) > ", display.currency_symbol),
        SurveyStep::Conversion => "Conversion rate (%) > ".to_string(),
        SurveyStep::Results => "[r] Redo survey  [b] Back  [q] Quit > ".to_string(),
    }
}

/// Prompt for the recurring-contract toggle on the spend step.
pub fn recurring_prompt(current: bool) -> String {
    let default = if current { "Y/n" } else { "y/N" };
    format!("Is this a recurring monthly contract? (e.g. Commercial Cleaning) [{default}] > ")
}
