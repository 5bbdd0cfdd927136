//! End-to-end tests against an on-disk config fixture and scripted
//! terminal sessions.

use std::path::Path;

use growth_core::{Industry, ScenarioCalculator, SurveyStep};
use growth_ui::{AppConfig, DisplayConfig, Session};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("scenarios.toml")
        .leak()
}

fn run_script(
    script: &str,
    calculator: ScenarioCalculator,
    display: DisplayConfig,
) -> (Session<&[u8], Vec<u8>>, String) {
    let mut session = Session::new(script.as_bytes(), Vec::new(), calculator, display);
    session.run().expect("in-memory session should not fail");
    let output = String::from_utf8(session.output().clone()).unwrap();
    (session, output)
}

#[test]
fn test_load_fixture_overrides_and_defaults() {
    let config = AppConfig::load(fixture_path()).expect("fixture should load");

    assert_eq!(config.display.currency_symbol, "$");
    assert_eq!(config.display.service_cost, dec!(299));
    assert_eq!(config.scenarios.months, 6);
    assert_eq!(config.scenarios.moderate.label, "Cautious");
    assert_eq!(config.scenarios.moderate.multiplier, dec!(0.10));
    assert_eq!(config.scenarios.average.label, "Average Growth");
    assert_eq!(config.scenarios.over_perform.label, "Over Perform");
    assert_eq!(config.scenarios.over_perform.multiplier, dec!(2.0));
}

#[test]
fn test_full_survey_with_default_config() {
    let script = "Window Cleaning\n20\n£1,400\nn\n60%\nq\n";

    let (session, output) = run_script(
        script,
        ScenarioCalculator::default(),
        DisplayConfig::default(),
    );

    let state = session.state();
    assert_eq!(state.step(), SurveyStep::Results);
    assert_eq!(state.data().industry, Some(Industry::WindowCleaning));
    assert_eq!(state.data().avg_client_spend, dec!(1400));

    assert!(output.contains("What is your industry?"));
    assert!(output.contains("How many enquiries do you typically get each month?"));
    assert!(output.contains("What is the average client spend for a new customer?"));
    assert!(output.contains("What is your conversion rate for new enquiries?"));
    assert!(output.contains("£50,400"));
    assert!(output.contains("£117,600"));
    assert!(output.contains("£235,200"));
    assert!(output.contains("Start your journey for just £350/mo."));
}

#[test]
fn test_recurring_survey_with_fixture_config() {
    let config = AppConfig::load(fixture_path()).unwrap();
    let calculator = ScenarioCalculator::new(config.scenarios).unwrap();
    let script = "8\n20\n1400\nyes\n60\nq\n";

    let (_, output) = run_script(script, calculator, config.display);

    // average: 12 enquiries, 7 customers, 9800/mo, six months recurring = 21 months of revenue
    assert!(output.contains("~$205,800  Potential Revenue Opportunity"));
    assert!(output.contains("6-Month Cumulative Revenue Growth"));
    assert!(output.contains("| 6-Month Cumulative"));
    assert!(!output.contains("12-Month Cumulative"));
    assert!(output.contains("over the next 6 months."));
    assert!(output.contains("Cautious"));
    assert!(output.contains("Start your journey for just $299/mo."));
    assert!(output.contains("M6"));
    assert!(!output.contains("M7"));
}

#[test]
fn test_back_and_reset_navigation() {
    // Walk to results, step back to change the rate, then reset.
    let script = "1\n20\n1400\nn\n60\nb\n100\nr\n";

    let (session, output) = run_script(
        script,
        ScenarioCalculator::default(),
        DisplayConfig::default(),
    );

    // with 100% conversion the average scenario doubles to 12 customers
    assert!(output.contains("~£201,600"));
    assert_eq!(session.state().step(), SurveyStep::Industry);
    assert_eq!(session.state().data().industry, None);
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let result = AppConfig::load(Path::new("/this/path/does/not/exist.toml"));

    assert!(result.is_err());
}
