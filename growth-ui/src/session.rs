//! Interactive survey session.
//!
//! Reads answers line by line and drives a [`SurveyState`] through the
//! steps, rendering each screen to the output. Generic over reader and
//! writer so the whole flow runs against in-memory buffers in tests.

use std::io::{self, BufRead, Write};

use growth_core::{
    CalculationError, Industry, ScenarioCalculator, SurveyState, SurveyStep, UserData,
    UserDataUpdate,
};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::DisplayConfig;
use crate::utils::{clamp_conversion_rate, parse_number, parse_yes_no};
use crate::views::{input_prompt, recurring_prompt, render_dashboard, render_step};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Calculation(#[from] CalculationError),

    #[error("answers cannot get past the {step:?} step: {reason}")]
    Blocked {
        step: SurveyStep,
        reason: &'static str,
    },
}

/// Why the gate on `step` refuses to advance.
fn blocked_reason(step: SurveyStep) -> &'static str {
    match step {
        SurveyStep::Industry => "an industry is required",
        SurveyStep::Enquiries => "enquiries are required",
        SurveyStep::Spend => "average spend must be greater than zero",
        SurveyStep::Conversion => "conversion rate must be greater than zero",
        SurveyStep::Results => "the survey is already complete",
    }
}

/// A line of input, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Back,
    Quit,
    Reset,
    Answer(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "b" | "back" => Command::Back,
            "q" | "quit" | "exit" => Command::Quit,
            "r" | "reset" | "redo" => Command::Reset,
            _ => Command::Answer(line.trim().to_string()),
        }
    }
}

/// Whether the session loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Session<R, W> {
    input: R,
    output: W,
    state: SurveyState,
    calculator: ScenarioCalculator,
    display: DisplayConfig,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        input: R,
        output: W,
        calculator: ScenarioCalculator,
        display: DisplayConfig,
    ) -> Self {
        Self {
            input,
            output,
            state: SurveyState::new(),
            calculator,
            display,
        }
    }

    pub fn state(&self) -> &SurveyState {
        &self.state
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs until the visitor quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        debug!("survey session started");
        loop {
            render_step(&mut self.output, &self.state, &self.display)?;
            let flow = match self.state.step() {
                SurveyStep::Results => self.results_screen()?,
                _ => self.input_screen()?,
            };
            if flow == Flow::Exit {
                debug!(step = ?self.state.step(), "survey session ended");
                return Ok(());
            }
        }
    }

    /// Writes `prompt` and reads one line. `None` at end of input.
    fn read_line(
        &mut self,
        prompt: &str,
    ) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn input_screen(&mut self) -> io::Result<Flow> {
        let prompt = input_prompt(&self.state, &self.display);
        let Some(line) = self.read_line(&prompt)? else {
            return Ok(Flow::Exit);
        };

        match Command::parse(&line) {
            Command::Quit => Ok(Flow::Exit),
            Command::Back => {
                self.state.retreat();
                Ok(Flow::Continue)
            }
            Command::Reset => {
                writeln!(
                    self.output,
                    "Redo is available on the results screen. Enter 'b' to go back or 'q' to quit."
                )?;
                Ok(Flow::Continue)
            }
            Command::Answer(_) => self.answer(line.trim()),
        }
    }

    fn answer(
        &mut self,
        text: &str,
    ) -> io::Result<Flow> {
        match self.state.step() {
            SurveyStep::Industry => self.answer_industry(text),
            SurveyStep::Enquiries => self.answer_enquiries(text),
            SurveyStep::Spend => self.answer_spend(text),
            SurveyStep::Conversion => self.answer_conversion(text),
            SurveyStep::Results => Ok(Flow::Continue),
        }
    }

    fn answer_industry(
        &mut self,
        text: &str,
    ) -> io::Result<Flow> {
        let industries = Industry::all();
        let chosen = match text.parse::<usize>() {
            Ok(number) => number
                .checked_sub(1)
                .and_then(|index| industries.get(index).copied()),
            Err(_) => text.parse::<Industry>().ok(),
        };

        match chosen {
            Some(industry) => self.state.select_industry(industry),
            None => writeln!(
                self.output,
                "Please choose a number between 1 and {}.",
                industries.len()
            )?,
        }
        Ok(Flow::Continue)
    }

    fn answer_enquiries(
        &mut self,
        text: &str,
    ) -> io::Result<Flow> {
        let Some(enquiries) = parse_number(text, &self.display.currency_symbol) else {
            writeln!(self.output, "Please enter a number to continue.")?;
            return Ok(Flow::Continue);
        };
        self.state
            .update(UserDataUpdate::current_enquiries(enquiries));
        self.continue_if_ready("Please enter a number to continue.")
    }

    fn answer_spend(
        &mut self,
        text: &str,
    ) -> io::Result<Flow> {
        let Some(spend) = parse_number(text, &self.display.currency_symbol) else {
            writeln!(self.output, "Please enter an amount to continue.")?;
            return Ok(Flow::Continue);
        };
        self.state.update(UserDataUpdate::avg_client_spend(spend));

        let prompt = recurring_prompt(self.state.data().is_recurring);
        let Some(line) = self.read_line(&prompt)? else {
            return Ok(Flow::Exit);
        };
        match Command::parse(&line) {
            Command::Quit => return Ok(Flow::Exit),
            Command::Back => {
                self.state.retreat();
                return Ok(Flow::Continue);
            }
            Command::Reset | Command::Answer(_) => {
                if let Some(recurring) = parse_yes_no(&line) {
                    self.state.update(UserDataUpdate::is_recurring(recurring));
                }
            }
        }

        self.continue_if_ready("Average spend must be greater than zero to continue.")
    }

    fn answer_conversion(
        &mut self,
        text: &str,
    ) -> io::Result<Flow> {
        let Some(rate) = parse_number(text, &self.display.currency_symbol) else {
            writeln!(self.output, "Please enter a percentage to continue.")?;
            return Ok(Flow::Continue);
        };
        self.state
            .update(UserDataUpdate::conversion_rate(clamp_conversion_rate(rate)));
        self.continue_if_ready("Conversion rate must be greater than zero to calculate results.")
    }

    /// Advances when the step's gate allows it, otherwise explains why not.
    fn continue_if_ready(
        &mut self,
        blocked_message: &str,
    ) -> io::Result<Flow> {
        if self.state.can_continue() {
            self.state.advance();
        } else {
            writeln!(self.output, "{blocked_message}")?;
        }
        Ok(Flow::Continue)
    }

    fn results_screen(&mut self) -> io::Result<Flow> {
        match self.state.results(&self.calculator) {
            Ok(results) => {
                debug!(
                    industry = ?self.state.data().industry,
                    average_annual = %results.average.annual_cumulative_revenue,
                    "survey completed"
                );
                render_dashboard(
                    &mut self.output,
                    self.state.data(),
                    &results,
                    &self.display,
                )?;
            }
            Err(e) => {
                error!(error = %e, "scenario calculation failed");
                writeln!(self.output, "Unable to project revenue for these answers: {e}")?;
            }
        }

        loop {
            let prompt = input_prompt(&self.state, &self.display);
            let Some(line) = self.read_line(&prompt)? else {
                return Ok(Flow::Exit);
            };
            match Command::parse(&line) {
                Command::Quit => return Ok(Flow::Exit),
                Command::Back => {
                    self.state.retreat();
                    return Ok(Flow::Continue);
                }
                Command::Reset => {
                    self.state.reset();
                    return Ok(Flow::Continue);
                }
                Command::Answer(_) => {
                    writeln!(self.output, "Enter 'r' to redo the survey, 'b' to go back or 'q' to quit.")?
                }
            }
        }
    }
}

/// Renders the dashboard once for answers supplied up front.
///
/// # Errors
///
/// Returns [`SessionError::Blocked`] when the answers would not pass a step
/// of the interactive survey, or another [`SessionError`] if writing fails
/// or the projection overflows.
pub fn render_batch<W: Write>(
    out: &mut W,
    data: UserData,
    calculator: &ScenarioCalculator,
    display: &DisplayConfig,
) -> Result<(), SessionError> {
    let mut state = SurveyState::new();
    state.update(UserDataUpdate {
        industry: data.industry,
        current_enquiries: Some(data.current_enquiries),
        avg_client_spend: Some(data.avg_client_spend),
        conversion_rate: Some(data.conversion_rate),
        is_recurring: Some(data.is_recurring),
    });
    while !state.step().is_terminal() {
        if !state.can_continue() {
            let step = state.step();
            return Err(SessionError::Blocked {
                step,
                reason: blocked_reason(step),
            });
        }
        state.advance();
    }

    let results = state.results(calculator)?;
    render_dashboard(out, state.data(), &results, display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn run(script: &str) -> (SurveyState, String) {
        let mut session = Session::new(
            script.as_bytes(),
            Vec::new(),
            ScenarioCalculator::default(),
            DisplayConfig::default(),
        );
        session.run().unwrap();
        let state = session.state().clone();
        let output = String::from_utf8(session.into_output()).unwrap();
        (state, output)
    }

    #[test]
    fn command_parse_recognises_keywords() {
        assert_eq!(Command::parse(" B "), Command::Back);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("Redo"), Command::Reset);
        assert_eq!(Command::parse(" 20 "), Command::Answer("20".to_string()));
    }

    #[test]
    fn industry_by_number_advances() {
        let (state, _) = run("8\n");

        assert_eq!(state.step(), SurveyStep::Enquiries);
        assert_eq!(state.data().industry, Some(Industry::CommercialCleaning));
    }

    #[test]
    fn industry_by_label_advances() {
        let (state, _) = run("roofing\n");

        assert_eq!(state.data().industry, Some(Industry::Roofing));
    }

    #[test]
    fn industry_out_of_range_stays() {
        let (state, output) = run("0\n12\n");

        assert_eq!(state.step(), SurveyStep::Industry);
        assert_eq!(output.matches("Please choose a number between 1 and 11.").count(), 2);
    }

    #[test]
    fn back_on_first_step_is_noop() {
        let (state, _) = run("b\n");

        assert_eq!(state.step(), SurveyStep::Industry);
    }

    #[test]
    fn empty_enquiries_reprompts_but_zero_is_accepted() {
        let (state, output) = run("1\n\n0\n");

        assert!(output.contains("Please enter a number to continue."));
        assert_eq!(state.step(), SurveyStep::Spend);
        assert_eq!(state.data().current_enquiries, dec!(0));
    }

    #[test]
    fn zero_spend_blocks_progress() {
        let (state, output) = run("1\n20\n0\nn\n");

        assert!(output.contains("Average spend must be greater than zero to continue."));
        assert_eq!(state.step(), SurveyStep::Spend);
    }

    #[test]
    fn recurring_answer_is_recorded() {
        let (state, _) = run("1\n20\n1400\ny\n");

        assert_eq!(state.step(), SurveyStep::Conversion);
        assert!(state.data().is_recurring);
    }

    #[test]
    fn conversion_is_clamped_to_one_hundred() {
        let (state, _) = run("1\n20\n1400\nn\n250\n");

        assert_eq!(state.step(), SurveyStep::Results);
        assert_eq!(state.data().conversion_rate, dec!(100));
    }

    #[test]
    fn zero_conversion_blocks_results() {
        let (state, output) = run("1\n20\n1400\nn\n0\n");

        assert!(output.contains("Conversion rate must be greater than zero"));
        assert_eq!(state.step(), SurveyStep::Conversion);
    }

    #[test]
    fn back_from_enquiries_returns_to_industry() {
        let (state, _) = run("3\nb\n");

        assert_eq!(state.step(), SurveyStep::Industry);
        assert_eq!(state.data().industry, Some(Industry::ExteriorCleaning));
    }

    #[test]
    fn reset_from_results_clears_answers() {
        let (state, output) = run("1\n20\n1400\nn\n60\nr\n");

        assert!(output.contains("~£117,600"));
        assert_eq!(state, SurveyState::new());
    }

    #[test]
    fn unknown_results_command_reprompts() {
        let (state, output) = run("1\n20\n1400\nn\n60\nhello\nq\n");

        assert!(output.contains("Enter 'r' to redo the survey"));
        assert_eq!(state.step(), SurveyStep::Results);
    }

    #[test]
    fn quit_mid_survey_stops() {
        let (state, _) = run("1\nq\n20\n");

        assert_eq!(state.step(), SurveyStep::Enquiries);
        assert_eq!(state.data().current_enquiries, dec!(0));
    }

    #[test]
    fn reset_on_input_step_reprompts() {
        let (state, output) = run("1\nr\n");

        assert!(output.contains("Redo is available on the results screen."));
        assert_eq!(state.step(), SurveyStep::Enquiries);
        assert_eq!(state.data().industry, Some(Industry::PlumbingAndHeating));
    }

    #[test]
    fn render_batch_rejects_answers_the_gate_blocks() {
        let data = UserData {
            industry: Some(Industry::Locksmith),
            current_enquiries: dec!(20),
            avg_client_spend: dec!(0),
            conversion_rate: dec!(60),
            is_recurring: false,
        };
        let mut out = Vec::new();

        let err = render_batch(
            &mut out,
            data,
            &ScenarioCalculator::default(),
            &DisplayConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SessionError::Blocked {
                step: SurveyStep::Spend,
                ..
            }
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn render_batch_prints_dashboard() {
        let data = UserData {
            industry: Some(Industry::Locksmith),
            current_enquiries: dec!(20),
            avg_client_spend: dec!(1400),
            conversion_rate: dec!(60),
            is_recurring: true,
        };
        let mut out = Vec::new();

        render_batch(
            &mut out,
            data,
            &ScenarioCalculator::default(),
            &DisplayConfig::default(),
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Based on your Locksmith business metrics"));
        assert!(text.contains("~£764,400"));
    }
}
