//! Survey state holder.
//!
//! Tracks which step the visitor is on and the answers given so far.
//! Steps form a strict line: Industry → Enquiries → Spend → Conversion →
//! Results, with moves only to adjacent steps.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    CalculationError, CalculatorResults, Industry, ScenarioCalculator, UserData, UserDataUpdate,
};

/// A step in the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum SurveyStep {
    #[default]
    Industry,
    Enquiries,
    Spend,
    Conversion,
    Results,
}

impl SurveyStep {
    /// Number of steps including the results view.
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [SurveyStep] {
        &[
            SurveyStep::Industry,
            SurveyStep::Enquiries,
            SurveyStep::Spend,
            SurveyStep::Conversion,
            SurveyStep::Results,
        ]
    }

    /// Zero-based position in the sequence.
    pub fn index(&self) -> usize {
        match self {
            SurveyStep::Industry => 0,
            SurveyStep::Enquiries => 1,
            SurveyStep::Spend => 2,
            SurveyStep::Conversion => 3,
            SurveyStep::Results => 4,
        }
    }

    pub fn next(&self) -> Option<SurveyStep> {
        Self::all().get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<SurveyStep> {
        self.index()
            .checked_sub(1)
            .and_then(|index| Self::all().get(index).copied())
    }

    /// Progress bar fill for this step, in percent.
    pub fn progress_percent(&self) -> u8 {
        // index + 1 is at most COUNT, so this stays within 20..=100
        ((self.index() + 1) * 100 / Self::COUNT) as u8
    }

    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

/// Current step plus the in-progress answers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyState {
    step: SurveyStep,
    data: UserData,
}

impl SurveyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SurveyStep {
        self.step
    }

    pub fn data(&self) -> &UserData {
        &self.data
    }

    /// Merges `update` into the answers without changing step.
    pub fn update(
        &mut self,
        update: UserDataUpdate,
    ) {
        self.data.apply(update);
    }

    /// Moves to the next step. Does nothing on the results step.
    pub fn advance(&mut self) {
        if let Some(next) = self.step.next() {
            debug!(from = ?self.step, to = ?next, "survey advanced");
            self.step = next;
        }
    }

    /// Moves to the previous step. Does nothing on the first step.
    pub fn retreat(&mut self) {
        if let Some(previous) = self.step.previous() {
            debug!(from = ?self.step, to = ?previous, "survey retreated");
            self.step = previous;
        }
    }

    /// Returns to the first step and clears every answer.
    pub fn reset(&mut self) {
        debug!(from = ?self.step, "survey reset");
        self.step = SurveyStep::Industry;
        self.data = UserData::default();
    }

    /// Records the industry and moves on, as picking one on the first step does.
    pub fn select_industry(
        &mut self,
        industry: Industry,
    ) {
        self.update(UserDataUpdate::industry(industry));
        self.advance();
    }

    /// Whether the current step's continue control is enabled.
    ///
    /// Zero enquiries is a valid answer. Spend and conversion rate must be
    /// non-zero. The results step has no continue control.
    pub fn can_continue(&self) -> bool {
        match self.step {
            SurveyStep::Industry => self.data.industry.is_some(),
            SurveyStep::Enquiries => true,
            SurveyStep::Spend => self.data.avg_client_spend != Decimal::ZERO,
            SurveyStep::Conversion => self.data.conversion_rate != Decimal::ZERO,
            SurveyStep::Results => false,
        }
    }

    /// Calculates results for the current answers.
    ///
    /// # Errors
    ///
    /// Propagates [`CalculationError`] from the calculator.
    pub fn results(
        &self,
        calculator: &ScenarioCalculator,
    ) -> Result<CalculatorResults, CalculationError> {
        calculator.calculate(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn state_at(step: SurveyStep) -> SurveyState {
        let mut state = SurveyState::new();
        while state.step() != step {
            state.advance();
        }
        state
    }

    // =========================================================================
    // SurveyStep tests
    // =========================================================================

    #[test]
    fn steps_are_in_linear_order() {
        assert_eq!(SurveyStep::Industry.next(), Some(SurveyStep::Enquiries));
        assert_eq!(SurveyStep::Conversion.next(), Some(SurveyStep::Results));
        assert_eq!(SurveyStep::Results.next(), None);
        assert_eq!(SurveyStep::Industry.previous(), None);
        assert_eq!(SurveyStep::Spend.previous(), Some(SurveyStep::Enquiries));
    }

    #[test]
    fn progress_percent_fills_by_fifths() {
        let progress: Vec<u8> = SurveyStep::all()
            .iter()
            .map(SurveyStep::progress_percent)
            .collect();

        assert_eq!(progress, vec![20, 40, 60, 80, 100]);
    }

    #[test]
    fn only_results_is_terminal() {
        assert!(SurveyStep::Results.is_terminal());
        assert!(!SurveyStep::Conversion.is_terminal());
    }

    // =========================================================================
    // transition tests
    // =========================================================================

    #[test]
    fn retreat_at_first_step_is_noop() {
        let mut state = SurveyState::new();

        state.retreat();

        assert_eq!(state.step(), SurveyStep::Industry);
    }

    #[test]
    fn advance_at_results_is_noop() {
        let mut state = state_at(SurveyStep::Results);

        state.advance();

        assert_eq!(state.step(), SurveyStep::Results);
    }

    #[test]
    fn advance_then_retreat_returns_to_same_step() {
        let mut state = state_at(SurveyStep::Spend);

        state.advance();
        state.retreat();

        assert_eq!(state.step(), SurveyStep::Spend);
    }

    #[test]
    fn update_does_not_change_step() {
        let mut state = state_at(SurveyStep::Enquiries);

        state.update(UserDataUpdate::current_enquiries(dec!(20)));

        assert_eq!(state.step(), SurveyStep::Enquiries);
        assert_eq!(state.data().current_enquiries, dec!(20));
    }

    #[test]
    fn reset_clears_data_from_any_step() {
        for &step in SurveyStep::all() {
            let mut state = state_at(step);
            state.update(UserDataUpdate {
                industry: Some(Industry::Roofing),
                current_enquiries: Some(dec!(20)),
                avg_client_spend: Some(dec!(1400)),
                conversion_rate: Some(dec!(60)),
                is_recurring: Some(true),
            });

            state.reset();

            assert_eq!(state, SurveyState::new());
        }
    }

    #[test]
    fn select_industry_records_and_advances() {
        let mut state = SurveyState::new();

        state.select_industry(Industry::Electrician);

        assert_eq!(state.step(), SurveyStep::Enquiries);
        assert_eq!(state.data().industry, Some(Industry::Electrician));
    }

    // =========================================================================
    // can_continue tests
    // =========================================================================

    #[test]
    fn can_continue_needs_industry() {
        let mut state = SurveyState::new();
        assert!(!state.can_continue());

        state.update(UserDataUpdate::industry(Industry::Locksmith));

        assert!(state.can_continue());
    }

    #[test]
    fn can_continue_accepts_zero_enquiries() {
        let state = state_at(SurveyStep::Enquiries);

        assert!(state.can_continue());
    }

    #[test]
    fn can_continue_needs_non_zero_spend() {
        let mut state = state_at(SurveyStep::Spend);
        assert!(!state.can_continue());

        state.update(UserDataUpdate::avg_client_spend(dec!(250)));

        assert!(state.can_continue());
    }

    #[test]
    fn can_continue_needs_non_zero_conversion() {
        let mut state = state_at(SurveyStep::Conversion);
        assert!(!state.can_continue());

        state.update(UserDataUpdate::conversion_rate(dec!(30)));

        assert!(state.can_continue());
    }

    #[test]
    fn can_continue_is_false_on_results() {
        let state = state_at(SurveyStep::Results);

        assert!(!state.can_continue());
    }

    #[test]
    fn results_uses_current_answers() {
        let mut state = SurveyState::new();
        state.update(UserDataUpdate {
            current_enquiries: Some(dec!(20)),
            avg_client_spend: Some(dec!(1400)),
            conversion_rate: Some(dec!(60)),
            is_recurring: Some(true),
            ..Default::default()
        });

        let results = state.results(&ScenarioCalculator::default()).unwrap();

        assert_eq!(results.average.annual_cumulative_revenue, dec!(764400));
    }
}
