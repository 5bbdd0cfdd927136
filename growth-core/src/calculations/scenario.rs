//! Scenario revenue projections for the growth survey.
//!
//! Each scenario applies an enquiry multiplier to the visitor's current
//! monthly enquiries and projects the extra revenue month by month.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Additional enquiries: current enquiries × multiplier, rounded |
//! | 2    | New customers: step 1 × conversion rate ÷ 100, rounded |
//! | 3    | Monthly revenue: step 2 × average client spend |
//! | 4    | Cumulative revenue at month m: step 3 × m (one-off spend) |
//! |      | or step 3 × m(m+1)/2 (recurring spend) |
//! | 5    | Annual cumulative revenue: last entry of step 4 |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use growth_core::{ScenarioCalculator, ScenarioConfig, UserData};
//!
//! let data = UserData {
//!     current_enquiries: dec!(20),
//!     avg_client_spend: dec!(1400),
//!     conversion_rate: dec!(60),
//!     ..Default::default()
//! };
//!
//! let calculator = ScenarioCalculator::new(ScenarioConfig::default()).unwrap();
//! let results = calculator.calculate(&data).unwrap();
//!
//! assert_eq!(results.average.additional_enquiries, dec!(12));
//! assert_eq!(results.average.new_customers, dec!(7));
//! assert_eq!(results.average.monthly_revenue, dec!(9800));
//! assert_eq!(results.average.annual_cumulative_revenue, dec!(117600));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{round_half_up, triangular};
use crate::{CalculatorResults, Scenario, ScenarioKind, ScenarioResult, UserData};

/// Longest projection horizon accepted by [`ScenarioConfig::validate`].
pub const MAX_MONTHS: u32 = 120;

/// Projection horizon used by the default configuration.
pub const DEFAULT_MONTHS: u32 = 12;

/// Errors raised when a [`ScenarioConfig`] is not usable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioConfigError {
    /// The projection horizon must be between 1 and [`MAX_MONTHS`].
    #[error("projection horizon must be between 1 and 120 months, got {0}")]
    InvalidMonths(u32),

    /// A scenario multiplier was negative.
    #[error("multiplier for {scenario} must be non-negative, got {multiplier}")]
    NegativeMultiplier {
        scenario: ScenarioKind,
        multiplier: Decimal,
    },

    /// A scenario label was empty or whitespace.
    #[error("label for {0} must not be empty")]
    EmptyLabel(ScenarioKind),
}

/// Errors that can occur while projecting revenue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    /// An intermediate value left the representable decimal range.
    #[error("revenue projection for {scenario} is out of range")]
    Overflow { scenario: ScenarioKind },
}

/// Scenario table and projection horizon.
///
/// The default reproduces the three named scenarios over twelve months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub moderate: Scenario,
    pub average: Scenario,
    pub over_perform: Scenario,

    /// Number of monthly projection points.
    pub months: u32,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            moderate: Scenario::default_for(ScenarioKind::Moderate),
            average: Scenario::default_for(ScenarioKind::Average),
            over_perform: Scenario::default_for(ScenarioKind::OverPerform),
            months: DEFAULT_MONTHS,
        }
    }
}

impl ScenarioConfig {
    pub fn scenario(
        &self,
        kind: ScenarioKind,
    ) -> &Scenario {
        match kind {
            ScenarioKind::Moderate => &self.moderate,
            ScenarioKind::Average => &self.average,
            ScenarioKind::OverPerform => &self.over_perform,
        }
    }

    pub fn scenario_mut(
        &mut self,
        kind: ScenarioKind,
    ) -> &mut Scenario {
        match kind {
            ScenarioKind::Moderate => &mut self.moderate,
            ScenarioKind::Average => &mut self.average,
            ScenarioKind::OverPerform => &mut self.over_perform,
        }
    }

    /// Checks the horizon, labels and multipliers.
    pub fn validate(&self) -> Result<(), ScenarioConfigError> {
        if self.months == 0 || self.months > MAX_MONTHS {
            return Err(ScenarioConfigError::InvalidMonths(self.months));
        }

        for &kind in ScenarioKind::all() {
            let scenario = self.scenario(kind);
            if scenario.label.trim().is_empty() {
                return Err(ScenarioConfigError::EmptyLabel(kind));
            }
            if scenario.multiplier.is_sign_negative() && !scenario.multiplier.is_zero() {
                return Err(ScenarioConfigError::NegativeMultiplier {
                    scenario: kind,
                    multiplier: scenario.multiplier,
                });
            }
        }

        Ok(())
    }
}

/// Calculator for the growth scenarios.
///
/// Holds only an immutable, validated configuration, so a single instance
/// can be reused for every render.
#[derive(Debug, Clone, Default)]
pub struct ScenarioCalculator {
    config: ScenarioConfig,
}

impl ScenarioCalculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioConfigError`] if the configuration is invalid.
    pub fn new(config: ScenarioConfig) -> Result<Self, ScenarioConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    /// Projects every scenario for the given survey answers.
    ///
    /// Inputs are not range-checked: negative values produce negative
    /// projections.
    ///
    /// # Arguments
    ///
    /// * `data` - The survey answers to project from
    ///
    /// # Returns
    ///
    /// One [`ScenarioResult`](crate::ScenarioResult) per configured scenario.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError::Overflow`] if a value exceeds the
    /// decimal range.
    pub fn calculate(
        &self,
        data: &UserData,
    ) -> Result<CalculatorResults, CalculationError> {
        let results = CalculatorResults {
            moderate: self.project(ScenarioKind::Moderate, data)?,
            average: self.project(ScenarioKind::Average, data)?,
            over_perform: self.project(ScenarioKind::OverPerform, data)?,
        };

        debug!(
            industry = ?data.industry,
            recurring = data.is_recurring,
            average_annual = %results.average.annual_cumulative_revenue,
            "calculated scenario results"
        );

        Ok(results)
    }

    /// Runs every step for a single scenario.
    fn project(
        &self,
        kind: ScenarioKind,
        data: &UserData,
    ) -> Result<ScenarioResult, CalculationError> {
        let scenario = self.config.scenario(kind);
        let overflow = || {
            warn!(scenario = %kind, "scenario projection overflowed");
            CalculationError::Overflow { scenario: kind }
        };

        let additional_enquiries = self
            .additional_enquiries(data.current_enquiries, scenario.multiplier)
            .ok_or_else(overflow)?;
        let new_customers = self
            .new_customers(additional_enquiries, data.conversion_rate)
            .ok_or_else(overflow)?;
        let monthly_revenue = new_customers
            .checked_mul(data.avg_client_spend)
            .ok_or_else(overflow)?;
        let monthly_projections = self
            .monthly_projections(monthly_revenue, data.is_recurring)
            .ok_or_else(overflow)?;
        let annual_cumulative_revenue = monthly_projections
            .last()
            .copied()
            .unwrap_or(Decimal::ZERO);

        Ok(ScenarioResult {
            label: scenario.label.clone(),
            additional_enquiries,
            new_customers,
            monthly_revenue,
            annual_cumulative_revenue,
            monthly_projections,
        })
    }

    /// Extra monthly enquiries, rounded to a whole number.
    fn additional_enquiries(
        &self,
        current_enquiries: Decimal,
        multiplier: Decimal,
    ) -> Option<Decimal> {
        current_enquiries.checked_mul(multiplier).map(round_half_up)
    }

    /// Extra enquiries that convert, rounded to a whole number.
    fn new_customers(
        &self,
        additional_enquiries: Decimal,
        conversion_rate: Decimal,
    ) -> Option<Decimal> {
        let fraction = conversion_rate.checked_div(Decimal::ONE_HUNDRED)?;
        additional_enquiries.checked_mul(fraction).map(round_half_up)
    }

    /// Cumulative revenue at the end of each month of the horizon.
    ///
    /// One-off spend grows linearly. Recurring spend keeps every earlier
    /// cohort paying, so month `m` holds `m(m+1)/2` months of revenue.
    fn monthly_projections(
        &self,
        monthly_revenue: Decimal,
        is_recurring: bool,
    ) -> Option<Vec<Decimal>> {
        (1..=self.config.months)
            .map(|month| {
                let revenue_months = if is_recurring {
                    triangular(month)
                } else {
                    u64::from(month)
                };
                monthly_revenue.checked_mul(Decimal::from(revenue_months))
            })
            .collect()
    }
}

/// Calculates the default scenarios for `data`.
///
/// # Errors
///
/// Returns [`CalculationError::Overflow`] if a value exceeds the decimal
/// range.
pub fn calculate_results(data: &UserData) -> Result<CalculatorResults, CalculationError> {
    ScenarioCalculator::default().calculate(data)
}
