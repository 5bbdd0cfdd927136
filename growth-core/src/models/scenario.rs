use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three growth assumptions every calculation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    Moderate,
    Average,
    OverPerform,
}

impl ScenarioKind {
    /// All kinds in display order.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::Moderate,
            ScenarioKind::Average,
            ScenarioKind::OverPerform,
        ]
    }

    /// Key used in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            ScenarioKind::Moderate => "moderate",
            ScenarioKind::Average => "average",
            ScenarioKind::OverPerform => "over_perform",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            ScenarioKind::Moderate => "Moderate Growth",
            ScenarioKind::Average => "Average Growth",
            ScenarioKind::OverPerform => "Over Perform",
        }
    }

    /// Default enquiry uplift: 25%, 60% and 120%.
    pub fn default_multiplier(&self) -> Decimal {
        match self {
            ScenarioKind::Moderate => Decimal::new(25, 2),
            ScenarioKind::Average => Decimal::new(60, 2),
            ScenarioKind::OverPerform => Decimal::new(120, 2),
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A named growth assumption applied to the current enquiry volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub label: String,

    /// Fraction of current enquiries gained on top, e.g. 0.60 for +60%.
    pub multiplier: Decimal,
}

impl Scenario {
    pub fn new(
        label: impl Into<String>,
        multiplier: Decimal,
    ) -> Self {
        Self {
            label: label.into(),
            multiplier,
        }
    }

    pub fn default_for(kind: ScenarioKind) -> Self {
        Self::new(kind.default_label(), kind.default_multiplier())
    }
}

/// Projection for a single scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub label: String,

    /// Extra enquiries per month, rounded to a whole number.
    pub additional_enquiries: Decimal,

    /// Extra enquiries that convert, rounded to a whole number.
    pub new_customers: Decimal,

    /// Revenue from one month's new customers.
    pub monthly_revenue: Decimal,

    /// Cumulative revenue at the end of the horizon.
    pub annual_cumulative_revenue: Decimal,

    /// Cumulative revenue at the end of each month.
    pub monthly_projections: Vec<Decimal>,
}

/// One result per scenario, produced fresh by every calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorResults {
    pub moderate: ScenarioResult,
    pub average: ScenarioResult,
    pub over_perform: ScenarioResult,
}

impl CalculatorResults {
    pub fn get(
        &self,
        kind: ScenarioKind,
    ) -> &ScenarioResult {
        match kind {
            ScenarioKind::Moderate => &self.moderate,
            ScenarioKind::Average => &self.average,
            ScenarioKind::OverPerform => &self.over_perform,
        }
    }

    /// Results paired with their kind, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ScenarioKind, &ScenarioResult)> {
        ScenarioKind::all().iter().map(|&kind| (kind, self.get(kind)))
    }
}
