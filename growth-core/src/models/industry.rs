use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service business categories offered on the first survey step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    PlumbingAndHeating,
    WindowCleaning,
    ExteriorCleaning,
    Electrician,
    LandscapingAndGardening,
    Roofing,
    PestControl,
    CommercialCleaning,
    Locksmith,
    GeneralContracting,
    OtherServiceBusiness,
}

/// Returned when a label does not name any [`Industry`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown industry '{0}'")]
pub struct ParseIndustryError(String);

impl Industry {
    /// All industries in display order.
    pub fn all() -> &'static [Industry] {
        &[
            Industry::PlumbingAndHeating,
            Industry::WindowCleaning,
            Industry::ExteriorCleaning,
            Industry::Electrician,
            Industry::LandscapingAndGardening,
            Industry::Roofing,
            Industry::PestControl,
            Industry::CommercialCleaning,
            Industry::Locksmith,
            Industry::GeneralContracting,
            Industry::OtherServiceBusiness,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Industry::PlumbingAndHeating => "Plumbing & Heating",
            Industry::WindowCleaning => "Window Cleaning",
            Industry::ExteriorCleaning => "Exterior Cleaning",
            Industry::Electrician => "Electrician",
            Industry::LandscapingAndGardening => "Landscaping & Gardening",
            Industry::Roofing => "Roofing",
            Industry::PestControl => "Pest Control",
            Industry::CommercialCleaning => "Commercial Cleaning",
            Industry::Locksmith => "Locksmith",
            Industry::GeneralContracting => "General Contracting",
            Industry::OtherServiceBusiness => "Other Service Business",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = ParseIndustryError;

    /// Matches a display label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Industry::all()
            .iter()
            .copied()
            .find(|industry| industry.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseIndustryError(s.to_string()))
    }
}
