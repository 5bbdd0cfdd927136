pub mod calculations;
pub mod models;
pub mod survey;

pub use calculations::{
    CalculationError, ScenarioCalculator, ScenarioConfig, ScenarioConfigError, calculate_results,
};
pub use models::*;
pub use survey::{SurveyState, SurveyStep};
