mod industry;
mod scenario;
mod user_data;

pub use industry::{Industry, ParseIndustryError};
pub use scenario::{CalculatorResults, Scenario, ScenarioKind, ScenarioResult};
pub use user_data::{UserData, UserDataUpdate};
