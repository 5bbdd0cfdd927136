//! Revenue projection calculations for the growth survey.
//!
//! The engine turns the four survey metrics into one projection per
//! growth scenario. Everything here is pure and synchronous.

pub mod common;
pub mod scenario;

pub use scenario::{
    CalculationError, ScenarioCalculator, ScenarioConfig, ScenarioConfigError, calculate_results,
};
