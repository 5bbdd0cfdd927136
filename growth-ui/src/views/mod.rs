pub mod chart;
pub mod dashboard;
pub mod form;

pub use dashboard::render_dashboard;
pub use form::{input_prompt, progress_bar, recurring_prompt, render_step};
