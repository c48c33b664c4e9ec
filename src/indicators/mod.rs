pub mod momentum;
pub mod set;
pub mod trend;

pub use crate::error::IndicatorError;
pub use set::compute_indicator_set;
