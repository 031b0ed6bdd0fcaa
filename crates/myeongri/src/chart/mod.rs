pub mod natal;
pub mod transit;

pub use natal::{ChartBody, NatalCalculator, NatalChart, NatalRequest};
pub use transit::{TransitCalculator, TransitReport};
