
pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod kernel;
pub mod lunar;
pub mod saju;
pub mod time;
pub mod western;

pub use chart::{NatalChart, NatalRequest, TransitReport};
pub use error::{KernelError, Result};
pub use kernel::Kernel;
pub use myeongri_config::KernelConfig;
pub use saju::{SajuChart, SajuRequest};
