pub mod mean_motion;
pub mod provider;
#[cfg(feature = "swisseph")]
pub mod swiss;
pub mod types;

pub use mean_motion::MeanMotionModel;
pub use provider::{julian_day, Ephemeris, EphemerisError, EphemerisSource};
#[cfg(feature = "swisseph")]
pub use swiss::SwissEphemeris;
pub use types::{
    format_dms, normalize_degrees, Body, BodyPosition, RawPosition, UnknownBody, ZodiacSign,
};
