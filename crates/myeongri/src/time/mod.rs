pub mod normalizer;
pub mod zones;

pub use normalizer::{CivilDateTime, Instant, TimeNormalizer};
pub use zones::{StandardTimeRegime, SummerTimeRule, ZoneHistory};
