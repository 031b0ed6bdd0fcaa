use thiserror::Error;

/// Errors surfaced to callers of the kernel.
///
/// Provider failures never show up here: the ephemeris chain, unknown house
/// systems and a missing lunar calendar all recover locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("Invalid date: {year:04}-{month:02}-{day:02} (hour {hour:?}, minute {minute:?})")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: Option<u32>,
        minute: Option<u32>,
    },
    #[error("Invalid lunar date: {year:04}-{month:02}-{day:02} (leap month: {is_leap_month})")]
    InvalidLunarDate {
        year: i32,
        month: u32,
        day: u32,
        is_leap_month: bool,
    },
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

pub type Result<T> = std::result::Result<T, KernelError>;
