//! Solar/lunar calendar conversion.

pub mod table;

pub use table::TableLunarCalendar;

use serde::{Deserialize, Serialize};

/// A lunar date, or the echoed solar input when `available` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
    pub available: bool,
}

/// A solar date, or the echoed lunar input when `available` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub available: bool,
}

/// Conversion between the civil calendar and the traditional lunisolar one.
///
/// Implementations report failure through the `available` flag, never by
/// erroring.
pub trait LunarCalendar: Send + Sync {
    fn solar_to_lunar(&self, year: i32, month: u32, day: u32) -> LunarDate;

    fn lunar_to_solar(&self, year: i32, month: u32, day: u32, is_leap_month: bool) -> SolarDate;

    fn is_available(&self) -> bool {
        true
    }
}

/// Stand-in when no lunar calendar is installed: echoes its input.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLunarCalendar;

impl LunarCalendar for UnavailableLunarCalendar {
    fn solar_to_lunar(&self, year: i32, month: u32, day: u32) -> LunarDate {
        LunarDate {
            year,
            month,
            day,
            is_leap_month: false,
            available: false,
        }
    }

    fn lunar_to_solar(&self, year: i32, month: u32, day: u32, _is_leap_month: bool) -> SolarDate {
        SolarDate {
            year,
            month,
            day,
            available: false,
        }
    }

    fn is_available(&self) -> bool {
        false
    }
}
