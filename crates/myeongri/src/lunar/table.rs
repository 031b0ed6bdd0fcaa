//! Lunisolar calendar from the packed month-length table for 1900-2100.
//!
//! Each entry encodes one lunar year: bits 15..4 flag 30-day months
//! (month 1 in bit 15), bits 3..0 give the leap month (0 for none) and
//! bit 16 flags a 30-day leap month.

use crate::lunar::{LunarCalendar, LunarDate, SolarDate};
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;

pub const FIRST_YEAR: i32 = 1900;
pub const LAST_YEAR: i32 = 2100;

/// Days from 0001-01-01 (day 1) to 1900-01-31, lunar 1900-01-01.
const BASE_ORDINAL: i64 = 693_626;

// Ten lunar years per row from 1900; the last row is 2100 alone.
const LUNAR_INFO: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2,
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977,
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970,
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950,
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557,
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0,
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0,
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6,
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570,
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0,
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5,
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930,
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530,
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45,
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0,
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0,
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4,
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0,
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160,
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252,
    0x0d520,
];

lazy_static! {
    /// Day offset (from 1900-01-31) of each lunar new year, plus the end.
    static ref YEAR_STARTS: Vec<i64> = {
        let mut starts = Vec::with_capacity(LUNAR_INFO.len() + 1);
        let mut offset = 0i64;
        for info in LUNAR_INFO.iter() {
            starts.push(offset);
            offset += year_length(*info) as i64;
        }
        starts.push(offset);
        starts
    };
}

fn leap_month(info: u32) -> u32 {
    info & 0xf
}

fn leap_month_length(info: u32) -> u32 {
    if leap_month(info) == 0 {
        0
    } else if info & 0x10000 != 0 {
        30
    } else {
        29
    }
}

fn month_length(info: u32, month: u32) -> u32 {
    if info & (0x10000 >> month) != 0 {
        30
    } else {
        29
    }
}

fn year_length(info: u32) -> u32 {
    (1..=12).map(|m| month_length(info, m)).sum::<u32>() + leap_month_length(info)
}

/// Months of a lunar year in order, leap month after its namesake.
fn months(info: u32) -> impl Iterator<Item = (u32, bool, u32)> {
    let leap = leap_month(info);
    (1..=12u32).flat_map(move |m| {
        let regular = std::iter::once((m, false, month_length(info, m)));
        let intercalary = (m == leap).then(|| (m, true, leap_month_length(info)));
        regular.chain(intercalary)
    })
}

fn info_for(year: i32) -> Option<u32> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return None;
    }
    LUNAR_INFO.get((year - FIRST_YEAR) as usize).copied()
}

/// Korean lunar calendar from a packed month-length table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLunarCalendar;

impl TableLunarCalendar {
    /// Create a table-backed calendar
    pub fn new() -> Self {
        Self
    }

    /// Leap month of a lunar year, if it has one.
    pub fn leap_month(&self, year: i32) -> Option<u32> {
        info_for(year).map(leap_month).filter(|m| *m != 0)
    }

    /// Length of a lunar month, or `None` if the year has no such month
    pub fn days_in_month(&self, year: i32, month: u32, is_leap_month: bool) -> Option<u32> {
        let info = info_for(year)?;
        if !(1..=12).contains(&month) {
            return None;
        }
        if is_leap_month {
            (leap_month(info) == month).then(|| leap_month_length(info))
        } else {
            Some(month_length(info, month))
        }
    }

    fn to_lunar(&self, date: NaiveDate) -> Option<LunarDate> {
        let offset = date.num_days_from_ce() as i64 - BASE_ORDINAL;
        let end = *YEAR_STARTS.last()?;
        if offset < 0 || offset >= end {
            return None;
        }
        let index = YEAR_STARTS.partition_point(|start| *start <= offset) - 1;
        let info = LUNAR_INFO[index];
        let mut remaining = offset - YEAR_STARTS[index];
        for (month, is_leap_month, length) in months(info) {
            if remaining < length as i64 {
                return Some(LunarDate {
                    year: FIRST_YEAR + index as i32,
                    month,
                    day: remaining as u32 + 1,
                    is_leap_month,
                    available: true,
                });
            }
            remaining -= length as i64;
        }
        None
    }

    fn to_solar(&self, year: i32, month: u32, day: u32, is_leap_month: bool) -> Option<NaiveDate> {
        let length = self.days_in_month(year, month, is_leap_month)?;
        if day == 0 || day > length {
            return None;
        }
        let index = (year - FIRST_YEAR) as usize;
        let info = LUNAR_INFO[index];
        let before: i64 = months(info)
            .take_while(|(m, leap, _)| !(*m == month && *leap == is_leap_month))
            .map(|(_, _, len)| len as i64)
            .sum();
        let ordinal = BASE_ORDINAL + YEAR_STARTS[index] + before + day as i64 - 1;
        NaiveDate::from_num_days_from_ce_opt(i32::try_from(ordinal).ok()?)
    }
}

impl LunarCalendar for TableLunarCalendar {
    fn solar_to_lunar(&self, year: i32, month: u32, day: u32) -> LunarDate {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| self.to_lunar(date))
            .unwrap_or(LunarDate {
                year,
                month,
                day,
                is_leap_month: false,
                available: false,
            })
    }

    fn lunar_to_solar(&self, year: i32, month: u32, day: u32, is_leap_month: bool) -> SolarDate {
        match self.to_solar(year, month, day, is_leap_month) {
            Some(date) => SolarDate {
                year: date.year(),
                month: date.month(),
                day: date.day(),
                available: true,
            },
            None => SolarDate {
                year,
                month,
                day,
                available: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_span() {
        assert_eq!(YEAR_STARTS.len(), 202);
        let calendar = TableLunarCalendar::new();
        let first = calendar.solar_to_lunar(1900, 1, 31);
        assert_eq!((first.year, first.month, first.day), (1900, 1, 1));
        assert!(!calendar.solar_to_lunar(1900, 1, 30).available);
    }

    #[test]
    fn test_new_years() {
        let calendar = TableLunarCalendar::new();
        for (y, m, d) in [(1950, 2, 17), (1990, 1, 27), (2000, 2, 5), (2024, 2, 10), (2100, 2, 9)] {
            let solar = calendar.lunar_to_solar(y, 1, 1, false);
            assert_eq!((solar.year, solar.month, solar.day), (y, m, d));
            assert!(solar.available);
        }
    }

    #[test]
    fn test_leap_months() {
        let calendar = TableLunarCalendar::new();
        assert_eq!(calendar.leap_month(2023), Some(2));
        assert_eq!(calendar.leap_month(1990), Some(5));
        assert_eq!(calendar.leap_month(2024), None);

        let lunar = calendar.solar_to_lunar(2023, 3, 22);
        assert_eq!((lunar.month, lunar.day, lunar.is_leap_month), (2, 1, true));
        let lunar = calendar.solar_to_lunar(2023, 4, 20);
        assert_eq!((lunar.month, lunar.day, lunar.is_leap_month), (3, 1, false));
    }

    #[test]
    fn test_invalid_lunar_dates() {
        let calendar = TableLunarCalendar::new();
        assert!(!calendar.lunar_to_solar(2024, 2, 1, true).available);
        assert!(!calendar.lunar_to_solar(2024, 13, 1, false).available);
        assert!(!calendar.lunar_to_solar(2024, 1, 31, false).available);
        assert!(!calendar.lunar_to_solar(1899, 1, 1, false).available);
    }

    #[test]
    fn test_year_lengths_are_plausible() {
        for info in LUNAR_INFO.iter() {
            let len = year_length(*info);
            assert!((353..=385).contains(&len), "year length {}", len);
        }
    }
}
