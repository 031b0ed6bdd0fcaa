//! Year, month, day and hour pillars.

use crate::saju::solar_terms::SolarTermEngine;
use crate::saju::types::{HeavenlyStem, Pillar};
use crate::time::Instant;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Day-count epoch: 1900-01-31 was a 갑진 (甲辰) day.
pub const DAY_EPOCH: (i32, u32, u32) = (1900, 1, 31);
const DAY_EPOCH_ORDINAL: i64 = 693_626;
const DAY_EPOCH_STEM: i64 = 0;
const DAY_EPOCH_BRANCH: i64 = 4;

/// Year 4 CE opened a 갑자 cycle.
const YEAR_EPOCH: i64 = 4;

/// First month stem, indexed by `year_stem % 5`.
const MONTH_STEM_STARTS: [i64; 5] = [2, 4, 6, 8, 0];

/// First hour stem, indexed by `day_stem % 5`.
const HOUR_STEM_STARTS: [i64; 5] = [0, 2, 4, 6, 8];

/// Year, month, day and optional hour pillars, with the sexagenary year and
/// month they fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Option<Pillar>,
    /// Civil year whose Start of Spring opened the pillar year.
    pub sexagenary_year: i32,
    /// 1 for the month opened by 입춘 through 12 for 소한.
    pub sexagenary_month: u32,
}

/// Pillar arithmetic over a solar-term engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SexagenaryCalendar {
    solar_terms: SolarTermEngine,
}

impl SexagenaryCalendar {
    /// Create a calendar over `solar_terms`
    pub fn new(solar_terms: SolarTermEngine) -> Self {
        Self { solar_terms }
    }

    /// Pillar year containing `at`: the civil year, or the one before it
    /// while `at` precedes that year's Start of Spring.
    pub fn sexagenary_year(&self, at: NaiveDateTime) -> Option<i32> {
        let year = at.year();
        let ipchun = self.solar_terms.start_of_spring(year)?;
        Some(if at < ipchun { year - 1 } else { year })
    }

    /// Pillar of a sexagenary year; 1984 is 갑자.
    pub fn year_pillar_of(sexagenary_year: i32) -> Pillar {
        let offset = sexagenary_year as i64 - YEAR_EPOCH;
        Pillar::from_indices(offset, offset)
    }

    /// Year pillar in force at `at`
    pub fn year_pillar(&self, at: NaiveDateTime) -> Option<Pillar> {
        self.sexagenary_year(at).map(Self::year_pillar_of)
    }

    pub fn sexagenary_month(&self, at: NaiveDateTime) -> Option<u32> {
        let (term, _) = self.solar_terms.month_start_before(at)?;
        term.opens_month()
    }

    /// Month pillar from the year stem and month number (1 = 인월).
    pub fn month_pillar_of(year_stem: HeavenlyStem, sexagenary_month: u32) -> Pillar {
        let start = MONTH_STEM_STARTS[year_stem.index() % 5];
        let month = sexagenary_month as i64;
        Pillar::from_indices(start + month - 1, month + 1)
    }

    /// Month pillar in force at `at`
    pub fn month_pillar(&self, at: NaiveDateTime) -> Option<Pillar> {
        let year = self.year_pillar(at)?;
        let month = self.sexagenary_month(at)?;
        Some(Self::month_pillar_of(year.stem, month))
    }

    /// Depends on the calendar date alone.
    pub fn day_pillar(date: NaiveDate) -> Pillar {
        let days = date.num_days_from_ce() as i64 - DAY_EPOCH_ORDINAL;
        Pillar::from_indices(days + DAY_EPOCH_STEM, days + DAY_EPOCH_BRANCH)
    }

    /// Two clock hours per branch; 23:00 already belongs to 자.
    pub fn hour_branch_index(hour: u32) -> i64 {
        if hour == 23 {
            0
        } else {
            ((hour as i64 + 1) / 2) % 12
        }
    }

    /// Hour pillar from the day stem and clock hour.
    pub fn hour_pillar(day_stem: HeavenlyStem, hour: u32) -> Pillar {
        let branch = Self::hour_branch_index(hour);
        let start = HOUR_STEM_STARTS[day_stem.index() % 5];
        Pillar::from_indices(start + branch, branch)
    }

    /// All four pillars of a corrected instant. `None` when no solar-term
    /// table covers it.
    pub fn pillars(&self, instant: &Instant) -> Option<FourPillars> {
        let at = instant.local;
        let sexagenary_year = self.sexagenary_year(at)?;
        let sexagenary_month = self.sexagenary_month(at)?;
        let year = Self::year_pillar_of(sexagenary_year);
        let month = Self::month_pillar_of(year.stem, sexagenary_month);
        let day = Self::day_pillar(instant.date());
        let hour = instant.hour().map(|h| Self::hour_pillar(day.stem, h));
        Some(FourPillars {
            year,
            month,
            day,
            hour,
            sexagenary_year,
            sexagenary_month,
        })
    }
}
