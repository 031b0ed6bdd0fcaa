//! The 24 solar terms (절기) from a linear mean-sun model.
//!
//! Each term is placed `longitude / 0.9856` days after a fixed 21 March
//! anchor for the equinox. Only month and year boundaries consume these
//! dates, so the model trades sub-day accuracy for being closed-form.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Mean apparent motion of the sun, degrees per day.
pub const MEAN_SOLAR_MOTION: f64 = 0.9856;

const EQUINOX_MONTH: u32 = 3;
const EQUINOX_DAY: u32 = 21;
const DAYS_PER_YEAR: i64 = 365;

/// The 24 solar terms (절기), from 소한.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarTerm {
    Sohan,
    Daehan,
    Ipchun,
    Usu,
    Gyeongchip,
    Chunbun,
    Cheongmyeong,
    Gogu,
    Ipha,
    Soman,
    Mangjong,
    Haji,
    Soseo,
    Daeseo,
    Ipchu,
    Cheoseo,
    Baengno,
    Chubun,
    Hallo,
    Sanggang,
    Ipdong,
    Soseol,
    Daeseol,
    Dongji,
}

impl SolarTerm {
    /// Calendar order, starting with 소한 in early January.
    pub const ALL: [SolarTerm; 24] = [
        SolarTerm::Sohan,
        SolarTerm::Daehan,
        SolarTerm::Ipchun,
        SolarTerm::Usu,
        SolarTerm::Gyeongchip,
        SolarTerm::Chunbun,
        SolarTerm::Cheongmyeong,
        SolarTerm::Gogu,
        SolarTerm::Ipha,
        SolarTerm::Soman,
        SolarTerm::Mangjong,
        SolarTerm::Haji,
        SolarTerm::Soseo,
        SolarTerm::Daeseo,
        SolarTerm::Ipchu,
        SolarTerm::Cheoseo,
        SolarTerm::Baengno,
        SolarTerm::Chubun,
        SolarTerm::Hallo,
        SolarTerm::Sanggang,
        SolarTerm::Ipdong,
        SolarTerm::Soseol,
        SolarTerm::Daeseol,
        SolarTerm::Dongji,
    ];

    /// The twelve terms that open a sexagenary month, month 1 first.
    pub const MONTH_STARTS: [SolarTerm; 12] = [
        SolarTerm::Ipchun,
        SolarTerm::Gyeongchip,
        SolarTerm::Cheongmyeong,
        SolarTerm::Ipha,
        SolarTerm::Mangjong,
        SolarTerm::Soseo,
        SolarTerm::Ipchu,
        SolarTerm::Baengno,
        SolarTerm::Hallo,
        SolarTerm::Ipdong,
        SolarTerm::Daeseol,
        SolarTerm::Sohan,
    ];

    /// Solar ecliptic longitude of the term, in degrees.
    pub fn longitude(&self) -> f64 {
        // 소한 sits at 285° and each later term adds 15°
        ((*self as usize as f64) * 15.0 + 285.0) % 360.0
    }

    pub fn korean(&self) -> &'static str {
        match self {
            SolarTerm::Sohan => "소한",
            SolarTerm::Daehan => "대한",
            SolarTerm::Ipchun => "입춘",
            SolarTerm::Usu => "우수",
            SolarTerm::Gyeongchip => "경칩",
            SolarTerm::Chunbun => "춘분",
            SolarTerm::Cheongmyeong => "청명",
            SolarTerm::Gogu => "곡우",
            SolarTerm::Ipha => "입하",
            SolarTerm::Soman => "소만",
            SolarTerm::Mangjong => "망종",
            SolarTerm::Haji => "하지",
            SolarTerm::Soseo => "소서",
            SolarTerm::Daeseo => "대서",
            SolarTerm::Ipchu => "입추",
            SolarTerm::Cheoseo => "처서",
            SolarTerm::Baengno => "백로",
            SolarTerm::Chubun => "추분",
            SolarTerm::Hallo => "한로",
            SolarTerm::Sanggang => "상강",
            SolarTerm::Ipdong => "입동",
            SolarTerm::Soseol => "소설",
            SolarTerm::Daeseol => "대설",
            SolarTerm::Dongji => "동지",
        }
    }

    /// Sexagenary month (1-12) this term opens, if it is a month start.
    pub fn opens_month(&self) -> Option<u32> {
        Self::MONTH_STARTS
            .iter()
            .position(|t| t == self)
            .map(|i| i as u32 + 1)
    }

    /// Parse a Korean term name
    pub fn from_korean(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.korean() == name.trim())
    }
}

/// Dates of all 24 terms for one civil year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarTermTable {
    pub year: i32,
    entries: Vec<(SolarTerm, NaiveDateTime)>,
}

impl SolarTermTable {
    /// Moment `term` falls in this table's year
    pub fn get(&self, term: SolarTerm) -> Option<NaiveDateTime> {
        self.entries
            .iter()
            .find(|(t, _)| *t == term)
            .map(|(_, date)| *date)
    }

    pub fn entries(&self) -> &[(SolarTerm, NaiveDateTime)] {
        &self.entries
    }

    /// Month-opening terms with their dates.
    pub fn month_starts(&self) -> impl Iterator<Item = (SolarTerm, NaiveDateTime)> + '_ {
        self.entries
            .iter()
            .copied()
            .filter(|(term, _)| term.opens_month().is_some())
    }
}

/// Produces [`SolarTermTable`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarTermEngine;

impl SolarTermEngine {
    /// Create a solar-term engine
    pub fn new() -> Self {
        Self
    }

    /// Date of `term` within `year`. `None` only when the year is outside
    /// the representable calendar.
    pub fn term_date(&self, year: i32, term: SolarTerm) -> Option<NaiveDateTime> {
        let anchor = NaiveDate::from_ymd_opt(year, EQUINOX_MONTH, EQUINOX_DAY)?
            .and_time(NaiveTime::default());
        let days = term.longitude() / MEAN_SOLAR_MOTION;
        let seconds = (days * 86_400.0).round() as i64;
        let date = anchor.checked_add_signed(Duration::seconds(seconds))?;

        // Longitudes past 285° land in January of the following year
        if date.year() > year {
            date.checked_sub_signed(Duration::days(DAYS_PER_YEAR))
        } else if date.year() < year {
            date.checked_add_signed(Duration::days(DAYS_PER_YEAR))
        } else {
            Some(date)
        }
    }

    /// All 24 terms of `year`, or `None` outside chrono's range
    pub fn table(&self, year: i32) -> Option<SolarTermTable> {
        let entries = SolarTerm::ALL
            .iter()
            .map(|term| self.term_date(year, *term).map(|date| (*term, date)))
            .collect::<Option<Vec<_>>>()?;
        Some(SolarTermTable { year, entries })
    }

    /// Start of Spring (입춘) of `year`, the sexagenary new year.
    pub fn start_of_spring(&self, year: i32) -> Option<NaiveDateTime> {
        self.term_date(year, SolarTerm::Ipchun)
    }

    /// Latest month-opening term at or before `at`, searching the tables of
    /// `at`'s year and the year before.
    pub fn month_start_before(&self, at: NaiveDateTime) -> Option<(SolarTerm, NaiveDateTime)> {
        let year = at.year();
        [year - 1, year]
            .iter()
            .filter_map(|y| self.table(*y))
            .flat_map(|table| table.month_starts().collect::<Vec<_>>())
            .filter(|(_, date)| *date <= at)
            .max_by_key(|(_, date)| *date)
    }
}
