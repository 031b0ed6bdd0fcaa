//! Historical standard-time and summer-time tables.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A standard-time regime in force on `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardTimeRegime {
    pub start: (i32, u32, u32),
    pub end: (i32, u32, u32),
    /// Offset east of UTC, in minutes.
    pub offset_minutes: i32,
}

/// Summer time observed in the listed years, inclusive month range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummerTimeRule {
    pub first_year: i32,
    pub last_year: i32,
    pub first_month: u32,
    pub last_month: u32,
    pub shift_minutes: i32,
}

const KOREA_REGIMES: &[StandardTimeRegime] = &[
    // Local mean time of Seoul
    StandardTimeRegime {
        start: (1, 1, 1),
        end: (1908, 4, 1),
        offset_minutes: 8 * 60 + 28,
    },
    StandardTimeRegime {
        start: (1908, 4, 1),
        end: (1912, 1, 1),
        offset_minutes: 8 * 60 + 30,
    },
    StandardTimeRegime {
        start: (1912, 1, 1),
        end: (1954, 3, 21),
        offset_minutes: 9 * 60,
    },
    StandardTimeRegime {
        start: (1954, 3, 21),
        end: (1961, 8, 10),
        offset_minutes: 8 * 60 + 30,
    },
    StandardTimeRegime {
        start: (1961, 8, 10),
        end: (2100, 1, 1),
        offset_minutes: 9 * 60,
    },
];

const KOREA_SUMMER_TIME: &[SummerTimeRule] = &[
    SummerTimeRule {
        first_year: 1948,
        last_year: 1951,
        first_month: 4,
        last_month: 10,
        shift_minutes: 60,
    },
    SummerTimeRule {
        first_year: 1955,
        last_year: 1960,
        first_month: 4,
        last_month: 10,
        shift_minutes: 60,
    },
    SummerTimeRule {
        first_year: 1987,
        last_year: 1988,
        first_month: 4,
        last_month: 10,
        shift_minutes: 60,
    },
];

const KOREA_REFERENCE_OFFSET: i32 = 9 * 60;

const KOREAN_LOCATIONS: &[&str] = &[
    "seoul", "korea", "south_korea", "kr", "kst", "asia/seoul", "busan", "incheon", "daegu",
    "daejeon", "gwangju", "ulsan", "jeju", "서울", "부산", "인천", "대구", "대전", "광주", "울산",
    "제주", "한국", "대한민국",
];

/// The time-keeping history of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneHistory {
    /// Korean standard time with its historical regimes and summer time.
    Korea,
    /// A constant offset with no summer time.
    Fixed { offset_minutes: i32 },
}

impl ZoneHistory {
    /// Resolve a location identifier. Returns `None` for unknown locations.
    pub fn from_location(location: &str) -> Option<Self> {
        let id = location.trim().to_lowercase();
        if KOREAN_LOCATIONS.contains(&id.as_str()) {
            return Some(ZoneHistory::Korea);
        }
        if matches!(id.as_str(), "utc" | "gmt" | "z" | "etc/utc") {
            return Some(ZoneHistory::Fixed { offset_minutes: 0 });
        }
        let rest = id
            .strip_prefix("utc")
            .or_else(|| id.strip_prefix("gmt"))
            .unwrap_or(&id);
        parse_offset(rest).map(|offset_minutes| ZoneHistory::Fixed { offset_minutes })
    }

    /// Standard offset on `date`. Dates outside the table take the nearest regime.
    pub fn standard_offset_minutes(&self, date: NaiveDate) -> i32 {
        match self {
            ZoneHistory::Fixed { offset_minutes } => *offset_minutes,
            ZoneHistory::Korea => regime_offset(KOREA_REGIMES, date),
        }
    }

    /// Daylight-saving shift in force on `date`
    pub fn summer_time_minutes(&self, date: NaiveDate) -> i32 {
        match self {
            ZoneHistory::Fixed { .. } => 0,
            ZoneHistory::Korea => KOREA_SUMMER_TIME
                .iter()
                .find(|rule| {
                    (rule.first_year..=rule.last_year).contains(&date.year())
                        && (rule.first_month..=rule.last_month).contains(&date.month())
                })
                .map(|rule| rule.shift_minutes)
                .unwrap_or(0),
        }
    }

    /// Offset legally in force on `date`, summer time included.
    pub fn legal_offset_minutes(&self, date: NaiveDate) -> i32 {
        self.standard_offset_minutes(date) + self.summer_time_minutes(date)
    }

    /// Offset all corrected clock readings are expressed in.
    pub fn reference_offset_minutes(&self) -> i32 {
        match self {
            ZoneHistory::Fixed { offset_minutes } => *offset_minutes,
            ZoneHistory::Korea => KOREA_REFERENCE_OFFSET,
        }
    }
}

fn regime_offset(regimes: &[StandardTimeRegime], date: NaiveDate) -> i32 {
    let key = (date.year(), date.month(), date.day());
    for regime in regimes {
        if regime.start <= key && key < regime.end {
            return regime.offset_minutes;
        }
    }
    match (regimes.first(), regimes.last()) {
        (Some(first), _) if key < first.start => first.offset_minutes,
        (_, Some(last)) => last.offset_minutes,
        _ => 0,
    }
}

/// Parse "+09:00", "-0530", "+9" style offsets.
fn parse_offset(text: &str) -> Option<i32> {
    let (sign, digits) = match text.chars().next()? {
        '+' => (1, &text[1..]),
        '-' => (-1, &text[1..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.is_ascii() {
        return None;
    }
    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None if digits.len() == 4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        None => (digits.parse::<i32>().ok()?, 0),
    };
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    Some(sign * (hours * 60 + minutes))
}
