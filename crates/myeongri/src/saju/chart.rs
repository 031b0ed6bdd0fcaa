use crate::error::{KernelError, Result};
use crate::lunar::{LunarCalendar, LunarDate};
use crate::saju::analysis::{self, Compatibility, FavourableElements, StemGod};
use crate::saju::calendar::SexagenaryCalendar;
use crate::saju::luck::{ElementBalance, Gender, LuckCycle};
use crate::saju::types::Pillar;
use crate::time::{CivilDateTime, Instant, TimeNormalizer};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Which calendar the request's date fields are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalendarKind {
    #[default]
    Solar,
    Lunar { is_leap_month: bool },
}

/// Input for a four-pillar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SajuRequest {
    pub date: CivilDateTime,
    #[serde(default)]
    pub calendar: CalendarKind,
    /// Location identifier; the configured default when absent.
    #[serde(default)]
    pub location: Option<String>,
    /// Needed only for luck pillars.
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl SajuRequest {
    /// Request for a solar (Gregorian) date
    pub fn solar(year: i32, month: u32, day: u32) -> Self {
        Self {
            date: CivilDateTime::date(year, month, day),
            calendar: CalendarKind::Solar,
            location: None,
            gender: None,
        }
    }

    /// Request for a lunar date
    pub fn lunar(year: i32, month: u32, day: u32, is_leap_month: bool) -> Self {
        Self {
            calendar: CalendarKind::Lunar { is_leap_month },
            ..Self::solar(year, month, day)
        }
    }

    /// Set the birth time
    pub fn at(mut self, hour: u32, minute: u32) -> Self {
        self.date = self.date.at(hour, minute);
        self
    }

    pub fn in_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the gender, enabling luck pillars
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }
}

/// A four-pillar (사주) chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SajuChart {
    pub instant: Instant,
    /// Civil date the chart was computed for, after any lunar conversion.
    pub solar_date: CivilDateTime,
    pub lunar_date: LunarDate,
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Option<Pillar>,
    pub sexagenary_year: i32,
    pub sexagenary_month: u32,
    pub zodiac_animal: String,
    pub elements: ElementBalance,
    pub ten_gods: Vec<StemGod>,
    pub favourable: FavourableElements,
    pub luck: Option<LuckCycle>,
}

impl SajuChart {
    /// Pillars in year, month, day, hour order
    pub fn pillars(&self) -> impl Iterator<Item = &Pillar> {
        [Some(&self.year), Some(&self.month), Some(&self.day), self.hour.as_ref()]
            .into_iter()
            .flatten()
    }

    /// Day-stem compatibility with another chart.
    pub fn compatibility_with(&self, other: &SajuChart) -> Compatibility {
        Compatibility::between(&self.day, &other.day)
    }
}

/// Time normalization, lunar input handling and pillar calculation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SajuCalculator {
    calendar: SexagenaryCalendar,
}

impl SajuCalculator {
    pub fn new(calendar: SexagenaryCalendar) -> Self {
        Self { calendar }
    }

    /// Compute a chart for `request`
    pub fn compute(
        &self,
        request: &SajuRequest,
        normalizer: &TimeNormalizer,
        lunar: &dyn LunarCalendar,
    ) -> Result<SajuChart> {
        let solar_date = self.resolve_solar_date(request, lunar)?;
        let location = request.location.as_deref().unwrap_or("");
        let instant = normalizer.normalize(&solar_date, location)?;

        let pillars = self
            .calendar
            .pillars(&instant)
            .ok_or_else(|| KernelError::InvalidDate {
                year: solar_date.year,
                month: solar_date.month,
                day: solar_date.day,
                hour: solar_date.hour,
                minute: solar_date.minute,
            })?;

        let corrected = instant.date();
        let lunar_date = lunar.solar_to_lunar(corrected.year(), corrected.month(), corrected.day());
        if !lunar_date.available {
            log::debug!("SajuCalculator: no lunar date for {}", corrected);
        }

        let elements = ElementBalance::from_pillars(
            [Some(&pillars.year), Some(&pillars.month), Some(&pillars.day), pillars.hour.as_ref()]
                .into_iter()
                .flatten(),
        );

        Ok(SajuChart {
            instant,
            solar_date,
            lunar_date,
            year: pillars.year,
            month: pillars.month,
            day: pillars.day,
            hour: pillars.hour,
            sexagenary_year: pillars.sexagenary_year,
            sexagenary_month: pillars.sexagenary_month,
            zodiac_animal: pillars.year.branch.animal().to_string(),
            ten_gods: analysis::ten_gods(
                &pillars.day,
                &pillars.year,
                &pillars.month,
                pillars.hour.as_ref(),
            ),
            favourable: FavourableElements::from_balance(pillars.day.stem_element, &elements),
            elements,
            luck: request
                .gender
                .map(|g| LuckCycle::from_birth(&pillars.year, &pillars.month, g)),
        })
    }

    /// Convert lunar input to a solar date. Without a lunar calendar the
    /// fields are used as if they were solar.
    fn resolve_solar_date(
        &self,
        request: &SajuRequest,
        lunar: &dyn LunarCalendar,
    ) -> Result<CivilDateTime> {
        let CalendarKind::Lunar { is_leap_month } = request.calendar else {
            return Ok(request.date);
        };
        let date = request.date;
        if !lunar.is_available() {
            log::warn!(
                "SajuCalculator: lunar calendar unavailable, treating {}-{}-{} as solar",
                date.year,
                date.month,
                date.day
            );
            return Ok(date);
        }
        let solar = lunar.lunar_to_solar(date.year, date.month, date.day, is_leap_month);
        if !solar.available {
            return Err(KernelError::InvalidLunarDate {
                year: date.year,
                month: date.month,
                day: date.day,
                is_leap_month,
            });
        }
        Ok(CivilDateTime {
            year: solar.year,
            month: solar.month,
            day: solar.day,
            ..date
        })
    }
}
