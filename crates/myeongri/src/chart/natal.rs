use crate::aspects::{AspectCalculator, AspectRecord};
use crate::ephemeris::{Body, BodyPosition, Ephemeris};
use crate::error::{KernelError, Result};
use crate::houses::{HouseCalculator, HouseCusps, HouseSystem};
use crate::time::{CivilDateTime, Instant, TimeNormalizer};
use crate::western::{DignityClassifier, DignityRecord, DignitySummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Birth data for a natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub latitude: f64,
    /// East positive.
    pub longitude: f64,
    /// Time-zone location identifier; the configured default when absent.
    #[serde(default)]
    pub location: Option<String>,
    /// Configured house system when absent.
    #[serde(default)]
    pub house_system: Option<String>,
    /// Body names; the ten planets when absent. Unknown names are skipped.
    #[serde(default)]
    pub bodies: Option<Vec<String>>,
}

impl NatalRequest {
    /// Request with the default location, house system and bodies
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            latitude,
            longitude,
            location: None,
            house_system: None,
            bodies: None,
        }
    }

    pub fn in_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Request a house system by name
    pub fn with_house_system(mut self, system: impl Into<String>) -> Self {
        self.house_system = Some(system.into());
        self
    }

    /// Request specific bodies by name
    pub fn with_bodies<S: Into<String>>(mut self, bodies: impl IntoIterator<Item = S>) -> Self {
        self.bodies = Some(bodies.into_iter().map(Into::into).collect());
        self
    }

    pub fn civil(&self) -> CivilDateTime {
        CivilDateTime::date(self.year, self.month, self.day).at(self.hour, self.minute)
    }

    fn validate_coordinates(&self) -> Result<()> {
        let valid = self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);
        if valid {
            Ok(())
        } else {
            Err(KernelError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Bodies to place, the ten planets when none were named
    pub fn requested_bodies(&self) -> Vec<Body> {
        match &self.bodies {
            Some(names) => Body::parse_list(names),
            None => Body::PLANETS.to_vec(),
        }
    }
}

/// A placed body and the house it falls in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBody {
    #[serde(flatten)]
    pub position: BodyPosition,
    pub house: u8,
}

/// A computed natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub instant: Instant,
    pub utc: DateTime<Utc>,
    pub julian_day: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub bodies: Vec<ChartBody>,
    pub houses: HouseCusps,
    pub aspects: Vec<AspectRecord>,
    pub dignities: Vec<DignityRecord>,
    pub dignity_summary: DignitySummary,
    /// Any position or house came from an analytic fallback.
    pub approximate: bool,
}

impl NatalChart {
    /// Chart entry for `body`
    pub fn body(&self, body: Body) -> Option<&ChartBody> {
        self.bodies.iter().find(|b| b.position.body == body)
    }

    pub fn positions(&self) -> Vec<BodyPosition> {
        self.bodies.iter().map(|b| b.position.clone()).collect()
    }

    /// The `n` tightest aspects.
    pub fn top_aspects(&self, n: usize) -> &[AspectRecord] {
        &self.aspects[..n.min(self.aspects.len())]
    }
}

/// Builds natal charts from an ephemeris.
#[derive(Debug, Clone, Default)]
pub struct NatalCalculator {
    houses: HouseCalculator,
    aspects: AspectCalculator,
    dignities: DignityClassifier,
}

impl NatalCalculator {
    /// Create a new natal calculator
    pub fn new(aspects: AspectCalculator) -> Self {
        Self {
            houses: HouseCalculator::new(),
            aspects,
            dignities: DignityClassifier::new(),
        }
    }

    pub fn aspects(&self) -> &AspectCalculator {
        &self.aspects
    }

    /// Compute the chart for `request`
    pub fn compute(
        &self,
        request: &NatalRequest,
        normalizer: &TimeNormalizer,
        ephemeris: &Ephemeris,
        default_house_system: HouseSystem,
    ) -> Result<NatalChart> {
        request.validate_coordinates()?;
        let location = request.location.as_deref().unwrap_or("");
        let instant = normalizer.normalize(&request.civil(), location)?;
        let utc = instant.to_utc()?;
        let jd = ephemeris.julian_day(utc);

        let system = match &request.house_system {
            Some(name) => HouseSystem::resolve(name),
            None => default_house_system,
        };
        let houses = self
            .houses
            .compute(ephemeris, jd, request.latitude, request.longitude, system);

        let positions = ephemeris.positions(jd, &request.requested_bodies());
        let aspects = self.aspects.compute_aspects(&positions);
        let dignities = self.dignities.classify_positions(&positions);
        let approximate = houses.approximate || positions.iter().any(|p| p.approximate);

        let bodies = positions
            .into_iter()
            .map(|position| ChartBody {
                house: houses.house_of(position.longitude),
                position,
            })
            .collect();

        log::debug!(
            "NatalCalculator: JD {:.5}, houses {} (requested {}), approximate: {}",
            jd,
            houses.system.name(),
            houses.requested.name(),
            approximate
        );

        Ok(NatalChart {
            instant,
            utc,
            julian_day: jd,
            latitude: request.latitude,
            longitude: request.longitude,
            bodies,
            houses,
            aspects,
            dignity_summary: DignitySummary::from_records(&dignities),
            dignities,
            approximate,
        })
    }
}
