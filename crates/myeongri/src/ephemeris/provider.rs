use crate::ephemeris::mean_motion::MeanMotionModel;
use crate::ephemeris::types::{normalize_degrees, Body, BodyPosition, RawPosition};
use crate::houses::{HouseSystem, RawHouses};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Julian Day of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Failures of a precise source. The chain recovers from all of them.
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("{source_name} does not provide {body}")]
    UnsupportedBody {
        body: Body,
        source_name: &'static str,
    },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: Body,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// A precise ephemeris backend.
///
/// Implementations must be safe to call from several threads; a backend
/// that is not re-entrant serializes its calls internally.
pub trait EphemerisSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn body_position(&self, jd: f64, body: Body) -> Result<RawPosition, EphemerisError>;

    fn house_cusps(
        &self,
        jd: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError>;
}

/// Julian Day (UT) of a UTC instant.
pub fn julian_day(utc: DateTime<Utc>) -> f64 {
    let seconds = utc.timestamp() as f64 + utc.timestamp_subsec_nanos() as f64 / 1e9;
    UNIX_EPOCH_JD + seconds / 86_400.0
}

/// Precise source first, mean-motion model second.
pub struct Ephemeris {
    precise: Option<Box<dyn EphemerisSource>>,
    fallback: MeanMotionModel,
}

impl Ephemeris {
    /// Analytic model only.
    pub fn approximate() -> Self {
        Self {
            precise: None,
            fallback: MeanMotionModel::new(),
        }
    }

    /// Use `source` first, falling back to the mean-motion model
    pub fn with_source(source: Box<dyn EphemerisSource>) -> Self {
        Self {
            precise: Some(source),
            fallback: MeanMotionModel::new(),
        }
    }

    /// Install the Swiss Ephemeris when it is compiled in and its data
    /// directory exists, the analytic model otherwise.
    pub fn probe(ephemeris_path: Option<PathBuf>) -> Self {
        #[cfg(feature = "swisseph")]
        {
            match crate::ephemeris::swiss::SwissEphemeris::new(ephemeris_path) {
                Ok(source) => {
                    log::info!("Ephemeris: using Swiss Ephemeris at {}", source.path().display());
                    Self::with_source(Box::new(source))
                }
                Err(e) => {
                    log::warn!("Ephemeris: Swiss Ephemeris unavailable, using mean motion: {}", e);
                    Self::approximate()
                }
            }
        }
        #[cfg(not(feature = "swisseph"))]
        {
            if let Some(path) = ephemeris_path {
                log::warn!(
                    "Ephemeris: ignoring {}, built without the swisseph feature",
                    path.display()
                );
            }
            log::info!("Ephemeris: using mean-motion model");
            Self::approximate()
        }
    }

    /// Whether a precise source is installed
    pub fn is_precise(&self) -> bool {
        self.precise.is_some()
    }

    pub fn precise_source(&self) -> Option<&dyn EphemerisSource> {
        self.precise.as_deref()
    }

    pub fn julian_day(&self, utc: DateTime<Utc>) -> f64 {
        julian_day(utc)
    }

    /// Position of `body` from the precise source, or from the mean-motion
    /// model when that source is missing or fails.
    pub fn body_position(&self, jd: f64, body: Body) -> BodyPosition {
        if body == Body::SouthNode {
            return south_node_from(self.body_position(jd, Body::NorthNode));
        }
        if let Some(source) = &self.precise {
            match source.body_position(jd, body) {
                Ok(raw) => return BodyPosition::from_raw(body, raw, false),
                Err(e) => log::warn!("Ephemeris: {} failed, falling back: {}", source.name(), e),
            }
        }
        BodyPosition::from_raw(body, self.fallback.position(jd, body), true)
    }

    /// Positions for `bodies`, in order.
    pub fn positions(&self, jd: f64, bodies: &[Body]) -> Vec<BodyPosition> {
        bodies
            .iter()
            .map(|body| self.body_position(jd, *body))
            .collect()
    }
}

impl Default for Ephemeris {
    fn default() -> Self {
        Self::approximate()
    }
}

impl std::fmt::Debug for Ephemeris {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ephemeris")
            .field("precise", &self.precise.as_ref().map(|s| s.name()))
            .finish()
    }
}

fn south_node_from(north: BodyPosition) -> BodyPosition {
    BodyPosition::from_raw(
        Body::SouthNode,
        RawPosition {
            longitude: normalize_degrees(north.longitude + 180.0),
            latitude: -north.latitude,
            distance: north.distance,
            speed_longitude: north.speed_longitude,
            speed_latitude: -north.speed_latitude,
        },
        north.approximate,
    )
}
