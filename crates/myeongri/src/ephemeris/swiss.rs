//! Swiss Ephemeris backend.

use crate::ephemeris::provider::{EphemerisError, EphemerisSource};
use crate::ephemeris::types::{Body, RawPosition};
use crate::houses::{HouseSystem, RawHouses};
use lazy_static::lazy_static;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};
use swisseph::{AscMc, Cusp};

// swisseph keeps global state in C; one call at a time
lazy_static! {
    static ref SWISS_LOCK: Mutex<()> = Mutex::new(());
}

const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;

/// Swiss Ephemeris body codes.
fn body_code(body: Body) -> Option<i32> {
    match body {
        Body::Sun => Some(0),
        Body::Moon => Some(1),
        Body::Mercury => Some(2),
        Body::Venus => Some(3),
        Body::Mars => Some(4),
        Body::Jupiter => Some(5),
        Body::Saturn => Some(6),
        Body::Uranus => Some(7),
        Body::Neptune => Some(8),
        Body::Pluto => Some(9),
        Body::NorthNode => Some(11), // TRUE_NODE
        Body::Chiron => Some(15),
        Body::SouthNode => None,
    }
}

/// Without its data files the library answers from its Moshier model and
/// clears FLG_SWIEPH in the returned flags.
fn read_from_files(returned_flags: i32) -> bool {
    returned_flags >= 0 && returned_flags & FLG_SWIEPH != 0
}

/// Swiss Ephemeris reading `.se1` files from one data directory.
pub struct SwissEphemeris {
    path: PathBuf,
}

impl SwissEphemeris {
    /// Data directory from the argument, then `SWISS_EPHEMERIS_PATH`, then
    /// `/usr/local/share/swisseph`.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Install the Swiss Ephemeris data files or set SWISS_EPHEMERIS_PATH.".to_string(),
            });
        }

        {
            let _guard = SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            set_ephe_path(&path.to_string_lossy());
        }
        log::debug!("SwissEphemeris: data path set to {}", path.display());

        Ok(Self { path })
    }

    /// Directory handed to the library.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EphemerisSource for SwissEphemeris {
    fn name(&self) -> &'static str {
        "swiss-ephemeris"
    }

    fn body_position(&self, jd: f64, body: Body) -> Result<RawPosition, EphemerisError> {
        let code = body_code(body).ok_or(EphemerisError::UnsupportedBody {
            body,
            source_name: "swiss-ephemeris",
        })?;

        let _guard = SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let result = calc_ut(jd, code as u32, (FLG_SWIEPH | FLG_SPEED) as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                julian_day: jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        if !read_from_files(result.status as i32) {
            return Err(EphemerisError::FileNotFound {
                path: self.path.display().to_string(),
                message: format!(
                    "no data file covers {} at JD {} (returned flags {})",
                    body, jd, result.status
                ),
            });
        }

        let out = result.out;
        if !out[0].is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body,
                julian_day: jd,
                message: "non-finite longitude".to_string(),
            });
        }
        Ok(RawPosition {
            longitude: out[0],
            latitude: out[1],
            distance: out[2],
            speed_longitude: out[3],
            speed_latitude: out[4],
        })
    }

    fn house_cusps(
        &self,
        jd: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> Result<RawHouses, EphemerisError> {
        let _guard = SWISS_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let (c, a) = houses_ex(jd, FLG_SWIEPH, latitude, longitude, system.code() as i32);
        // ascmc[3] is the vertex
        let vertex = a[3];
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let raw = RawHouses {
            cusps: [
                cusps.first,
                cusps.second,
                cusps.third,
                cusps.fourth,
                cusps.fifth,
                cusps.sixth,
                cusps.seventh,
                cusps.eighth,
                cusps.ninth,
                cusps.tenth,
                cusps.eleventh,
                cusps.twelfth,
            ],
            ascendant: ascmc.ascendant,
            midheaven: ascmc.mc,
            vertex,
        };
        if raw.cusps.iter().any(|c| !c.is_finite()) || !raw.ascendant.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("{} returned non-finite cusps", system.name()),
            });
        }
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_reported() {
        let missing = PathBuf::from("/nonexistent/swisseph/data");
        assert!(matches!(
            SwissEphemeris::new(Some(missing)),
            Err(EphemerisError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_moshier_answer_is_not_precise() {
        assert!(read_from_files(FLG_SWIEPH | FLG_SPEED));
        // FLG_MOSEPH
        assert!(!read_from_files(4 | FLG_SPEED));
        assert!(!read_from_files(-1));
    }

    #[test]
    #[ignore = "needs Swiss Ephemeris data files"]
    fn test_sun_at_j2000() {
        let source = SwissEphemeris::new(None).unwrap();
        let sun = source.body_position(2_451_545.0, Body::Sun).unwrap();
        assert!((sun.longitude - 280.37).abs() < 0.1);
        assert!(sun.speed_longitude > 0.9);
    }
}
