pub mod analytic;
pub mod types;

pub use analytic::AnalyticHouses;
pub use types::{arc_forward, house_of, HouseCusps, HouseSystem, RawHouses};

use crate::ephemeris::Ephemeris;

/// Computes house cusps, preferring the precise source when one is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct HouseCalculator {
    analytic: AnalyticHouses,
}

impl HouseCalculator {
    /// Create a new house calculator
    pub fn new() -> Self {
        Self::default()
    }

    /// Cusps from the precise source when it can compute `system`, analytic
    /// cusps otherwise
    pub fn compute(
        &self,
        ephemeris: &Ephemeris,
        jd: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> HouseCusps {
        if let Some(source) = ephemeris.precise_source() {
            match source.house_cusps(jd, latitude, longitude, system) {
                Ok(raw) => return HouseCusps::from_raw(system, system, raw, false),
                Err(e) => log::warn!(
                    "HouseCalculator: {} failed, using analytic houses: {}",
                    source.name(),
                    e
                ),
            }
        }
        self.analytic.compute(jd, latitude, longitude, system)
    }
}
