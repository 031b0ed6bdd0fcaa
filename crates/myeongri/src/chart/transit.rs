use crate::aspects::{AspectCalculator, AspectRecord};
use crate::chart::natal::NatalChart;
use crate::ephemeris::{BodyPosition, Ephemeris};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sky at a later instant measured against a natal chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitReport {
    pub at: DateTime<Utc>,
    pub julian_day: f64,
    pub bodies: Vec<BodyPosition>,
    /// Transit body first, natal body second; tightest first.
    pub aspects: Vec<AspectRecord>,
    pub approximate: bool,
}

/// Compares transiting positions with a natal chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitCalculator;

impl TransitCalculator {
    /// Transits of the natal chart's own bodies, keeping the `limit`
    /// tightest aspects.
    pub fn compute(
        &self,
        natal: &NatalChart,
        at: DateTime<Utc>,
        ephemeris: &Ephemeris,
        aspects: &AspectCalculator,
        limit: usize,
    ) -> TransitReport {
        let jd = ephemeris.julian_day(at);
        let natal_positions = natal.positions();
        let bodies: Vec<_> = natal_positions.iter().map(|p| p.body).collect();
        let transits = ephemeris.positions(jd, &bodies);

        let mut records = aspects.compute_cross_aspects(&transits, &natal_positions);
        records.truncate(limit);

        TransitReport {
            at,
            julian_day: jd,
            approximate: transits.iter().any(|p| p.approximate),
            bodies: transits,
            aspects: records,
        }
    }
}
