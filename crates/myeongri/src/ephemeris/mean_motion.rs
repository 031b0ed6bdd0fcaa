//! Mean-motion fallback: every body advances uniformly from its J2000 mean
//! longitude. Total and deterministic, accurate only to tens of degrees for
//! the inner planets and for Chiron.

use crate::ephemeris::types::{normalize_degrees, Body, RawPosition};

/// Julian Day of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

/// Mean longitude at J2000, mean motion in deg/day, mean distance in AU.
fn mean_elements(body: Body) -> (f64, f64, f64) {
    match body {
        Body::Sun => (280.460, 0.985_647_4, 1.0),
        Body::Moon => (218.316, 13.176_396_6, 0.002_57),
        Body::Mercury => (252.251, 4.092_334_4, 0.387),
        Body::Venus => (181.980, 1.602_130_2, 0.723),
        Body::Mars => (355.433, 0.524_020_8, 1.524),
        Body::Jupiter => (34.351, 0.083_085_3, 5.203),
        Body::Saturn => (50.077, 0.033_444_2, 9.537),
        Body::Uranus => (314.055, 0.011_725_2, 19.19),
        Body::Neptune => (304.349, 0.005_981_9, 30.07),
        Body::Pluto => (238.929, 0.003_975_7, 39.48),
        // mean lunar node, regressing
        Body::NorthNode => (125.044_5, -0.052_953_8, 0.002_57),
        Body::SouthNode => (305.044_5, -0.052_953_8, 0.002_57),
        Body::Chiron => (216.3, 0.019_548, 13.7),
    }
}

/// Analytic model used when no precise source can answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanMotionModel;

impl MeanMotionModel {
    /// Create the fallback model
    pub fn new() -> Self {
        Self
    }

    /// Position of `body`. Speeds are the constant mean motions, so only the
    /// nodes ever read as retrograde.
    pub fn position(&self, jd: f64, body: Body) -> RawPosition {
        let (base, motion, distance) = mean_elements(body);
        let days = jd - J2000;
        RawPosition {
            longitude: normalize_degrees(base + days * motion),
            latitude: 0.0,
            distance,
            speed_longitude: motion,
            speed_latitude: 0.0,
        }
    }
}
