use crate::aspects::types::{AspectKind, AspectMatch, AspectRecord, AspectStrength, AspectTable};
use crate::ephemeris::types::BodyPosition;
use std::cmp::Ordering;

/// Days to project forward when deciding applying vs separating.
const PROJECTION_STEP: f64 = 0.001;

/// Relative speeds below this are treated as stationary.
const STATIONARY_SPEED: f64 = 1e-9;

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    table: AspectTable,
}

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new(table: AspectTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &AspectTable {
        &self.table
    }

    /// Aspects between every unordered pair in `bodies`, tightest first.
    pub fn compute_aspects(&self, bodies: &[BodyPosition]) -> Vec<AspectRecord> {
        let mut records = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                if let Some(record) = self.aspect_between(&bodies[i], &bodies[j]) {
                    records.push(record);
                }
            }
        }
        sort_by_orb(&mut records);
        records
    }

    /// Aspects from each body of `moving` to each body of `fixed`, tightest
    /// first. A body may aspect its own counterpart in the other set.
    pub fn compute_cross_aspects(
        &self,
        moving: &[BodyPosition],
        fixed: &[BodyPosition],
    ) -> Vec<AspectRecord> {
        let mut records: Vec<AspectRecord> = moving
            .iter()
            .flat_map(|a| fixed.iter().filter_map(move |b| self.aspect_between(a, b)))
            .collect();
        sort_by_orb(&mut records);
        records
    }

    /// Aspect between two positioned bodies, if any
    pub fn aspect_between(&self, a: &BodyPosition, b: &BodyPosition) -> Option<AspectRecord> {
        self.calculate_aspect(a.longitude, b.longitude, a.speed_longitude, b.speed_longitude)
            .map(|aspect| AspectRecord {
                first: a.body,
                second: b.body,
                aspect,
            })
    }

    /// Aspect between two longitudes. When several kinds are within orb the
    /// tightest wins; equal orbs go to the kind listed first.
    pub fn calculate_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
    ) -> Option<AspectMatch> {
        let separation = angular_separation(lon1, lon2);

        let mut best: Option<(AspectKind, f64, f64)> = None;
        for (kind, max_orb) in self.table.entries() {
            let orb = (separation - kind.angle()).abs();
            if orb > *max_orb {
                continue;
            }
            if best.map_or(true, |(_, best_orb, _)| orb < best_orb) {
                best = Some((*kind, orb, *max_orb));
            }
        }

        let (kind, orb, max_orb) = best?;
        Some(AspectMatch {
            kind,
            exact_angle: kind.angle(),
            separation,
            orb,
            applying: self.is_aspect_applying(lon1, lon2, speed1, speed2, kind.angle()),
            strength: AspectStrength::from_orb(orb, max_orb),
        })
    }

    /// Applying when the separation is moving toward the exact angle.
    pub fn is_aspect_applying(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        aspect_angle: f64,
    ) -> bool {
        let current_angle = angular_separation(lon1, lon2);
        let relative_speed = speed1 - speed2;

        // Nothing moves: only the gap itself is left to judge by
        if relative_speed.abs() < STATIONARY_SPEED {
            return current_angle < aspect_angle;
        }

        let current_distance = (current_angle - aspect_angle).abs();
        let future_angle = angular_separation(
            lon1 + speed1 * PROJECTION_STEP,
            lon2 + speed2 * PROJECTION_STEP,
        );
        let future_distance = (future_angle - aspect_angle).abs();

        future_distance < current_distance
    }
}

/// Smallest angle between two longitudes, [0, 180].
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw = (lon1 - lon2).rem_euclid(360.0);
    if raw > 180.0 {
        360.0 - raw
    } else {
        raw
    }
}

fn sort_by_orb(records: &mut [AspectRecord]) {
    records.sort_by(|a, b| {
        a.aspect
            .orb
            .partial_cmp(&b.aspect.orb)
            .unwrap_or(Ordering::Equal)
    });
}
