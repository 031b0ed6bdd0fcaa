//! House angles from sidereal time and spherical trigonometry.
//!
//! Equal, whole-sign and porphyry cusps follow exactly from the angles.
//! Every other system is approximated by equal houses and flagged.

use crate::ephemeris::mean_motion::J2000;
use crate::ephemeris::types::normalize_degrees;
use crate::houses::types::{arc_forward, HouseCusps, HouseSystem, RawHouses};

/// Keeps tan(latitude) finite at the poles.
const MAX_LATITUDE: f64 = 89.9;

/// Greenwich mean sidereal time in degrees (IAU 1982).
pub fn gmst_degrees(jd: f64) -> f64 {
    let d = jd - J2000;
    let t = d / 36_525.0;
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Local sidereal time (the RAMC) for an east-positive longitude.
pub fn local_sidereal_degrees(jd: f64, longitude: f64) -> f64 {
    normalize_degrees(gmst_degrees(jd) + longitude)
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity(jd: f64) -> f64 {
    let t = (jd - J2000) / 36_525.0;
    23.439_291_1 - 0.013_004_2 * t - 1.64e-7 * t * t + 5.04e-7 * t * t * t
}

pub fn midheaven(ramc: f64, obliquity: f64) -> f64 {
    let (r, e) = (ramc.to_radians(), obliquity.to_radians());
    normalize_degrees(r.sin().atan2(r.cos() * e.cos()).to_degrees())
}

pub fn ascendant(ramc: f64, obliquity: f64, latitude: f64) -> f64 {
    let lat = latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let (r, e, phi) = (ramc.to_radians(), obliquity.to_radians(), lat.to_radians());
    let y = r.cos();
    let x = -(r.sin() * e.cos() + phi.tan() * e.sin());
    normalize_degrees(y.atan2(x).to_degrees())
}

/// The western point where the prime vertical meets the ecliptic: the
/// ascendant of the opposite RAMC at the co-latitude.
pub fn vertex(ramc: f64, obliquity: f64, latitude: f64) -> f64 {
    let colatitude = if latitude >= 0.0 {
        90.0 - latitude
    } else {
        -90.0 - latitude
    };
    ascendant(ramc + 180.0, obliquity, colatitude)
}

/// Thirty-degree houses from the Ascendant
pub fn equal_cusps(ascendant: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_degrees(ascendant + 30.0 * i as f64))
}

/// Thirty-degree houses from the start of the rising sign
pub fn whole_sign_cusps(ascendant: f64) -> [f64; 12] {
    let first = (normalize_degrees(ascendant) / 30.0).floor() * 30.0;
    std::array::from_fn(|i| normalize_degrees(first + 30.0 * i as f64))
}

/// Trisect each quadrant between the four angles.
pub fn porphyry_cusps(ascendant: f64, midheaven: f64) -> [f64; 12] {
    let ic = normalize_degrees(midheaven + 180.0);
    let descendant = normalize_degrees(ascendant + 180.0);
    let angles = [ascendant, ic, descendant, midheaven];
    let mut cusps = [0.0; 12];
    for (q, start) in angles.iter().enumerate() {
        let end = angles[(q + 1) % 4];
        let third = arc_forward(*start, end) / 3.0;
        for k in 0..3 {
            cusps[q * 3 + k] = normalize_degrees(start + third * k as f64);
        }
    }
    cusps
}

/// Houses without a precise ephemeris.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticHouses;

impl AnalyticHouses {
    /// Cusps for `system` at `jd`; unsupported systems come back as equal
    /// houses
    pub fn compute(
        &self,
        jd: f64,
        latitude: f64,
        longitude: f64,
        system: HouseSystem,
    ) -> HouseCusps {
        let ramc = local_sidereal_degrees(jd, longitude);
        let obliquity = mean_obliquity(jd);
        let asc = ascendant(ramc, obliquity, latitude);
        let mc = midheaven(ramc, obliquity);
        let vx = vertex(ramc, obliquity, latitude);

        let (used, cusps) = match system {
            HouseSystem::Equal => (HouseSystem::Equal, equal_cusps(asc)),
            HouseSystem::WholeSign => (HouseSystem::WholeSign, whole_sign_cusps(asc)),
            HouseSystem::Porphyry => (HouseSystem::Porphyry, porphyry_cusps(asc, mc)),
            other => {
                log::debug!(
                    "AnalyticHouses: {} needs a precise ephemeris, using equal houses",
                    other.name()
                );
                (HouseSystem::Equal, equal_cusps(asc))
            }
        };

        HouseCusps::from_raw(
            system,
            used,
            RawHouses {
                cusps,
                ascendant: asc,
                midheaven: mc,
                vertex: vx,
            },
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_equal_cusps_from_fifteen_degrees() {
        let cusps = equal_cusps(15.0);
        for (i, cusp) in cusps.iter().enumerate() {
            assert!((cusp - (15.0 + 30.0 * i as f64)).abs() < EPS);
        }
    }

    #[test]
    fn test_whole_sign_starts_at_sign() {
        let cusps = whole_sign_cusps(47.3);
        assert_eq!(cusps[0], 30.0);
        assert_eq!(cusps[11], 0.0);
    }

    #[test]
    fn test_angles_on_the_equator() {
        // 0° Aries culminating at the equator rises 0° Cancer
        assert!((midheaven(0.0, 23.44) - 0.0).abs() < EPS);
        assert!((ascendant(0.0, 23.44, 0.0) - 90.0).abs() < EPS);
        assert!((midheaven(90.0, 23.44) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_ascendant_at_mid_latitude() {
        let asc = ascendant(0.0, 23.44, 45.0);
        assert!(asc > 100.0 && asc < 120.0, "asc = {}", asc);
    }

    #[test]
    fn test_vertex_in_western_half() {
        let asc = ascendant(0.0, 23.44, 45.0);
        let vx = vertex(0.0, 23.44, 45.0);
        let from_descendant = arc_forward(vx, normalize_degrees(asc + 180.0));
        assert!(from_descendant < 90.0 || from_descendant > 270.0);
    }

    #[test]
    fn test_porphyry_trisects_quadrants() {
        let cusps = porphyry_cusps(100.0, 10.0);
        assert!((cusps[0] - 100.0).abs() < EPS);
        assert!((cusps[3] - 190.0).abs() < EPS);
        assert!((cusps[6] - 280.0).abs() < EPS);
        assert!((cusps[9] - 10.0).abs() < EPS);
        assert!((cusps[1] - 130.0).abs() < EPS);
        assert!((cusps[10] - 40.0).abs() < EPS);
    }

    #[test]
    fn test_gmst_at_j2000() {
        assert!((gmst_degrees(J2000) - 280.460_618_37).abs() < 1e-6);
    }

    #[test]
    fn test_unsupported_system_is_flagged() {
        let houses = AnalyticHouses.compute(J2000, 37.5665, 126.978, HouseSystem::Koch);
        assert_eq!(houses.requested, HouseSystem::Koch);
        assert_eq!(houses.system, HouseSystem::Equal);
        assert!(houses.approximate);
        assert!((houses.cusps[0] - houses.ascendant).abs() < EPS);
    }
}
