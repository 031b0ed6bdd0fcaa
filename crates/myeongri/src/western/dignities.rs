//! Essential dignities: domicile, exaltation, detriment and fall.
//!
//! Detriment is the sign opposite a domicile, fall the sign opposite the
//! exaltation. Bodies without table entries never receive a dignity.

use crate::ephemeris::types::{Body, BodyPosition, ZodiacSign};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DignityKind {
    Domicile,
    Exaltation,
    Detriment,
    Fall,
}

/// A body's dignity in the sign it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DignityRecord {
    pub body: Body,
    pub sign: ZodiacSign,
    pub kind: DignityKind,
}

/// Bodies holding each dignity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DignitySummary {
    pub domicile: Vec<Body>,
    pub exaltation: Vec<Body>,
    pub detriment: Vec<Body>,
    pub fall: Vec<Body>,
}

impl DignitySummary {
    /// Tally `records` by kind
    pub fn from_records(records: &[DignityRecord]) -> Self {
        let mut summary = Self::default();
        for record in records {
            let bucket = match record.kind {
                DignityKind::Domicile => &mut summary.domicile,
                DignityKind::Exaltation => &mut summary.exaltation,
                DignityKind::Detriment => &mut summary.detriment,
                DignityKind::Fall => &mut summary.fall,
            };
            bucket.push(record.body);
        }
        summary
    }
}

/// Signs `body` rules
pub fn domiciles(body: Body) -> &'static [ZodiacSign] {
    use ZodiacSign::*;
    match body {
        Body::Sun => &[Leo],
        Body::Moon => &[Cancer],
        Body::Mercury => &[Gemini, Virgo],
        Body::Venus => &[Taurus, Libra],
        Body::Mars => &[Aries, Scorpio],
        Body::Jupiter => &[Sagittarius, Pisces],
        Body::Saturn => &[Capricorn, Aquarius],
        Body::Uranus => &[Aquarius],
        Body::Neptune => &[Pisces],
        Body::Pluto => &[Scorpio],
        Body::NorthNode | Body::SouthNode | Body::Chiron => &[],
    }
}

/// Classical exaltations; the outer planets have none.
pub fn exaltation(body: Body) -> Option<ZodiacSign> {
    match body {
        Body::Sun => Some(ZodiacSign::Aries),
        Body::Moon => Some(ZodiacSign::Taurus),
        Body::Mercury => Some(ZodiacSign::Virgo),
        Body::Venus => Some(ZodiacSign::Pisces),
        Body::Mars => Some(ZodiacSign::Capricorn),
        Body::Jupiter => Some(ZodiacSign::Cancer),
        Body::Saturn => Some(ZodiacSign::Libra),
        _ => None,
    }
}

/// Classifies bodies by essential dignity.
#[derive(Debug, Clone, Copy, Default)]
pub struct DignityClassifier;

impl DignityClassifier {
    /// Create a new dignity classifier
    pub fn new() -> Self {
        Self
    }

    /// Every dignity `body` holds in `sign`, possibly none.
    pub fn classify(&self, body: Body, sign: ZodiacSign) -> Vec<DignityRecord> {
        let record = |kind| DignityRecord { body, sign, kind };
        let mut records = Vec::new();
        let homes = domiciles(body);
        if homes.contains(&sign) {
            records.push(record(DignityKind::Domicile));
        }
        if homes.iter().any(|home| home.opposite() == sign) {
            records.push(record(DignityKind::Detriment));
        }
        if let Some(exalted) = exaltation(body) {
            if exalted == sign {
                records.push(record(DignityKind::Exaltation));
            }
            if exalted.opposite() == sign {
                records.push(record(DignityKind::Fall));
            }
        }
        records
    }

    /// Dignity of each position, skipping bodies with none
    pub fn classify_positions(&self, positions: &[BodyPosition]) -> Vec<DignityRecord> {
        positions
            .iter()
            .flat_map(|p| self.classify(p.body, p.sign))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(body: Body, sign: ZodiacSign) -> Vec<DignityKind> {
        DignityClassifier
            .classify(body, sign)
            .into_iter()
            .map(|r| r.kind)
            .collect()
    }

    #[test]
    fn test_sun() {
        assert_eq!(kinds(Body::Sun, ZodiacSign::Leo), vec![DignityKind::Domicile]);
        assert_eq!(kinds(Body::Sun, ZodiacSign::Aquarius), vec![DignityKind::Detriment]);
        assert_eq!(kinds(Body::Sun, ZodiacSign::Aries), vec![DignityKind::Exaltation]);
        assert_eq!(kinds(Body::Sun, ZodiacSign::Libra), vec![DignityKind::Fall]);
        assert!(kinds(Body::Sun, ZodiacSign::Gemini).is_empty());
    }

    #[test]
    fn test_mercury_in_virgo_holds_two_dignities() {
        assert_eq!(
            kinds(Body::Mercury, ZodiacSign::Virgo),
            vec![DignityKind::Domicile, DignityKind::Exaltation]
        );
        assert_eq!(
            kinds(Body::Mercury, ZodiacSign::Pisces),
            vec![DignityKind::Detriment, DignityKind::Fall]
        );
    }

    #[test]
    fn test_outer_planets_have_no_exaltation() {
        assert_eq!(kinds(Body::Pluto, ZodiacSign::Scorpio), vec![DignityKind::Domicile]);
        assert_eq!(kinds(Body::Pluto, ZodiacSign::Taurus), vec![DignityKind::Detriment]);
        for sign in 0..12 {
            let sign = ZodiacSign::from_index(sign);
            assert!(!kinds(Body::Neptune, sign).contains(&DignityKind::Exaltation));
            assert!(!kinds(Body::Uranus, sign).contains(&DignityKind::Fall));
        }
    }

    #[test]
    fn test_nodes_have_no_dignities() {
        for sign in 0..12 {
            assert!(kinds(Body::NorthNode, ZodiacSign::from_index(sign)).is_empty());
        }
    }

    #[test]
    fn test_summary_groups_by_kind() {
        let records = [
            DignityRecord {
                body: Body::Sun,
                sign: ZodiacSign::Leo,
                kind: DignityKind::Domicile,
            },
            DignityRecord {
                body: Body::Moon,
                sign: ZodiacSign::Scorpio,
                kind: DignityKind::Fall,
            },
        ];
        let summary = DignitySummary::from_records(&records);
        assert_eq!(summary.domicile, vec![Body::Sun]);
        assert_eq!(summary.fall, vec![Body::Moon]);
        assert!(summary.exaltation.is_empty());
    }
}
