use crate::ephemeris::types::Body;
use myeongri_config::KernelConfig;
use serde::{Deserialize, Serialize};

/// Aspects the calculator recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    Quincunx,
    SemiSextile,
    SemiSquare,
    Sesquiquadrate,
}

impl AspectKind {
    /// Major aspects in priority order.
    pub const MAJOR: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    pub const MINOR: [AspectKind; 4] = [
        AspectKind::Quincunx,
        AspectKind::SemiSextile,
        AspectKind::SemiSquare,
        AspectKind::Sesquiquadrate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
            AspectKind::Quincunx => "quincunx",
            AspectKind::SemiSextile => "semi_sextile",
            AspectKind::SemiSquare => "semi_square",
            AspectKind::Sesquiquadrate => "sesquiquadrate",
        }
    }

    /// Parse an aspect name
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.trim().to_lowercase().replace(['-', ' '], "_");
        Self::MAJOR
            .iter()
            .chain(Self::MINOR.iter())
            .copied()
            .find(|k| k.name() == key)
    }

    /// Defining angle in degrees.
    pub fn angle(&self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
            AspectKind::Quincunx => 150.0,
            AspectKind::SemiSextile => 30.0,
            AspectKind::SemiSquare => 45.0,
            AspectKind::Sesquiquadrate => 135.0,
        }
    }

    /// Orb used when the configuration sets none
    pub fn default_orb(&self) -> f64 {
        match self {
            AspectKind::Conjunction
            | AspectKind::Square
            | AspectKind::Trine
            | AspectKind::Opposition => 8.0,
            AspectKind::Sextile => 6.0,
            AspectKind::Quincunx => 3.0,
            AspectKind::SemiSextile | AspectKind::SemiSquare | AspectKind::Sesquiquadrate => 2.0,
        }
    }

    pub fn is_major(&self) -> bool {
        Self::MAJOR.contains(self)
    }
}

/// How tight an aspect is relative to its maximum orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectStrength {
    Exact,
    Strong,
    Moderate,
    Weak,
}

impl AspectStrength {
    /// Strength band of `orb` within `max_orb`
    pub fn from_orb(orb: f64, max_orb: f64) -> Self {
        let ratio = if max_orb > 0.0 { orb / max_orb } else { 0.0 };
        if ratio <= 0.25 {
            AspectStrength::Exact
        } else if ratio <= 0.5 {
            AspectStrength::Strong
        } else if ratio <= 0.75 {
            AspectStrength::Moderate
        } else {
            AspectStrength::Weak
        }
    }
}

/// Aspect kinds to look for, in priority order, with their maximum orbs.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectTable {
    entries: Vec<(AspectKind, f64)>,
}

impl AspectTable {
    /// Table with default orbs
    pub fn new(include_minor: bool) -> Self {
        let kinds = AspectKind::MAJOR
            .iter()
            .chain(AspectKind::MINOR.iter().filter(|_| include_minor));
        Self {
            entries: kinds.map(|k| (*k, k.default_orb())).collect(),
        }
    }

    /// Default table with the configured minor-aspect switch and orb
    /// overrides. Override names that are not aspects are ignored.
    pub fn from_config(config: &KernelConfig) -> Self {
        let mut table = Self::new(config.include_minor_aspects);
        for (name, orb) in &config.orbs {
            match AspectKind::from_name(name) {
                Some(kind) => table = table.with_orb(kind, *orb),
                None => log::debug!("AspectTable: ignoring orb for unknown aspect '{}'", name),
            }
        }
        table
    }

    /// Replace the maximum orb of `kind` if it is in the table.
    pub fn with_orb(mut self, kind: AspectKind, orb: f64) -> Self {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = orb;
        }
        self
    }

    pub fn entries(&self) -> &[(AspectKind, f64)] {
        &self.entries
    }

    /// Orb of `kind`, or `None` when it is not enabled
    pub fn max_orb(&self, kind: AspectKind) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, orb)| *orb)
    }
}

impl Default for AspectTable {
    fn default() -> Self {
        Self::new(false)
    }
}

/// The aspect found between two longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub kind: AspectKind,
    pub exact_angle: f64,
    /// Angular separation, [0, 180].
    pub separation: f64,
    /// |separation - exact_angle|
    pub orb: f64,
    pub applying: bool,
    pub strength: AspectStrength,
}

/// An aspect between two named bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectRecord {
    pub first: Body,
    pub second: Body,
    #[serde(flatten)]
    pub aspect: AspectMatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_grades() {
        assert_eq!(AspectStrength::from_orb(0.0, 8.0), AspectStrength::Exact);
        assert_eq!(AspectStrength::from_orb(2.0, 8.0), AspectStrength::Exact);
        assert_eq!(AspectStrength::from_orb(3.0, 8.0), AspectStrength::Strong);
        assert_eq!(AspectStrength::from_orb(6.0, 8.0), AspectStrength::Moderate);
        assert_eq!(AspectStrength::from_orb(7.9, 8.0), AspectStrength::Weak);
    }

    #[test]
    fn test_table_from_config() {
        let config = KernelConfig::default()
            .with_orb("trine", 5.0)
            .with_orb("quincunx", 4.0)
            .with_orb("biquintile", 1.0);
        let table = AspectTable::from_config(&config);
        assert_eq!(table.entries().len(), 5);
        assert_eq!(table.max_orb(AspectKind::Trine), Some(5.0));
        assert_eq!(table.max_orb(AspectKind::Quincunx), None);

        let table = AspectTable::from_config(&config.with_minor_aspects(true));
        assert_eq!(table.entries().len(), 9);
        assert_eq!(table.max_orb(AspectKind::Quincunx), Some(4.0));
    }

    #[test]
    fn test_names_round_trip() {
        for kind in AspectKind::MAJOR.iter().chain(AspectKind::MINOR.iter()) {
            assert_eq!(AspectKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(AspectKind::from_name("semi-square"), Some(AspectKind::SemiSquare));
    }
}
