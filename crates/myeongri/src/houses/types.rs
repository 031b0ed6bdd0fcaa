use crate::ephemeris::types::normalize_degrees;
use serde::{Deserialize, Serialize};

/// Supported house systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    Placidus,
    Koch,
    Regiomontanus,
    Campanus,
    Equal,
    WholeSign,
    Porphyry,
    Alcabitius,
    Morinus,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 9] = [
        HouseSystem::Placidus,
        HouseSystem::Koch,
        HouseSystem::Regiomontanus,
        HouseSystem::Campanus,
        HouseSystem::Equal,
        HouseSystem::WholeSign,
        HouseSystem::Porphyry,
        HouseSystem::Alcabitius,
        HouseSystem::Morinus,
    ];

    /// Parse a system name or one-letter code
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.trim().to_lowercase().replace(['-', ' '], "_");
        let key = match key.as_str() {
            "wholesign" | "whole" => "whole_sign",
            other => other,
        };
        Self::ALL.iter().copied().find(|s| s.name() == key)
    }

    /// Like [`HouseSystem::from_name`], substituting Placidus for unknown names.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            log::warn!("HouseSystem: unknown house system '{}', using placidus", name);
            HouseSystem::Placidus
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            HouseSystem::Placidus => "placidus",
            HouseSystem::Koch => "koch",
            HouseSystem::Regiomontanus => "regiomontanus",
            HouseSystem::Campanus => "campanus",
            HouseSystem::Equal => "equal",
            HouseSystem::WholeSign => "whole_sign",
            HouseSystem::Porphyry => "porphyry",
            HouseSystem::Alcabitius => "alcabitius",
            HouseSystem::Morinus => "morinus",
        }
    }

    /// Swiss Ephemeris house-system letter.
    pub fn code(&self) -> u8 {
        match self {
            HouseSystem::Placidus => b'P',
            HouseSystem::Koch => b'K',
            HouseSystem::Regiomontanus => b'R',
            HouseSystem::Campanus => b'C',
            HouseSystem::Equal => b'E',
            HouseSystem::WholeSign => b'W',
            HouseSystem::Porphyry => b'O',
            HouseSystem::Alcabitius => b'B',
            HouseSystem::Morinus => b'M',
        }
    }
}

/// Cusps and angles as a source reports them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawHouses {
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
    pub vertex: f64,
}

/// Twelve cusps plus angles, tagged with the system actually used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusps {
    /// System asked for.
    pub requested: HouseSystem,
    /// System the cusps were actually divided with.
    pub system: HouseSystem,
    /// Cusp of house 1 first.
    pub cusps: [f64; 12],
    pub ascendant: f64,
    pub midheaven: f64,
    pub vertex: f64,
    pub approximate: bool,
}

impl HouseCusps {
    /// Wrap cusps from a source
    pub fn from_raw(
        requested: HouseSystem,
        system: HouseSystem,
        raw: RawHouses,
        approximate: bool,
    ) -> Self {
        Self {
            requested,
            system,
            cusps: raw.cusps.map(normalize_degrees),
            ascendant: normalize_degrees(raw.ascendant),
            midheaven: normalize_degrees(raw.midheaven),
            vertex: normalize_degrees(raw.vertex),
            approximate,
        }
    }

    /// Cusp of `house` (1-12).
    pub fn cusp(&self, house: usize) -> Option<f64> {
        house.checked_sub(1).and_then(|i| self.cusps.get(i)).copied()
    }

    /// House (1-12) holding `longitude`
    pub fn house_of(&self, longitude: f64) -> u8 {
        house_of(&self.cusps, longitude)
    }

    /// Arc covered by `house` (1-12), in degrees.
    pub fn span(&self, house: usize) -> Option<f64> {
        let i = house.checked_sub(1).filter(|i| *i < 12)?;
        Some(arc_forward(self.cusps[i], self.cusps[(i + 1) % 12]))
    }
}

/// Forward (zodiacal) arc from `from` to `to`, in [0, 360).
pub fn arc_forward(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from)
}

/// House (1-12) whose arc `[cusp[i], cusp[i+1])` holds `longitude`,
/// wrapping at 0°. Degenerate cusps that match nothing give house 1.
pub fn house_of(cusps: &[f64; 12], longitude: f64) -> u8 {
    let lon = normalize_degrees(longitude);
    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let inside = if start < end {
            start <= lon && lon < end
        } else if start > end {
            lon >= start || lon < end
        } else {
            false
        };
        if inside {
            return i as u8 + 1;
        }
    }
    1
}
