//! Readings derived from the pillars alone: the ten gods (십신), the
//! favourable element (용신) and day-stem compatibility (궁합).

use crate::saju::luck::ElementBalance;
use crate::saju::types::{Element, HeavenlyStem, Pillar};
use serde::{Deserialize, Serialize};

/// Score two unrelated day stems start from.
pub const BASE_COMPATIBILITY: i32 = 70;

/// How a stem's element relates to the day master, grouped in pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenGod {
    /// Same element (비견/겁재).
    Companion,
    /// Feeds the day master (정인/편인).
    Resource,
    /// Fed by the day master (식신/상관).
    Output,
    /// Overcomes the day master (정관/편관).
    Officer,
    /// Overcome by the day master (정재/편재).
    Wealth,
}

impl TenGod {
    /// Relation of `other` to `day_master`
    pub fn classify(day_master: Element, other: Element) -> Self {
        if other == day_master {
            TenGod::Companion
        } else if other.generates() == day_master {
            TenGod::Resource
        } else if day_master.generates() == other {
            TenGod::Output
        } else if other.controls() == day_master {
            TenGod::Officer
        } else {
            TenGod::Wealth
        }
    }

    pub fn korean(&self) -> &'static str {
        match self {
            TenGod::Companion => "비겁",
            TenGod::Resource => "인성",
            TenGod::Output => "식상",
            TenGod::Officer => "관성",
            TenGod::Wealth => "재성",
        }
    }
}

/// Pillar a stem was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StemPosition {
    Year,
    Month,
    Hour,
}

/// One stem read against the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StemGod {
    pub position: StemPosition,
    pub stem: HeavenlyStem,
    pub god: TenGod,
}

/// Ten gods of the year, month and (when known) hour stems.
pub fn ten_gods(
    day: &Pillar,
    year: &Pillar,
    month: &Pillar,
    hour: Option<&Pillar>,
) -> Vec<StemGod> {
    let day_master = day.stem_element;
    [
        (StemPosition::Year, Some(year)),
        (StemPosition::Month, Some(month)),
        (StemPosition::Hour, hour),
    ]
    .into_iter()
    .filter_map(|(position, pillar)| {
        pillar.map(|p| StemGod {
            position,
            stem: p.stem,
            god: TenGod::classify(day_master, p.stem_element),
        })
    })
    .collect()
}

/// Favourable (용신) and unfavourable (기신) elements for a day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavourableElements {
    pub day_master: Element,
    pub day_master_strong: bool,
    pub favourable: Element,
    pub unfavourable: Element,
}

impl FavourableElements {
    /// A day master holding at least 1.5 times an even share of the chart
    /// is strong and wants draining; a weaker one wants feeding.
    pub fn from_balance(day_master: Element, balance: &ElementBalance) -> Self {
        let strong = balance.count(day_master) * 10 >= balance.total() * 3;
        let favourable = if strong {
            day_master.generates()
        } else {
            day_master.generated_by()
        };
        Self {
            day_master,
            day_master_strong: strong,
            favourable,
            unfavourable: favourable.controls(),
        }
    }
}

/// Relations between two day stems that move the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityFactor {
    /// One day stem feeds the other.
    Generating,
    SameElement,
    /// One day stem overcomes the other.
    Controlling,
}

impl CompatibilityFactor {
    fn adjustment(&self) -> i32 {
        match self {
            CompatibilityFactor::Generating => 15,
            CompatibilityFactor::SameElement => 10,
            CompatibilityFactor::Controlling => -10,
        }
    }
}

/// Day-stem compatibility of two charts, scored 0 to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    pub score: u8,
    pub first_day: Pillar,
    pub second_day: Pillar,
    pub factors: Vec<CompatibilityFactor>,
}

impl Compatibility {
    /// Score two day pillars from their stems' elements
    pub fn between(first_day: &Pillar, second_day: &Pillar) -> Self {
        let (a, b) = (first_day.stem_element, second_day.stem_element);
        let mut factors = Vec::new();
        if a.generates() == b || b.generates() == a {
            factors.push(CompatibilityFactor::Generating);
        }
        if a == b {
            factors.push(CompatibilityFactor::SameElement);
        }
        if a.controls() == b || b.controls() == a {
            factors.push(CompatibilityFactor::Controlling);
        }
        let score = factors
            .iter()
            .fold(BASE_COMPATIBILITY, |score, f| score + f.adjustment())
            .clamp(0, 100);
        Self {
            score: score as u8,
            first_day: *first_day,
            second_day: *second_day,
            factors,
        }
    }

    /// At or above the base score
    pub fn is_favourable(&self) -> bool {
        self.score as i32 >= BASE_COMPATIBILITY
    }
}
