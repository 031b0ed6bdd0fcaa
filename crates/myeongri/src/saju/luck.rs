//! Ten-year luck pillars (대운) and element balance.

use crate::saju::types::{Element, Pillar, Polarity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Age at which the first luck pillar begins.
pub const LUCK_START_AGE: u32 = 5;
pub const LUCK_PERIOD_YEARS: u32 = 10;
pub const LUCK_PERIOD_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Whether luck pillars step forward or backward from the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LuckDirection {
    Forward,
    Backward,
}

impl LuckDirection {
    /// Yang years run forward for men, yin years forward for women.
    pub fn for_birth(year_polarity: Polarity, gender: Gender) -> Self {
        match (year_polarity, gender) {
            (Polarity::Yang, Gender::Male) | (Polarity::Yin, Gender::Female) => {
                LuckDirection::Forward
            }
            _ => LuckDirection::Backward,
        }
    }

    fn step(&self) -> i64 {
        match self {
            LuckDirection::Forward => 1,
            LuckDirection::Backward => -1,
        }
    }
}

/// One ten-year luck pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckPeriod {
    pub start_age: u32,
    pub end_age: u32,
    pub pillar: Pillar,
}

/// The eight luck pillars of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LuckCycle {
    pub direction: LuckDirection,
    pub periods: Vec<LuckPeriod>,
}

impl LuckCycle {
    /// Luck pillars step away from the month pillar, one per decade.
    pub fn from_birth(year: &Pillar, month: &Pillar, gender: Gender) -> Self {
        let direction = LuckDirection::for_birth(year.stem.polarity(), gender);
        let periods = (0..LUCK_PERIOD_COUNT)
            .map(|i| {
                let start_age = LUCK_START_AGE + i as u32 * LUCK_PERIOD_YEARS;
                LuckPeriod {
                    start_age,
                    end_age: start_age + LUCK_PERIOD_YEARS - 1,
                    pillar: month.shifted(direction.step() * (i as i64 + 1)),
                }
            })
            .collect();
        Self { direction, periods }
    }

    /// Period covering `age`, if any.
    pub fn period_at(&self, age: u32) -> Option<&LuckPeriod> {
        self.periods
            .iter()
            .find(|p| (p.start_age..=p.end_age).contains(&age))
    }
}

/// How often each element appears across a chart's stems and branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementBalance {
    counts: BTreeMap<Element, u32>,
}

impl ElementBalance {
    /// Count stems and branches of `pillars`
    pub fn from_pillars<'a>(pillars: impl IntoIterator<Item = &'a Pillar>) -> Self {
        let mut counts: BTreeMap<Element, u32> = Element::ALL.iter().map(|e| (*e, 0)).collect();
        for pillar in pillars {
            *counts.entry(pillar.stem_element).or_insert(0) += 1;
            *counts.entry(pillar.branch_element).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, element: Element) -> u32 {
        self.counts.get(&element).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Elements with the highest count; ties are all returned.
    pub fn dominant(&self) -> Vec<Element> {
        let max = self.counts.values().copied().max().unwrap_or(0);
        self.counts
            .iter()
            .filter(|(_, c)| **c == max && max > 0)
            .map(|(e, _)| *e)
            .collect()
    }

    /// Elements that never appear
    pub fn missing(&self) -> Vec<Element> {
        self.counts
            .iter()
            .filter(|(_, c)| **c == 0)
            .map(|(e, _)| *e)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction() {
        assert_eq!(
            LuckDirection::for_birth(Polarity::Yang, Gender::Male),
            LuckDirection::Forward
        );
        assert_eq!(
            LuckDirection::for_birth(Polarity::Yin, Gender::Male),
            LuckDirection::Backward
        );
        assert_eq!(
            LuckDirection::for_birth(Polarity::Yin, Gender::Female),
            LuckDirection::Forward
        );
    }

    #[test]
    fn test_forward_cycle_steps_from_month() {
        // 경오 year, 신사 month
        let year = Pillar::from_indices(6, 6);
        let month = Pillar::from_indices(7, 5);
        let cycle = LuckCycle::from_birth(&year, &month, Gender::Male);
        assert_eq!(cycle.periods.len(), 8);
        assert_eq!(cycle.periods[0].pillar.korean(), "임오");
        assert_eq!(cycle.periods[0].start_age, 5);
        assert_eq!(cycle.periods[7].end_age, 84);
        assert_eq!(cycle.period_at(27).unwrap().pillar.korean(), "갑신");
    }

    #[test]
    fn test_backward_cycle() {
        let year = Pillar::from_indices(6, 6);
        let month = Pillar::from_indices(7, 5);
        let cycle = LuckCycle::from_birth(&year, &month, Gender::Female);
        assert_eq!(cycle.direction, LuckDirection::Backward);
        assert_eq!(cycle.periods[0].pillar.korean(), "경진");
        assert!(cycle.period_at(2).is_none());
    }

    #[test]
    fn test_element_balance() {
        let pillars = [
            Pillar::from_indices(6, 6),
            Pillar::from_indices(7, 5),
            Pillar::from_indices(6, 4),
        ];
        let balance = ElementBalance::from_pillars(pillars.iter());
        assert_eq!(balance.total(), 6);
        assert_eq!(balance.count(Element::Metal), 3);
        assert_eq!(balance.count(Element::Fire), 2);
        assert_eq!(balance.dominant(), vec![Element::Metal]);
        assert_eq!(balance.missing(), vec![Element::Wood, Element::Water]);
    }
}
