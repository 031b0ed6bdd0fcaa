//! Stems, branches, elements and pillars.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    pub fn korean(&self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
        }
    }

    pub fn hanja(&self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }

    /// The element this one feeds (상생): wood, fire, earth, metal, water.
    pub fn generates(&self) -> Element {
        Element::ALL[(*self as usize + 1) % 5]
    }

    /// The element this one feeds on.
    pub fn generated_by(&self) -> Element {
        Element::ALL[(*self as usize + 4) % 5]
    }

    /// The element this one overcomes (상극), two steps along the cycle.
    pub fn controls(&self) -> Element {
        Element::ALL[(*self as usize + 2) % 5]
    }
}

/// Yang or yin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    fn from_index(index: usize) -> Self {
        if index % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }
}

/// The ten heavenly stems (천간), in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeavenlyStem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

const STEMS: [HeavenlyStem; 10] = [
    HeavenlyStem::Gap,
    HeavenlyStem::Eul,
    HeavenlyStem::Byeong,
    HeavenlyStem::Jeong,
    HeavenlyStem::Mu,
    HeavenlyStem::Gi,
    HeavenlyStem::Gyeong,
    HeavenlyStem::Sin,
    HeavenlyStem::Im,
    HeavenlyStem::Gye,
];

const STEM_KOREAN: [&str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];
const STEM_HANJA: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

impl HeavenlyStem {
    pub const COUNT: usize = 10;

    /// Stem at `index` modulo 10; negative indices wrap.
    pub fn from_index(index: i64) -> Self {
        STEMS[index.rem_euclid(Self::COUNT as i64) as usize]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn korean(&self) -> &'static str {
        STEM_KOREAN[self.index()]
    }

    pub fn hanja(&self) -> &'static str {
        STEM_HANJA[self.index()]
    }

    /// Stems pair off per element: 갑을 wood, 병정 fire, and so on.
    pub fn element(&self) -> Element {
        Element::ALL[self.index() / 2]
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::from_index(self.index())
    }
}

/// The twelve earthly branches (지지), in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarthlyBranch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

const BRANCHES: [EarthlyBranch; 12] = [
    EarthlyBranch::Ja,
    EarthlyBranch::Chuk,
    EarthlyBranch::In,
    EarthlyBranch::Myo,
    EarthlyBranch::Jin,
    EarthlyBranch::Sa,
    EarthlyBranch::O,
    EarthlyBranch::Mi,
    EarthlyBranch::Sin,
    EarthlyBranch::Yu,
    EarthlyBranch::Sul,
    EarthlyBranch::Hae,
];

const BRANCH_KOREAN: [&str; 12] = [
    "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
];
const BRANCH_HANJA: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
const BRANCH_ANIMALS: [&str; 12] = [
    "쥐", "소", "호랑이", "토끼", "용", "뱀", "말", "양", "원숭이", "닭", "개", "돼지",
];
const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

impl EarthlyBranch {
    pub const COUNT: usize = 12;

    /// Branch at `index` modulo 12; negative indices wrap.
    pub fn from_index(index: i64) -> Self {
        BRANCHES[index.rem_euclid(Self::COUNT as i64) as usize]
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn korean(&self) -> &'static str {
        BRANCH_KOREAN[self.index()]
    }

    pub fn hanja(&self) -> &'static str {
        BRANCH_HANJA[self.index()]
    }

    /// Zodiac animal (띠) in Korean.
    pub fn animal(&self) -> &'static str {
        BRANCH_ANIMALS[self.index()]
    }

    /// Element of the branch's principal energy
    pub fn element(&self) -> Element {
        BRANCH_ELEMENTS[self.index()]
    }

    pub fn polarity(&self) -> Polarity {
        Polarity::from_index(self.index())
    }
}

/// One stem-branch pair with the elements of both halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pillar {
    pub stem: HeavenlyStem,
    pub branch: EarthlyBranch,
    pub stem_element: Element,
    pub branch_element: Element,
}

impl Pillar {
    /// Create a pillar, filling in both elements
    pub fn new(stem: HeavenlyStem, branch: EarthlyBranch) -> Self {
        Self {
            stem,
            branch,
            stem_element: stem.element(),
            branch_element: branch.element(),
        }
    }

    /// Pillar from stem and branch indices, each wrapped
    pub fn from_indices(stem: i64, branch: i64) -> Self {
        Self::new(HeavenlyStem::from_index(stem), EarthlyBranch::from_index(branch))
    }

    /// Position in the 60-step cycle, 0 for 갑자.
    pub fn cycle_index(&self) -> usize {
        let (s, b) = (self.stem.index(), self.branch.index());
        (0..60).find(|i| i % 10 == s && i % 12 == b).unwrap_or(0)
    }

    pub fn korean(&self) -> String {
        format!("{}{}", self.stem.korean(), self.branch.korean())
    }

    pub fn hanja(&self) -> String {
        format!("{}{}", self.stem.hanja(), self.branch.hanja())
    }

    /// Step along the cycle by `offset` pillars.
    pub fn shifted(&self, offset: i64) -> Self {
        Self::from_indices(
            self.stem.index() as i64 + offset,
            self.branch.index() as i64 + offset,
        )
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.korean(), self.hanja())
    }
}
