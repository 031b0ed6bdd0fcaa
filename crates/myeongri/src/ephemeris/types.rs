use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Bodies a chart can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
    Chiron,
}

impl Body {
    pub const ALL: [Body; 13] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
        Body::NorthNode,
        Body::SouthNode,
        Body::Chiron,
    ];

    /// The ten bodies every chart carries by default.
    pub const PLANETS: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::NorthNode => "north_node",
            Body::SouthNode => "south_node",
            Body::Chiron => "chiron",
        }
    }

    /// Parse a list of names, dropping the ones that are not bodies.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Vec<Body> {
        let mut bodies = Vec::new();
        for name in names {
            match name.as_ref().parse::<Body>() {
                Ok(body) if !bodies.contains(&body) => bodies.push(body),
                Ok(_) => {}
                Err(e) => log::debug!("Body::parse_list: skipping {}", e),
            }
        }
        bodies
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized body name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBody(pub String);

impl fmt::Display for UnknownBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown body '{}'", self.0)
    }
}

impl std::error::Error for UnknownBody {}

impl FromStr for Body {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "true_node" | "node" | "rahu" => return Ok(Body::NorthNode),
            "ketu" => return Ok(Body::SouthNode),
            _ => {}
        }
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.name() == key)
            .ok_or_else(|| UnknownBody(s.to_string()))
    }
}

/// The twelve tropical signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    pub fn from_index(index: usize) -> Self {
        SIGNS[index % 12]
    }

    /// Sign holding `longitude`
    pub fn from_longitude(longitude: f64) -> Self {
        Self::from_index((normalize_degrees(longitude) / 30.0) as usize)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The sign six places away.
    pub fn opposite(&self) -> Self {
        Self::from_index(self.index() + 6)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }
}

/// What an ephemeris source reports for one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    pub longitude: f64,
    pub latitude: f64,
    /// Distance in AU.
    pub distance: f64,
    /// Degrees per day.
    pub speed_longitude: f64,
    pub speed_latitude: f64,
}

/// A body's position with its derived zodiac placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Ecliptic longitude in [0, 360).
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
    pub speed_longitude: f64,
    pub speed_latitude: f64,
    pub sign: ZodiacSign,
    /// Degrees into the sign, [0, 30).
    pub sign_degree: f64,
    /// `sign_degree` as d°m's".
    pub dms: String,
    pub retrograde: bool,
    /// Produced by the mean-motion model rather than a precise source.
    pub approximate: bool,
}

impl BodyPosition {
    /// Derive sign, in-sign degree and retrograde flag from raw coordinates
    pub fn from_raw(body: Body, raw: RawPosition, approximate: bool) -> Self {
        let longitude = normalize_degrees(raw.longitude);
        let sign_degree = longitude % 30.0;
        Self {
            body,
            longitude,
            latitude: raw.latitude,
            distance: raw.distance,
            speed_longitude: raw.speed_longitude,
            speed_latitude: raw.speed_latitude,
            sign: ZodiacSign::from_longitude(longitude),
            sign_degree,
            dms: format_dms(sign_degree),
            retrograde: raw.speed_longitude < 0.0,
            approximate,
        }
    }
}

/// Wrap an angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Format degrees as d°m's", rounded to the second.
pub fn format_dms(degrees: f64) -> String {
    let total_seconds = (degrees.abs() * 3600.0).round() as i64;
    let sign = if degrees < 0.0 && total_seconds > 0 { "-" } else { "" };
    let d = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{}{}°{}'{}\"", sign, d, m, s)
}
