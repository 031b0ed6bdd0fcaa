pub mod analysis;
pub mod calendar;
pub mod chart;
pub mod luck;
pub mod solar_terms;
pub mod types;

pub use analysis::{
    ten_gods, Compatibility, CompatibilityFactor, FavourableElements, StemGod, StemPosition, TenGod,
};
pub use calendar::{FourPillars, SexagenaryCalendar, DAY_EPOCH};
pub use chart::{CalendarKind, SajuCalculator, SajuChart, SajuRequest};
pub use luck::{ElementBalance, Gender, LuckCycle, LuckDirection, LuckPeriod};
pub use solar_terms::{SolarTerm, SolarTermEngine, SolarTermTable};
pub use types::{EarthlyBranch, Element, HeavenlyStem, Pillar, Polarity};
