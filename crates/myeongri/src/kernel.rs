//! Entry point tying the calendar and astrology engines to one configuration.

use crate::aspects::{AspectCalculator, AspectTable};
use crate::chart::{NatalCalculator, NatalChart, NatalRequest, TransitCalculator, TransitReport};
use crate::ephemeris::Ephemeris;
use crate::error::Result;
use crate::houses::HouseSystem;
use crate::lunar::{LunarCalendar, TableLunarCalendar};
use crate::saju::{Compatibility, SajuCalculator, SajuChart, SajuRequest};
use crate::time::TimeNormalizer;
use chrono::{DateTime, Utc};
use myeongri_config::KernelConfig;

/// Calendar and astrology engines sharing one configuration.
///
/// Calculations take `&self`, so a kernel can be shared across threads.
pub struct Kernel {
    config: KernelConfig,
    normalizer: TimeNormalizer,
    saju: SajuCalculator,
    lunar: Box<dyn LunarCalendar>,
    ephemeris: Ephemeris,
    natal: NatalCalculator,
    transit: TransitCalculator,
    house_system: HouseSystem,
}

impl Kernel {
    /// Create a kernel, probing for a precise ephemeris
    pub fn new(config: KernelConfig) -> Self {
        let normalizer =
            TimeNormalizer::new(&config.default_location, config.apply_historical_timezone);
        let ephemeris = Ephemeris::probe(config.ephemeris_path.clone());
        let aspects = AspectCalculator::new(AspectTable::from_config(&config));
        let house_system = HouseSystem::resolve(&config.house_system);
        log::info!(
            "Kernel: houses {}, minor aspects {}, precise ephemeris {}",
            house_system.name(),
            config.include_minor_aspects,
            ephemeris.is_precise()
        );
        Self {
            normalizer,
            saju: SajuCalculator::default(),
            lunar: Box::new(TableLunarCalendar::new()),
            ephemeris,
            natal: NatalCalculator::new(aspects),
            transit: TransitCalculator,
            house_system,
            config,
        }
    }

    /// Create a kernel from the default configuration
    pub fn with_defaults() -> Self {
        Self::new(KernelConfig::default())
    }

    /// Replace the lunar calendar
    pub fn with_lunar_calendar(mut self, lunar: Box<dyn LunarCalendar>) -> Self {
        self.lunar = lunar;
        self
    }

    /// Replace the ephemeris
    pub fn with_ephemeris(mut self, ephemeris: Ephemeris) -> Self {
        self.ephemeris = ephemeris;
        self
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &TimeNormalizer {
        &self.normalizer
    }

    pub fn ephemeris(&self) -> &Ephemeris {
        &self.ephemeris
    }

    pub fn lunar_calendar(&self) -> &dyn LunarCalendar {
        self.lunar.as_ref()
    }

    pub fn aspect_calculator(&self) -> &AspectCalculator {
        self.natal.aspects()
    }

    /// House system used when a request names none
    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    /// Four-pillar chart for `request`
    pub fn compute_saju_chart(&self, request: &SajuRequest) -> Result<SajuChart> {
        self.saju
            .compute(request, &self.normalizer, self.lunar.as_ref())
    }

    /// Day-stem compatibility of two people, each charted in full first.
    pub fn compute_compatibility(
        &self,
        first: &SajuRequest,
        second: &SajuRequest,
    ) -> Result<Compatibility> {
        let first = self.compute_saju_chart(first)?;
        let second = self.compute_saju_chart(second)?;
        let result = first.compatibility_with(&second);
        log::debug!(
            "Kernel: compatibility {} / {} scored {}",
            first.day.korean(),
            second.day.korean(),
            result.score
        );
        Ok(result)
    }

    /// Western natal chart for `request`
    pub fn compute_natal_chart(&self, request: &NatalRequest) -> Result<NatalChart> {
        self.natal
            .compute(request, &self.normalizer, &self.ephemeris, self.house_system)
    }

    /// Transits to `natal` at `at`, keeping the configured number of
    /// tightest aspects.
    pub fn compute_transit(&self, natal: &NatalChart, at: DateTime<Utc>) -> TransitReport {
        self.transit.compute(
            natal,
            at,
            &self.ephemeris,
            self.natal.aspects(),
            self.config.transit_aspect_limit,
        )
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("config", &self.config)
            .field("ephemeris", &self.ephemeris)
            .field("lunar_available", &self.lunar.is_available())
            .finish()
    }
}
