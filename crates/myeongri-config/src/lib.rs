use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings consumed by the chart kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// House system name, e.g. "placidus", "equal", "whole_sign".
    #[serde(default = "default_house_system")]
    pub house_system: String,
    #[serde(default)]
    pub include_minor_aspects: bool,
    /// Shift clock readings through the location's standard-time history.
    #[serde(default = "default_true")]
    pub apply_historical_timezone: bool,
    #[serde(default = "default_location")]
    pub default_location: String,
    /// Directory holding Swiss Ephemeris data files.
    #[serde(default)]
    pub ephemeris_path: Option<PathBuf>,
    #[serde(default = "default_transit_aspect_limit")]
    pub transit_aspect_limit: usize,
    /// Maximum orb overrides keyed by aspect name.
    #[serde(default)]
    pub orbs: BTreeMap<String, f64>,
}

fn default_house_system() -> String {
    "placidus".to_string()
}

fn default_true() -> bool {
    true
}

fn default_location() -> String {
    "seoul".to_string()
}

fn default_transit_aspect_limit() -> usize {
    15
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            house_system: default_house_system(),
            include_minor_aspects: false,
            apply_historical_timezone: true,
            default_location: default_location(),
            ephemeris_path: None,
            transit_aspect_limit: default_transit_aspect_limit(),
            orbs: BTreeMap::new(),
        }
    }
}

impl KernelConfig {
    /// Set the default house system by name
    pub fn with_house_system(mut self, system: impl Into<String>) -> Self {
        self.house_system = system.into();
        self
    }

    /// Include or exclude the minor aspects
    pub fn with_minor_aspects(mut self, include: bool) -> Self {
        self.include_minor_aspects = include;
        self
    }

    /// Enable or disable historical time-zone correction
    pub fn with_historical_timezone(mut self, apply: bool) -> Self {
        self.apply_historical_timezone = apply;
        self
    }

    /// Override the orb of one aspect
    pub fn with_orb(mut self, aspect: impl Into<String>, orb: f64) -> Self {
        self.orbs.insert(aspect.into(), orb);
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    kernel: Option<KernelConfig>,
}

/// Try the usual relative locations of `configs/kernel.toml`.
pub fn read_kernel_config_text() -> anyhow::Result<String> {
    let paths = ["configs/kernel.toml", "../../configs/kernel.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load kernel.toml from {:?}", paths);
}

/// Parse the `[kernel]` table of a TOML document. A document without the
/// table yields the defaults.
pub fn parse_kernel_config(text: &str) -> anyhow::Result<KernelConfig> {
    let root: RootConfigToml = toml::from_str(text)
        .map_err(|e| anyhow::anyhow!("Failed to parse kernel settings: {e}"))?;
    let cfg = root.kernel.unwrap_or_default();
    validate_kernel_config(&cfg)?;
    Ok(cfg)
}

/// Load a kernel configuration from a TOML file
pub fn load_kernel_config(path: &Path) -> anyhow::Result<KernelConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
    parse_kernel_config(&text)
}

/// Load `configs/kernel.toml` if one can be found, defaults otherwise.
/// A file that exists but does not parse is still an error.
pub fn load_kernel_config_or_default() -> anyhow::Result<KernelConfig> {
    match read_kernel_config_text() {
        Ok(text) => parse_kernel_config(&text),
        Err(_) => Ok(KernelConfig::default()),
    }
}

fn validate_kernel_config(cfg: &KernelConfig) -> anyhow::Result<()> {
    for (name, orb) in &cfg.orbs {
        if !orb.is_finite() || *orb < 0.0 {
            anyhow::bail!("kernel.orbs.{name} must be a non-negative number, got {orb}");
        }
    }
    if cfg.transit_aspect_limit == 0 {
        anyhow::bail!("kernel.transit_aspect_limit must be at least 1");
    }
    Ok(())
}
