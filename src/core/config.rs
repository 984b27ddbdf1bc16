//! Configuration management with layered hierarchy

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::inputs::{check_cacuw, check_percent, check_positive, InputError, MixInputs, Nmps};

/// Name of the per-directory config file
pub const LOCAL_CONFIG_FILE: &str = ".bailey.yaml";

/// Default plot size in pixels
pub const DEFAULT_PLOT_SIZE: (u32, u32) = (800, 600);

/// Bailey configuration with layered hierarchy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output format (text, json, yaml, md)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_format: Option<String>,

    /// Plot settings
    pub plot: PlotSettings,

    /// Default mix inputs, used where a flag is not given
    pub defaults: InputDefaults,
}

/// Plot output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Overrides for the built-in input defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputDefaults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nmps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub luw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cacuw: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcs: Option<f64>,
}

/// Invalid configured value
#[derive(Debug, Error, Diagnostic)]
#[error("invalid config value for '{key}'")]
#[diagnostic(
    code(bailey::config::invalid_value),
    help("fix the value in .bailey.yaml or the global config file")
)]
pub struct ConfigError {
    pub key: String,
    #[source]
    #[diagnostic_source]
    pub source: InputError,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let local = std::env::current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_FILE));
        Self::load_from(Self::global_config_path().as_deref(), local.as_deref())
    }

    /// Load configuration from explicit file locations plus the environment
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Self {
        // 1. Built-in defaults (already in Default impl)
        let mut config = Config::default();

        // 2. Global user config (~/.config/bailey/config.yaml)
        if let Some(layer) = global.and_then(Self::read_layer) {
            config.merge(layer);
        }

        // 3. Working-directory config (./.bailey.yaml)
        if let Some(layer) = local.and_then(Self::read_layer) {
            config.merge(layer);
        }

        // 4. Environment variables
        if let Ok(format) = std::env::var("BAILEY_FORMAT") {
            config.default_format = Some(format);
        }
        if let Ok(nmps) = std::env::var("BAILEY_NMPS") {
            match nmps.trim().parse::<f64>() {
                Ok(value) => config.defaults.nmps = Some(value),
                Err(_) => tracing::warn!(value = %nmps, "ignoring non-numeric BAILEY_NMPS"),
            }
        }

        config
    }

    /// Read one config file; missing or unparsable files are skipped
    fn read_layer(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read config file");
                return None;
            }
        };

        match serde_yml::from_str::<Config>(&contents) {
            Ok(layer) => {
                tracing::debug!(path = %path.display(), "loaded config layer");
                Some(layer)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
                None
            }
        }
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "bailey")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.plot.width.is_some() {
            self.plot.width = other.plot.width;
        }
        if other.plot.height.is_some() {
            self.plot.height = other.plot.height;
        }

        let d = other.defaults;
        if d.nmps.is_some() {
            self.defaults.nmps = d.nmps;
        }
        if d.luw.is_some() {
            self.defaults.luw = d.luw;
        }
        if d.cacuw.is_some() {
            self.defaults.cacuw = d.cacuw;
        }
        if d.hs.is_some() {
            self.defaults.hs = d.hs;
        }
        if d.pcs.is_some() {
            self.defaults.pcs = d.pcs;
        }
        if d.scs.is_some() {
            self.defaults.scs = d.scs;
        }
        if d.tcs.is_some() {
            self.defaults.tcs = d.tcs;
        }
    }

    /// Default mix inputs: built-in values with configured overrides applied
    pub fn mix_defaults(&self) -> Result<MixInputs, ConfigError> {
        let d = &self.defaults;
        let mut inputs = MixInputs::default();

        if let Some(nmps) = d.nmps {
            inputs.nmps = Nmps::try_from(nmps).map_err(|e| invalid("defaults.nmps", e))?;
        }
        if let Some(luw) = d.luw {
            inputs.loose_unit_weight =
                check_positive("luw", luw).map_err(|e| invalid("defaults.luw", e))?;
        }
        if let Some(cacuw) = d.cacuw {
            inputs.cacuw_percent = check_cacuw(cacuw).map_err(|e| invalid("defaults.cacuw", e))?;
        }

        let passing = &mut inputs.passing;
        for (key, configured, slot) in [
            ("hs", d.hs, &mut passing.hs),
            ("pcs", d.pcs, &mut passing.pcs),
            ("scs", d.scs, &mut passing.scs),
            ("tcs", d.tcs, &mut passing.tcs),
        ] {
            if let Some(value) = configured {
                *slot = check_percent(key, value)
                    .map_err(|e| invalid(&format!("defaults.{}", key), e))?;
            }
        }

        Ok(inputs)
    }

    /// Plot size in pixels
    pub fn plot_size(&self) -> (u32, u32) {
        (
            self.plot.width.unwrap_or(DEFAULT_PLOT_SIZE.0),
            self.plot.height.unwrap_or(DEFAULT_PLOT_SIZE.1),
        )
    }
}

fn invalid(key: &str, source: InputError) -> ConfigError {
    ConfigError {
        key: key.to_string(),
        source,
    }
}
