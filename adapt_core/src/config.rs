//! Configuration file support for the adaptation engine.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/adapt/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub synthesis: SynthesisConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Magnitudes the recommendation synthesizer uses for its adjustments
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SynthesisConfig {
    /// Intensity change when both intensity and volume need adjusting
    #[serde(default = "default_combined_intensity_pct")]
    pub combined_intensity_pct: i32,

    #[serde(default = "default_intensity_only_pct")]
    pub intensity_only_pct: i32,

    #[serde(default = "default_volume_only_pct")]
    pub volume_only_pct: i32,

    /// Intensity action when stress is high or extreme
    #[serde(default = "default_high_stress_intensity_pct")]
    pub high_stress_intensity_pct: i32,

    #[serde(default = "default_fatigued_target_rpe")]
    pub fatigued_target_rpe: u8,

    #[serde(default = "default_target_rpe")]
    pub default_target_rpe: u8,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            combined_intensity_pct: default_combined_intensity_pct(),
            intensity_only_pct: default_intensity_only_pct(),
            volume_only_pct: default_volume_only_pct(),
            high_stress_intensity_pct: default_high_stress_intensity_pct(),
            fatigued_target_rpe: default_fatigued_target_rpe(),
            default_target_rpe: default_target_rpe(),
        }
    }
}

impl SynthesisConfig {
    /// Reject magnitudes that would turn a reduction into an increase
    pub fn validate(&self) -> Result<()> {
        let reductions = [
            ("combined_intensity_pct", self.combined_intensity_pct),
            ("intensity_only_pct", self.intensity_only_pct),
            ("volume_only_pct", self.volume_only_pct),
            ("high_stress_intensity_pct", self.high_stress_intensity_pct),
        ];
        for (key, value) in reductions {
            if !(-100..=0).contains(&value) {
                return Err(Error::Config(format!(
                    "synthesis.{} must be between -100 and 0, got {}",
                    key, value
                )));
            }
        }

        for (key, value) in [
            ("fatigued_target_rpe", self.fatigued_target_rpe),
            ("default_target_rpe", self.default_target_rpe),
        ] {
            if !(1..=10).contains(&value) {
                return Err(Error::Config(format!(
                    "synthesis.{} must be between 1 and 10, got {}",
                    key, value
                )));
            }
        }
        Ok(())
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("adapt")
}

fn default_combined_intensity_pct() -> i32 {
    -15
}

fn default_intensity_only_pct() -> i32 {
    -10
}

fn default_volume_only_pct() -> i32 {
    -20
}

fn default_high_stress_intensity_pct() -> i32 {
    -15
}

fn default_fatigued_target_rpe() -> u8 {
    6
}

fn default_target_rpe() -> u8 {
    7
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.synthesis.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("adapt").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
