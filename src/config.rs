//! Tool configuration.
//!
//! Loaded from `cropkit.toml` (or the file passed with `--config`). Every key
//! is optional; a missing file means stock defaults.
//!
//! ```toml
//! # How file extensions are matched against codec names:
//! #   "exact"       -> IMG.PNG is rejected as an unsupported format
//! #   "ignore-case" -> IMG.PNG is decoded with the png codec
//! extension_matching = "exact"
//!
//! # Appended to the base name when no output path is given:
//! #   dawn.png -> dawn-cropped.png
//! output_suffix = "-cropped"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{CodecRegistry, ExtensionMatching};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Extension comparison policy for codec lookup.
    pub extension_matching: ExtensionMatching,
    /// Suffix for derived output file names.
    pub output_suffix: String,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            extension_matching: ExtensionMatching::Exact,
            output_suffix: "-cropped".to_string(),
        }
    }
}

impl CropConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_suffix.is_empty() {
            // Saving next to the source with an empty suffix would overwrite it.
            return Err(ConfigError::Validation(
                "output_suffix must not be empty".into(),
            ));
        }
        if self.output_suffix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "output_suffix must not contain a path separator: {:?}",
                self.output_suffix
            )));
        }
        Ok(())
    }

    /// Codec registry honoring this config's matching policy.
    pub fn registry(&self) -> CodecRegistry {
        CodecRegistry::builtin().with_matching(self.extension_matching)
    }
}

/// Parse and validate a config from TOML text.
pub fn parse_config(content: &str) -> Result<CropConfig, ConfigError> {
    let config: CropConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`. Returns defaults if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<CropConfig, ConfigError> {
    if !path.exists() {
        return Ok(CropConfig::default());
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `cropkit.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# cropkit configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# How file extensions are matched against codec names (png, gif, tiff).
#   "exact"       -> IMG.PNG is rejected as an unsupported format
#   "ignore-case" -> IMG.PNG is decoded with the png codec
extension_matching = "exact"

# Appended to the source base name when no --output is given.
#   dawn.png -> dawn-cropped.png
output_suffix = "-cropped"
"##
}
