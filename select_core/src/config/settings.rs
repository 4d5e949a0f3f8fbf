use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::files::{SelectionConfig, UploadPolicy, DEFAULT_CONTROL_ID};
use crate::i18n::messages::EN_US;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub upload: UploadPolicy,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub cli: CliConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    pub default_locale: String,
    /// Extra JSON message bundles loaded at startup.
    #[serde(default)]
    pub bundle_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickerConfig {
    pub control_id: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliMode {
    /// Treat the given paths as a dropped file list.
    #[default]
    Drop,
    /// Route the paths through the picker, honoring `multiple`.
    Picker,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    pub mode: CliMode,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: EN_US.to_string(),
            bundle_files: Vec::new(),
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            control_id: DEFAULT_CONTROL_ID.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `select.toml` when present, then `SELECT_*` variables
    /// (`__` between nesting levels, e.g. `SELECT_UPLOAD__MAXIMUM_SIZE_MB`).
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if std::path::Path::new("select.toml").exists() {
            builder = builder.add_source(File::with_name("select"));
        }

        builder = builder.add_source(
            Environment::with_prefix("SELECT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.i18n.default_locale.trim().is_empty() {
            return Err(ConfigError::Message(
                "Default locale cannot be empty".to_string(),
            ));
        }

        if self.picker.control_id.trim().is_empty() {
            return Err(ConfigError::Message(
                "Picker control id cannot be empty".to_string(),
            ));
        }

        if let Some(maximum) = self.upload.maximum_size_mb {
            if !maximum.is_finite() || maximum < 0.0 {
                return Err(ConfigError::Message(
                    "Maximum file size must be a non-negative number".to_string(),
                ));
            }
        }

        if self.selection.accept.as_deref() == Some("") {
            tracing::warn!("Empty accept pattern configured - all file types are allowed");
        }

        Ok(())
    }
}
