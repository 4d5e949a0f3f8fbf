pub mod settings;

pub use settings::{AppConfig, CliConfig, CliMode, I18nConfig, PickerConfig};
