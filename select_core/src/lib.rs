//! File selection and validation: opens a picker (or takes a dropped file
//! list), checks every file against an accept pattern and a size cap, and
//! fails on the first file that does not pass.

pub mod config;
pub mod error;
pub mod files;
pub mod i18n;
pub mod select;

pub use crate::config::AppConfig;
pub use error::{Result, SelectError};
pub use files::{
    beyond_maximal_size, is_allowed_file_type, validate_files, FileHandle, FilePicker, FileRules,
    FileValidation, PickerHost, PickerOptions, SelectedFile, SelectionConfig, StaticPickerHost,
    UploadPolicy, ValidationError, ValidationState,
};
pub use i18n::{I18nService, UploadText};
pub use select::SelectFiles;

/// Loads the configured extra bundles and switches to the default locale.
pub async fn init_i18n(i18n_config: &crate::config::I18nConfig) -> Result<I18nService> {
    let service = I18nService::new(&i18n_config.default_locale);

    for path in &i18n_config.bundle_files {
        service.load_bundle_json(path).await?;
    }

    match service.set_language(&i18n_config.default_locale) {
        Ok(()) => {}
        Err(SelectError::UnknownLanguage(locale)) => {
            tracing::warn!("Unknown default locale {}, using {}", locale, service.current_locale());
        }
        Err(err) => return Err(err),
    }

    Ok(service)
}
