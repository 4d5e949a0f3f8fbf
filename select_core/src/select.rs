//! Component tying the picker, the policies and the localized messages together

use futures_util::stream;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

use crate::files::{
    validate_files, FileHandle, FilePicker, FileValidation, PickerHost, SelectionConfig, UploadPolicy,
};
use crate::i18n::{I18nService, UploadText};

/// Opens the picker or takes dropped files and validates them.
///
/// Holds one language subscription for its whole lifetime; dropping the
/// component releases it.
pub struct SelectFiles<H: PickerHost> {
    picker: FilePicker<H>,
    i18n_text: watch::Receiver<Arc<UploadText>>,
}

impl<H: PickerHost> SelectFiles<H> {
    pub fn new(host: H, i18n: &I18nService) -> Self {
        Self {
            picker: FilePicker::new(host),
            i18n_text: i18n.lang_change(),
        }
    }

    pub fn with_control_id(mut self, control_id: impl Into<String>) -> Self {
        self.picker = self.picker.with_control_id(control_id);
        self
    }

    pub fn picker(&self) -> &FilePicker<H> {
        &self.picker
    }

    /// Message bundle currently in effect.
    pub fn text(&self) -> Arc<UploadText> {
        self.i18n_text.borrow().clone()
    }

    /// Opens the picker and validates whatever the user chose.
    pub fn trigger_select_files(
        &self,
        file_options: &SelectionConfig,
        upload_options: &UploadPolicy,
    ) -> FileValidation<'_, H::File> {
        let picker = &self.picker;
        let config = file_options.clone();
        let source = stream::once(async move { picker.select_files(&config).await });

        debug!(multiple = file_options.multiple, accept = ?file_options.accept(), "Triggered file selection");
        validate_files(source, file_options.accept(), upload_options, self.i18n_text.clone())
    }

    /// Validates files that arrived some other way, e.g. a drop.
    pub fn trigger_drop_files<F: FileHandle + 'static>(
        &self,
        file_options: &SelectionConfig,
        upload_options: &UploadPolicy,
        files: Vec<F>,
    ) -> FileValidation<'static, F> {
        debug!(count = files.len(), accept = ?file_options.accept(), "Triggered file drop");
        validate_files(
            stream::iter(vec![files]),
            file_options.accept(),
            upload_options,
            self.i18n_text.clone(),
        )
    }
}
