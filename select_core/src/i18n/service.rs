use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use super::messages::{UploadText, EN_US};
use crate::error::{Result, SelectError};

/// Owns the upload message bundles and broadcasts the active one.
///
/// Components subscribe through [`I18nService::lang_change`] and keep the
/// receiver for as long as they live; dropping it is the unsubscribe.
#[derive(Debug, Clone)]
pub struct I18nService {
    bundles: Arc<RwLock<HashMap<String, Arc<UploadText>>>>,
    sender: Arc<watch::Sender<Arc<UploadText>>>,
}

impl I18nService {
    /// Creates the service with the built-in bundles, falling back to
    /// `en-us` when `default_locale` is unknown.
    pub fn new(default_locale: &str) -> Self {
        let bundles: HashMap<String, Arc<UploadText>> = UploadText::builtin()
            .into_iter()
            .map(|text| (normalize(&text.locale), Arc::new(text)))
            .collect();

        let initial = bundles
            .get(&normalize(default_locale))
            .or_else(|| bundles.get(EN_US))
            .cloned()
            .unwrap_or_else(|| Arc::new(UploadText::en_us()));

        let (sender, _) = watch::channel(initial);

        Self {
            bundles: Arc::new(RwLock::new(bundles)),
            sender: Arc::new(sender),
        }
    }

    pub fn get_i18n_text(&self) -> Arc<UploadText> {
        self.sender.borrow().clone()
    }

    pub fn current_locale(&self) -> String {
        self.sender.borrow().locale.clone()
    }

    pub fn lang_change(&self) -> watch::Receiver<Arc<UploadText>> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn available_locales(&self) -> Vec<String> {
        let mut locales: Vec<String> = self.bundles.read().keys().cloned().collect();
        locales.sort();
        locales
    }

    pub fn set_language(&self, locale: &str) -> Result<()> {
        let bundles = self.bundles.read();
        let text = bundles
            .get(&normalize(locale))
            .cloned()
            .ok_or_else(|| SelectError::UnknownLanguage(locale.to_string()))?;

        info!("Switching upload messages to {}", text.locale);
        self.sender.send_replace(text);
        Ok(())
    }

    /// Adds or replaces a bundle. Replacing the active locale republishes it.
    pub fn register_bundle(&self, text: UploadText) {
        let key = normalize(&text.locale);
        let text = Arc::new(text);

        // language switches hold the registry lock while publishing
        let mut bundles = self.bundles.write();
        bundles.insert(key.clone(), text.clone());
        debug!("Registered upload messages for {}", key);

        if normalize(&self.current_locale()) == key {
            self.sender.send_replace(text);
        }
    }

    pub async fn load_bundle_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let text: UploadText = serde_json::from_str(&raw)?;

        info!("Loaded upload messages for {} from {}", text.locale, path.display());
        self.register_bundle(text);
        Ok(())
    }
}

impl Default for I18nService {
    fn default() -> Self {
        Self::new(EN_US)
    }
}

fn normalize(locale: &str) -> String {
    locale.trim().to_lowercase().replace('_', "-")
}
