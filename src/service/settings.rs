use serde_json::Value;

use crate::content::settings::{merge_deep, section_view};
use crate::content::{SettingsSection, SiteSettings};
use crate::error::ApiError;
use crate::model::{ModelError, ModelStore, ModelsExt};

use super::Service;

impl<S: ModelStore> Service<S> {
    /// `GET /api/settings`: the whole tree, or `{section: value}`.
    pub fn settings(&self, section: Option<SettingsSection>) -> Result<Value, ApiError> {
        let settings = self.settings_doc()?.into_inner();
        let view = match section {
            Some(section) => section_view(&settings, section),
            None => serde_json::to_value(&settings),
        };
        view.map_err(|e| ApiError::Store(ModelError::from(e)))
    }

    /// `PUT /api/settings`: deep-merge a partial tree.
    pub fn update_settings(&self, patch: Value) -> Result<SiteSettings, ApiError> {
        match patch.as_object() {
            Some(map) if !map.is_empty() => {}
            Some(_) => return Err(ApiError::validation("No settings provided for update")),
            None => return Err(ApiError::validation("Settings update must be a JSON object")),
        }
        let name = patch.get("site").and_then(|site| site.get("name"));
        if let Some(Value::String(name)) = name {
            if name.trim().is_empty() {
                return Err(ApiError::validation("Site name cannot be empty"));
            }
        }

        let _guard = self.write_guard();
        let current = self.settings_doc()?;
        let version = current.version;

        let mut tree = serde_json::to_value(current.into_inner())
            .map_err(|e| ApiError::Store(ModelError::from(e)))?;
        merge_deep(&mut tree, patch);
        let updated: SiteSettings = serde_json::from_value(tree)
            .map_err(|e| ApiError::validation(format!("Invalid settings: {e}")))?;

        self.store.models::<SiteSettings>().update(&updated, version)?;
        tracing::info!("site settings updated");
        Ok(updated)
    }
}
