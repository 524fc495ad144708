//! Site-wide settings: one document split into sections.
//!
//! Updates are partial trees deep-merged into the current document. The merged
//! tree must still deserialize into [`SiteSettings`], so unknown keys and
//! wrong types are rejected rather than stored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::Model;

pub const SETTINGS_ID: &str = "site";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteSettings {
    pub site: SiteSection,
    pub meta: MetaSection,
    pub social: SocialSection,
    pub footer: FooterSection,
    pub features: FeaturesSection,
    pub analytics: AnalyticsSection,
}

impl Model for SiteSettings {
    const COLLECTION: &'static str = "settings";

    fn id(&self) -> &str {
        SETTINGS_ID
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteSection {
    pub name: String,
    pub tagline: String,
    pub description: String,
    pub logo_url: String,
    pub favicon_url: String,
    pub theme_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MetaSection {
    pub title: String,
    pub description: String,
    pub og_image: String,
    pub twitter_handle: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialSection {
    pub twitter: String,
    pub facebook: String,
    pub telegram: String,
    pub discord: String,
    pub youtube: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FooterSection {
    pub copyright_text: String,
    pub show_social_links: bool,
    pub show_categories_in_footer: bool,
    pub disclaimer_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeaturesSection {
    pub dark_mode_enabled: bool,
    pub newsletter_enabled: bool,
    pub comments_enabled: bool,
    pub price_ticker: PriceTickerFeature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PriceTickerFeature {
    pub enabled: bool,
    pub coins: Vec<String>,
    /// Seconds between client refreshes.
    pub refresh_interval: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnalyticsSection {
    pub google_analytics_id: String,
    pub facebook_pixel_id: String,
    pub hotjar_id: String,
}

/// Top-level settings sections, for `GET /api/settings?section=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsSection {
    Site,
    Meta,
    Social,
    Footer,
    Features,
    Analytics,
}

impl SettingsSection {
    pub fn key(&self) -> &'static str {
        match self {
            SettingsSection::Site => "site",
            SettingsSection::Meta => "meta",
            SettingsSection::Social => "social",
            SettingsSection::Footer => "footer",
            SettingsSection::Features => "features",
            SettingsSection::Analytics => "analytics",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsParams {
    pub section: Option<SettingsSection>,
}

/// Recursively merge `patch` into `target`. Objects merge key by key;
/// anything else (including arrays) replaces the target value.
pub fn merge_deep(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                let nested = value.is_object() && target.get(&key).is_some_and(Value::is_object);
                match target.get_mut(&key) {
                    Some(existing) if nested => merge_deep(existing, value),
                    _ => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

/// `{ "<section>": <value> }`.
pub fn section_view(settings: &SiteSettings, section: SettingsSection) -> Result<Value, serde_json::Error> {
    let mut tree = serde_json::to_value(settings)?;
    let value = tree
        .get_mut(section.key())
        .map(Value::take)
        .unwrap_or(Value::Null);
    let mut out = Map::new();
    out.insert(section.key().to_string(), value);
    Ok(Value::Object(out))
}
