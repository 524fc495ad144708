//! Price ticker entries and the synthetic price history.
//!
//! Field names follow the market-data feed the ticker mirrors, so they stay
//! snake_case on the wire.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::query::{FieldValue, Record, SortOrder};

/// The only quote currency the ticker serves.
pub const VS_CURRENCY: &str = "usd";
pub const DEFAULT_HISTORY_DAYS: u32 = 7;
pub const MAX_HISTORY_DAYS: u32 = 365;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_rank: u32,
    pub price_change_percentage_24h: f64,
    pub price_change_percentage_7d: f64,
    pub price_change_percentage_30d: f64,
    pub circulating_supply: f64,
    pub max_supply: Option<f64>,
    pub ath: f64,
    pub ath_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Model for PriceEntry {
    const COLLECTION: &'static str = "prices";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for PriceEntry {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "id" => FieldValue::Text(&self.id),
            "symbol" => FieldValue::Text(&self.symbol),
            "name" => FieldValue::Text(&self.name),
            "current_price" => FieldValue::Number(self.current_price),
            "market_cap" => FieldValue::Number(self.market_cap),
            "market_cap_rank" => FieldValue::Number(f64::from(self.market_cap_rank)),
            "price_change_percentage_24h" => FieldValue::Number(self.price_change_percentage_24h),
            "price_change_percentage_7d" => FieldValue::Number(self.price_change_percentage_7d),
            "price_change_percentage_30d" => FieldValue::Number(self.price_change_percentage_30d),
            "circulating_supply" => FieldValue::Number(self.circulating_supply),
            "max_supply" => FieldValue::opt_number(self.max_supply),
            "ath" => FieldValue::Number(self.ath),
            "ath_date" => FieldValue::Time(self.ath_date),
            "last_updated" => FieldValue::Time(self.last_updated),
            _ => FieldValue::Missing,
        }
    }
}

/// Price fields only, for `include_market_data=false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: f64,
    pub price_change_percentage_24h: f64,
    pub last_updated: DateTime<Utc>,
}

impl From<PriceEntry> for PriceSummary {
    fn from(entry: PriceEntry) -> Self {
        Self {
            id: entry.id,
            symbol: entry.symbol,
            name: entry.name,
            current_price: entry.current_price,
            price_change_percentage_24h: entry.price_change_percentage_24h,
            last_updated: entry.last_updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PriceView {
    Full(PriceEntry),
    Summary(PriceSummary),
}

impl PriceView {
    pub fn id(&self) -> &str {
        match self {
            PriceView::Full(entry) => &entry.id,
            PriceView::Summary(summary) => &summary.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceMeta {
    pub vs_currency: String,
    pub count: usize,
    pub include_market_data: bool,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PriceSortKey {
    #[default]
    #[serde(rename = "market_cap_rank")]
    MarketCapRank,
    #[serde(rename = "market_cap")]
    MarketCap,
    #[serde(rename = "current_price")]
    CurrentPrice,
    #[serde(rename = "price_change_percentage_24h")]
    Change24h,
    #[serde(rename = "price_change_percentage_7d")]
    Change7d,
    #[serde(rename = "price_change_percentage_30d")]
    Change30d,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "symbol")]
    Symbol,
}

impl PriceSortKey {
    pub fn field(&self) -> &'static str {
        match self {
            PriceSortKey::MarketCapRank => "market_cap_rank",
            PriceSortKey::MarketCap => "market_cap",
            PriceSortKey::CurrentPrice => "current_price",
            PriceSortKey::Change24h => "price_change_percentage_24h",
            PriceSortKey::Change7d => "price_change_percentage_7d",
            PriceSortKey::Change30d => "price_change_percentage_30d",
            PriceSortKey::Name => "name",
            PriceSortKey::Symbol => "symbol",
        }
    }
}

/// Query string of `GET /api/price-ticker`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PriceParams {
    /// Comma-separated coin ids.
    pub ids: Option<String>,
    pub vs_currency: Option<String>,
    pub include_market_data: Option<bool>,
    pub sort: Option<PriceSortKey>,
    pub order: Option<SortOrder>,
}

impl PriceParams {
    /// Requested ids, lowercased and trimmed, blanks dropped.
    pub fn id_list(&self) -> Vec<String> {
        self.ids
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|id| id.trim().to_lowercase())
            .filter(|id| !id.is_empty())
            .collect()
    }
}

/// Body of `POST /api/price-ticker`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryRequest {
    pub coin: Option<String>,
    pub days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// `{success, coin, days, data}`.
#[derive(Debug, Clone, Serialize)]
pub struct PriceHistory {
    pub success: bool,
    pub coin: String,
    pub days: u32,
    pub data: Vec<HistoryPoint>,
}

/// One point per day from `now - days` to `now`, inclusive.
///
/// Prices wobble within ±5% of the current price. The wobble is a pure
/// function of the coin id and the day offset, so repeated requests agree.
pub fn history(entry: &PriceEntry, days: u32, now: DateTime<Utc>) -> Vec<HistoryPoint> {
    let seed = entry.id.bytes().fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(u32::from(b)));
    (0..=days)
        .rev()
        .map(|back| {
            let factor = 0.95 + 0.1 * unit_noise(seed, back);
            HistoryPoint {
                timestamp: now - Duration::days(i64::from(back)),
                price: round_cents(entry.current_price * factor),
            }
        })
        .collect()
}

/// Deterministic value in `[0, 1)`.
fn unit_noise(seed: u32, n: u32) -> f64 {
    let mut x = seed ^ n.wrapping_mul(0x9E37_79B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x7FEB_352D);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846C_A68B);
    x ^= x >> 16;
    f64::from(x) / (f64::from(u32::MAX) + 1.0)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
