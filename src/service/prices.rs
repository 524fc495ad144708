use chrono::Utc;

use crate::content::price::{self, DEFAULT_HISTORY_DAYS, MAX_HISTORY_DAYS, VS_CURRENCY};
use crate::content::{HistoryRequest, PriceHistory, PriceMeta, PriceParams, PriceView};
use crate::error::ApiError;
use crate::model::ModelStore;
use crate::query::{Filter, Page, Query, Sort, SortOrder};

use super::Service;

impl<S: ModelStore> Service<S> {
    /// `GET /api/price-ticker`
    ///
    /// Every requested id must be known. Sorting defaults to market-cap rank,
    /// best first.
    pub fn prices(&self, params: &PriceParams) -> Result<(Vec<PriceView>, PriceMeta), ApiError> {
        let vs_currency = params
            .vs_currency
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .unwrap_or_else(|| VS_CURRENCY.to_string());
        if vs_currency != VS_CURRENCY {
            return Err(ApiError::validation(format!(
                "Unsupported vs_currency '{vs_currency}'; only '{VS_CURRENCY}' is available"
            )));
        }

        let entries = self.price_entries()?;
        let ids = params.id_list();
        if let Some(unknown) = ids.iter().find(|id| !entries.iter().any(|e| &e.id == *id)) {
            return Err(ApiError::NotFound(format!(
                "Price data for {unknown} not available"
            )));
        }

        let sort = match (params.sort, params.order) {
            (None, None) => Sort::asc("market_cap_rank"),
            (key, order) => Sort::new(key.unwrap_or_default().field(), order.unwrap_or(SortOrder::Desc)),
        };
        let mut query = Query::new(Page::everything()).sort(sort);
        if !ids.is_empty() {
            query = query.filter(Filter::one_of("id", ids));
        }
        let result = query.run(entries);

        let include_market_data = params.include_market_data.unwrap_or(true);
        let data: Vec<PriceView> = result
            .items
            .into_iter()
            .map(|entry| {
                if include_market_data {
                    PriceView::Full(entry)
                } else {
                    PriceView::Summary(entry.into())
                }
            })
            .collect();
        let meta = PriceMeta {
            vs_currency,
            count: data.len(),
            include_market_data,
            last_updated: Utc::now(),
        };
        tracing::debug!(count = meta.count, "served price ticker");
        Ok((data, meta))
    }

    /// `POST /api/price-ticker`: synthetic daily history for one coin.
    pub fn price_history(&self, request: HistoryRequest) -> Result<PriceHistory, ApiError> {
        let coin = request
            .coin
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ApiError::validation("Coin parameter is required"))?;
        let days = request.days.unwrap_or(DEFAULT_HISTORY_DAYS);
        if !(1..=MAX_HISTORY_DAYS).contains(&days) {
            return Err(ApiError::validation(format!(
                "days must be between 1 and {MAX_HISTORY_DAYS}"
            )));
        }

        let entry = self
            .price_entries()?
            .into_iter()
            .find(|e| e.id == coin)
            .ok_or_else(|| ApiError::NotFound(format!("Historical data for {coin} not available")))?;

        Ok(PriceHistory {
            success: true,
            data: price::history(&entry, days, Utc::now()),
            coin,
            days,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::content::{HistoryRequest, PriceParams, PriceSortKey, PriceView};
    use crate::query::SortOrder;
    use crate::service::test_support::seeded;

    fn ids(views: &[PriceView]) -> Vec<&str> {
        views.iter().map(|v| v.id()).collect()
    }

    #[test]
    fn defaults_to_rank_order_with_market_data() {
        let service = seeded();
        let (data, meta) = service.prices(&PriceParams::default()).unwrap();
        assert_eq!(ids(&data), vec!["bitcoin", "ethereum", "binancecoin", "cardano", "solana"]);
        assert!(matches!(data[0], PriceView::Full(_)));
        assert_eq!(meta.vs_currency, "usd");
        assert_eq!(meta.count, 5);
    }

    #[test]
    fn selects_ids_and_drops_market_data() {
        let service = seeded();
        let params = PriceParams {
            ids: Some("solana,Bitcoin".into()),
            include_market_data: Some(false),
            ..Default::default()
        };
        let (data, meta) = service.prices(&params).unwrap();
        assert_eq!(ids(&data), vec!["bitcoin", "solana"]);
        assert!(data.iter().all(|v| matches!(v, PriceView::Summary(_))));
        assert!(!meta.include_market_data);
    }

    #[test]
    fn sorts_by_requested_field() {
        let service = seeded();
        let params = PriceParams {
            sort: Some(PriceSortKey::Change24h),
            order: Some(SortOrder::Asc),
            ..Default::default()
        };
        let (data, _) = service.prices(&params).unwrap();
        assert_eq!(ids(&data), vec!["solana", "cardano", "binancecoin", "ethereum", "bitcoin"]);
    }

    #[test]
    fn unknown_id_and_currency_fail() {
        let service = seeded();
        let unknown = PriceParams {
            ids: Some("bitcoin,dogecoin".into()),
            ..Default::default()
        };
        let err = service.prices(&unknown).unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Price data for dogecoin not available");

        let eur = PriceParams {
            vs_currency: Some("eur".into()),
            ..Default::default()
        };
        assert_eq!(service.prices(&eur).unwrap_err().status_code(), 400);
    }

    #[test]
    fn history_validates_coin_and_days() {
        let service = seeded();
        let history = service
            .price_history(HistoryRequest {
                coin: Some("Ethereum".into()),
                days: None,
            })
            .unwrap();
        assert_eq!(history.coin, "ethereum");
        assert_eq!(history.days, 7);
        assert_eq!(history.data.len(), 8);

        let cases = [
            (None, Some(7), 400),
            (Some("bitcoin"), Some(0), 400),
            (Some("bitcoin"), Some(366), 400),
            (Some("dogecoin"), Some(7), 404),
        ];
        for (coin, days, status) in cases {
            let err = service
                .price_history(HistoryRequest {
                    coin: coin.map(String::from),
                    days,
                })
                .unwrap_err();
            assert_eq!(err.status_code(), status);
        }
    }
}
