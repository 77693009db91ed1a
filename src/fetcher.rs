use crate::config::Config;
use crate::errors::FetchError;
use crate::models::{CampaignsPayload, OrdersPayload};
use crate::sources::{validate, SourceId};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;
/// Lookback value the dashboard sends for "All Time".
pub const ALL_TIME: i64 = -1;

#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    base_url: String,
}

impl WebhookClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .timeout(config.webhook_timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.webhook_base_url.clone(),
        })
    }

    /// Fetches one source and applies its payload checks.
    pub async fn fetch(&self, source: SourceId, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url, source.webhook_path());
        debug!(source = source.action(), %url, "fetching webhook");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if status.as_u16() != 200 {
            warn!(source = source.action(), code = status.as_u16(), "webhook returned non-200");
            return Err(FetchError::Http { code: status.as_u16() });
        }

        let data: Value = serde_json::from_str(&body).map_err(|err| FetchError::Json(err.to_string()))?;
        validate(source, data)
    }

    /// Campaign drill-down. `days == ALL_TIME` is sent without a window for Google metrics.
    pub async fn fetch_campaign_detail(
        &self,
        source: SourceId,
        campaign_id: &str,
        days: i64,
    ) -> Result<Value, FetchError> {
        let mut query = vec![("campaign_id", campaign_id.to_string())];
        if !(source == SourceId::GoogleCampaignMetrics && days == ALL_TIME) {
            query.push(("days", days.to_string()));
        }
        self.fetch(source, &query).await
    }

    pub async fn fetch_orders(&self, source: SourceId) -> Option<OrdersPayload> {
        self.fetch_optional(source).await
    }

    pub async fn fetch_campaigns(&self, source: SourceId) -> Option<CampaignsPayload> {
        self.fetch_optional(source).await
    }

    /// Fetches a source and reads it into `T`, keeping the failure for the caller.
    pub async fn fetch_typed<T: DeserializeOwned>(&self, source: SourceId) -> Result<T, FetchError> {
        let data = self.fetch(source, &[]).await?;
        serde_json::from_value(data).map_err(|err| FetchError::InvalidStructure(err.to_string()))
    }

    /// A failing source becomes `None` so the remaining sources still render.
    async fn fetch_optional<T: DeserializeOwned>(&self, source: SourceId) -> Option<T> {
        match self.fetch_typed(source).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                warn!(source = source.action(), kind = err.kind(), "source unavailable: {err}");
                None
            }
        }
    }
}
