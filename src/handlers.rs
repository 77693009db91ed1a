use crate::aggregate::{assemble_chart_data, build_campaign_series, RegionPayloads};
use crate::buckets::{generate_buckets, Period, DEFAULT_BUCKET_COUNT, MAX_BUCKET_COUNT};
use crate::errors::AppError;
use crate::fetcher::{WebhookClient, DEFAULT_LOOKBACK_DAYS};
use crate::models::{CampaignSummary, CampaignsPayload, ChartData};
use crate::sources::{Region, SourceId};
use crate::state::AppState;
use crate::ui::render_dashboard;
use axum::{extract::State, response::Html, Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::task::JoinSet;
use tracing::{info, warn};

pub const AJAX_PATH: &str = "/admin-ajax";

#[derive(Debug, Deserialize)]
pub struct AjaxRequest {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub nonce: String,
    pub campaign_id: Option<String>,
    pub days: Option<String>,
    pub period: Option<String>,
    pub count: Option<String>,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_dashboard(AJAX_PATH, &state.config.nonce))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Single entry point for every dashboard action, mirroring an `admin-ajax` style dispatcher.
pub async fn ajax(
    State(state): State<AppState>,
    Form(request): Form<AjaxRequest>,
) -> Result<Json<Value>, AppError> {
    if request.nonce != state.config.nonce {
        return Err(AppError::forbidden("Invalid security token"));
    }

    let action = request.action.trim();
    let data = match action {
        "fetch_welcome_chart" => {
            let period = request
                .period
                .as_deref()
                .and_then(|value| value.parse::<Period>().ok())
                .unwrap_or_default();
            let count = bucket_count(request.count.as_deref());
            to_value(welcome_chart(&state, period, count).await)?
        }
        "fetch_google_ads_summary" => to_value(campaign_summary(&state, SourceId::GoogleAds, "Google Ads").await?)?,
        "fetch_facebook_ads_summary" => to_value(campaign_summary(&state, SourceId::FacebookAds, "Meta Ads").await?)?,
        _ => {
            let source = SourceId::from_action(action)
                .ok_or_else(|| AppError::bad_request("unknown_action", format!("Unknown action '{action}'")))?;
            forward(&state.webhooks, source, &request).await?
        }
    };

    Ok(Json(json!({ "success": true, "data": data })))
}

async fn forward(webhooks: &WebhookClient, source: SourceId, request: &AjaxRequest) -> Result<Value, AppError> {
    if !source.is_campaign_detail() {
        return Ok(webhooks.fetch(source, &[]).await?);
    }

    let campaign_id = request.campaign_id.as_deref().map(str::trim).unwrap_or_default();
    if campaign_id.is_empty() {
        return Err(AppError::bad_request("missing_campaign_id", "Campaign ID required"));
    }
    let days = request
        .days
        .as_deref()
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_LOOKBACK_DAYS);

    info!(source = source.action(), campaign_id, days, "campaign detail request");
    Ok(webhooks.fetch_campaign_detail(source, campaign_id, days).await?)
}

pub async fn welcome_chart(state: &AppState, period: Period, count: usize) -> ChartData {
    let webhooks = &state.webhooks;
    let (google, meta, regions) = tokio::join!(
        webhooks.fetch_campaigns(SourceId::GoogleAds),
        webhooks.fetch_campaigns(SourceId::FacebookAds),
        fetch_regions(webhooks),
    );

    let buckets = generate_buckets(period, count);
    assemble_chart_data(
        google.as_ref().map(|payload| payload.campaigns.as_slice()),
        meta.as_ref().map(|payload| payload.campaigns.as_slice()),
        &regions,
        &buckets,
        state.config.top_campaigns,
    )
}

/// Unlike the overview chart, a failing source is reported to the caller.
async fn campaign_summary(state: &AppState, source: SourceId, platform: &str) -> Result<CampaignSummary, AppError> {
    let campaigns = state.webhooks.fetch_typed::<CampaignsPayload>(source).await?.campaigns;
    let buckets = generate_buckets(Period::Weekly, DEFAULT_BUCKET_COUNT);

    Ok(CampaignSummary {
        total_spend: campaigns.iter().map(|campaign| campaign.spend).sum(),
        weekly_data: build_campaign_series(&campaigns, &buckets, state.config.top_campaigns, platform),
        campaigns,
    })
}

/// Fetches every station concurrently and groups the results by region.
async fn fetch_regions(webhooks: &WebhookClient) -> Vec<RegionPayloads> {
    let mut tasks = JoinSet::new();
    for &source in Region::ALL.iter().flat_map(|region| region.stations()) {
        let client = webhooks.clone();
        tasks.spawn(async move { (source, client.fetch_orders(source).await) });
    }

    let mut fetched = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((source, payload)) => {
                fetched.insert(source, payload);
            }
            Err(err) => warn!("station fetch task failed: {err}"),
        }
    }

    Region::ALL
        .iter()
        .map(|&region| RegionPayloads {
            region,
            stations: region
                .stations()
                .iter()
                .map(|source| fetched.remove(source).flatten())
                .collect(),
        })
        .collect()
}

fn bucket_count(raw: Option<&str>) -> usize {
    match raw.and_then(|value| value.trim().parse::<usize>().ok()) {
        Some(0) | None => DEFAULT_BUCKET_COUNT,
        Some(count) => count.min(MAX_BUCKET_COUNT),
    }
}

fn to_value<T: serde::Serialize>(data: T) -> Result<Value, AppError> {
    serde_json::to_value(data).map_err(AppError::internal)
}
