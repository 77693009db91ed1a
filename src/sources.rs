//! The fixed set of webhook-backed data sources and the checks applied to their payloads.

use crate::dates::{format_display_date, parse_date};
use crate::errors::FetchError;
use crate::models::{OrdersSummary, SummaryRange};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Orders,
    Campaigns,
    Passthrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Wtla,
    Wkrl,
    Wktw,
    Wzun,
    GoogleAds,
    FacebookAds,
    GoogleCampaignMetrics,
    FacebookCampaignAdSets,
}

struct SourceSpec {
    action: &'static str,
    webhook_path: &'static str,
    shape: PayloadShape,
}

const ORDER_REQUIRED_FIELDS: [&str; 3] = ["orderNumber", "dailyBreakdown", "totalAds"];

impl SourceId {
    pub const STATIONS: [SourceId; 4] = [SourceId::Wtla, SourceId::Wkrl, SourceId::Wktw, SourceId::Wzun];

    pub const ALL: [SourceId; 8] = [
        SourceId::Wtla,
        SourceId::Wkrl,
        SourceId::Wktw,
        SourceId::Wzun,
        SourceId::GoogleAds,
        SourceId::FacebookAds,
        SourceId::GoogleCampaignMetrics,
        SourceId::FacebookCampaignAdSets,
    ];

    fn spec(self) -> SourceSpec {
        let (action, webhook_path, shape) = match self {
            Self::Wtla => ("fetch_wtla_ads", "wtla-data", PayloadShape::Orders),
            Self::Wkrl => ("fetch_tvradio_ads", "wkrl-data", PayloadShape::Orders),
            Self::Wktw => ("fetch_wktw_ads", "wktw-data", PayloadShape::Orders),
            Self::Wzun => ("fetch_wzun_ads", "wzun-data", PayloadShape::Orders),
            Self::GoogleAds => ("fetch_google_ads_campaigns", "google-ads-campaigns", PayloadShape::Campaigns),
            Self::FacebookAds => ("fetch_facebook_ads", "facebook-ads-data", PayloadShape::Passthrough),
            Self::GoogleCampaignMetrics => (
                "fetch_google_campaign_metrics",
                "google-campaign-metrics",
                PayloadShape::Passthrough,
            ),
            Self::FacebookCampaignAdSets => (
                "fetch_facebook_campaign_adsets",
                "facebook-campaign-adsets",
                PayloadShape::Passthrough,
            ),
        };
        SourceSpec { action, webhook_path, shape }
    }

    pub fn from_action(action: &str) -> Option<Self> {
        let action = action.trim();
        if action == "fetch_google_ads" {
            return Some(Self::GoogleAds);
        }
        Self::ALL.into_iter().find(|source| source.action() == action)
    }

    pub fn action(self) -> &'static str {
        self.spec().action
    }

    pub fn webhook_path(self) -> &'static str {
        self.spec().webhook_path
    }

    pub fn shape(self) -> PayloadShape {
        self.spec().shape
    }

    /// Detail sources need a campaign id and take a lookback window.
    pub fn is_campaign_detail(self) -> bool {
        matches!(self, Self::GoogleCampaignMetrics | Self::FacebookCampaignAdSets)
    }
}

/// Designated Market Areas that group broadcast stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    SyracuseRochester,
    Albany,
    MontrealPlattsburgh,
}

impl Region {
    pub const ALL: [Region; 3] = [Region::SyracuseRochester, Region::Albany, Region::MontrealPlattsburgh];

    pub fn series_name(self) -> &'static str {
        match self {
            Self::SyracuseRochester => "Syracuse/Rochester Ads",
            Self::Albany => "Albany DMA Ads",
            Self::MontrealPlattsburgh => "Montreal/Plattsburgh Ads",
        }
    }

    pub fn stations(self) -> &'static [SourceId] {
        match self {
            Self::SyracuseRochester => &SourceId::STATIONS,
            // No stations contracted in these markets yet.
            Self::Albany | Self::MontrealPlattsburgh => &[],
        }
    }
}

pub fn validate(source: SourceId, data: Value) -> Result<Value, FetchError> {
    match source.shape() {
        PayloadShape::Orders => validate_orders(data),
        PayloadShape::Campaigns => {
            if data.get("campaigns").is_none() {
                return Err(FetchError::InvalidStructure("No campaigns found in response".into()));
            }
            Ok(data)
        }
        PayloadShape::Passthrough => Ok(data),
    }
}

fn validate_orders(data: Value) -> Result<Value, FetchError> {
    let orders: Vec<Value> = match data.get("orders") {
        Some(Value::Object(map)) => map.values().cloned().collect(),
        Some(Value::Array(items)) => items.clone(),
        _ => return Err(FetchError::InvalidStructure("No orders found in response".into())),
    };

    if orders.is_empty() {
        return Err(FetchError::NoOrders);
    }

    let well_formed = orders.iter().all(|order| {
        order
            .as_object()
            .is_some_and(|fields| ORDER_REQUIRED_FIELDS.iter().all(|key| fields.contains_key(*key)))
    });
    if !well_formed {
        return Err(FetchError::InvalidOrderStructure);
    }

    let summary = summarize_orders(&orders);
    Ok(json!({ "orders": orders, "summary": summary }))
}

/// Totals ads and finds the widest date range across orders, keeping the source's date strings.
pub fn summarize_orders(orders: &[Value]) -> OrdersSummary {
    let mut total_ads = 0u64;
    let mut earliest: Option<(chrono::NaiveDate, String)> = None;
    let mut latest: Option<(chrono::NaiveDate, String)> = None;

    for order in orders.iter().filter_map(Value::as_object) {
        total_ads = total_ads.saturating_add(order.get("totalAds").and_then(Value::as_u64).unwrap_or(0));

        let range = order.get("dateRange").and_then(Value::as_object);
        if let Some((date, raw)) = range_bound(range, "start") {
            if earliest.as_ref().is_none_or(|(current, _)| date < *current) {
                earliest = Some((date, raw));
            }
        }
        if let Some((date, raw)) = range_bound(range, "end") {
            if latest.as_ref().is_none_or(|(current, _)| date > *current) {
                latest = Some((date, raw));
            }
        }
    }

    let start = earliest.map(|(_, raw)| raw);
    let end = latest.map(|(_, raw)| raw);
    let display = match (&start, &end) {
        (Some(start), Some(end)) => Some(format!("{} - {}", format_display_date(start), format_display_date(end))),
        _ => None,
    };

    OrdersSummary {
        total_ads,
        order_count: orders.len(),
        date_range: SummaryRange { start, end, display },
    }
}

fn range_bound(range: Option<&Map<String, Value>>, key: &str) -> Option<(chrono::NaiveDate, String)> {
    let raw = range?.get(key)?.as_str()?;
    parse_date(raw).map(|date| (date, raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station_payload() -> Value {
        json!({
            "orders": {
                "1001": {
                    "orderNumber": "1001",
                    "dateRange": { "start": "02/01/25", "end": "02/28/25" },
                    "totalAds": 12,
                    "dailyBreakdown": [{ "date": "02/03/25", "adCount": 12, "adIDs": [] }]
                },
                "1002": {
                    "orderNumber": "1002",
                    "dateRange": { "start": "12/15/24", "end": "01/10/25" },
                    "totalAds": 8,
                    "dailyBreakdown": []
                }
            }
        })
    }

    #[test]
    fn actions_resolve_to_sources() {
        assert_eq!(SourceId::from_action("fetch_tvradio_ads"), Some(SourceId::Wkrl));
        assert_eq!(SourceId::from_action("fetch_google_ads"), Some(SourceId::GoogleAds));
        assert_eq!(SourceId::from_action("fetch_nothing"), None);
        for source in SourceId::ALL {
            assert_eq!(SourceId::from_action(source.action()), Some(source));
        }
        assert_eq!(SourceId::Wkrl.webhook_path(), "wkrl-data");
    }

    #[test]
    fn orders_are_flattened_and_summarized() {
        let validated = validate(SourceId::Wtla, station_payload()).unwrap();
        assert_eq!(validated["orders"].as_array().unwrap().len(), 2);
        assert_eq!(validated["orders"][0]["orderNumber"], "1001");
        assert_eq!(validated["summary"]["totalAds"], 20);
        assert_eq!(validated["summary"]["orderCount"], 2);
        assert_eq!(validated["summary"]["dateRange"]["start"], "12/15/24");
        assert_eq!(validated["summary"]["dateRange"]["end"], "02/28/25");
        assert_eq!(validated["summary"]["dateRange"]["display"], "Dec. 15th 2024 - Feb. 28th 2025");
    }

    #[test]
    fn order_payload_failures_are_typed() {
        let err = validate(SourceId::Wzun, json!({ "data": [] })).unwrap_err();
        assert_eq!(err.kind(), "invalid_structure");

        let err = validate(SourceId::Wzun, json!({ "orders": {} })).unwrap_err();
        assert_eq!(err.kind(), "no_orders");

        let err = validate(SourceId::Wzun, json!({ "orders": [{ "orderNumber": "1" }] })).unwrap_err();
        assert_eq!(err.kind(), "invalid_order_structure");
    }

    #[test]
    fn google_campaigns_require_campaigns_field() {
        assert!(validate(SourceId::GoogleAds, json!({ "campaigns": [] })).is_ok());
        let err = validate(SourceId::GoogleAds, json!({ "rows": [] })).unwrap_err();
        assert_eq!(err.kind(), "invalid_structure");
        assert!(validate(SourceId::FacebookAds, json!({ "rows": [] })).is_ok());
    }

    #[test]
    fn only_syracuse_has_stations() {
        assert_eq!(Region::SyracuseRochester.stations().len(), 4);
        assert!(Region::Albany.stations().is_empty());
    }
}
