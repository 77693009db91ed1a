use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(default)]
    pub date: String,
    #[serde(rename = "adCount", default)]
    pub ad_count: u64,
    #[serde(rename = "adIDs", alias = "adIdentifiers", default)]
    pub ad_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub total_ads: u64,
    #[serde(default)]
    pub daily_breakdown: Vec<DailyRecord>,
}

/// Broadcast station payload. `orders` may arrive keyed by order number or as a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrdersPayload {
    #[serde(default, deserialize_with = "orders_in_source_order")]
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeeklySpend {
    #[serde(default)]
    pub week: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spend: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub spend: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub budget: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub impressions: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub clicks: f64,
    #[serde(default)]
    pub weekly_breakdown: Vec<WeeklySpend>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignsPayload {
    #[serde(default, deserialize_with = "campaigns_leniently")]
    pub campaigns: Vec<Campaign>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Column,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SeriesKind,
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub week_labels: Vec<String>,
    pub series: Vec<AggregatedSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRange {
    pub start: Option<String>,
    pub end: Option<String>,
    /// `"Jan. 8th 2024 - Feb. 3rd 2024"`, when both ends are known.
    pub display: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersSummary {
    pub total_ads: u64,
    pub order_count: usize,
    pub date_range: SummaryRange,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub campaigns: Vec<Campaign>,
    pub total_spend: f64,
    pub weekly_data: Vec<AggregatedSeries>,
}

fn orders_in_source_order<'de, D>(deserializer: D) -> Result<Vec<Order>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Vec<Value> = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, order)| order).collect(),
        _ => Vec::new(),
    };
    Ok(keep_parseable(items, "order"))
}

fn campaigns_leniently<'de, D>(deserializer: D) -> Result<Vec<Campaign>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    Ok(keep_parseable(items, "campaign"))
}

/// A record that fails to parse is logged and dropped; its siblings survive.
fn keep_parseable<T: DeserializeOwned>(items: Vec<Value>, what: &str) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!("skipping malformed {what}: {err}");
                None
            }
        })
        .collect()
}

/// Numbers may arrive as JSON numbers or numeric strings (`"12.50"`); null reads as zero.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| de::Error::custom(format!("number {number} out of range"))),
        Value::String(text) if text.trim().is_empty() => Ok(0.0),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, got \"{text}\""))),
        Value::Null => Ok(0.0),
        other => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
