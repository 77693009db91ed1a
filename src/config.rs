use crate::aggregate::DEFAULT_TOP_CAMPAIGNS;
use std::{env, time::Duration};
use tracing::warn;

pub const WEBHOOK_BASE_URL: &str = "https://automation.magnawebservices.com/webhook";
pub const DEFAULT_NONCE: &str = "dashboard_nonce";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL the per-source webhook paths are appended to (WEBHOOK_BASE_URL).
    pub webhook_base_url: String,
    /// Shared token every dashboard request must echo back (DASHBOARD_NONCE).
    pub nonce: String,
    pub webhook_timeout: Duration,
    /// Campaigns charted per ad platform (TOP_CAMPAIGNS).
    pub top_campaigns: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let nonce = env::var("DASHBOARD_NONCE").unwrap_or_else(|_| {
            warn!("DASHBOARD_NONCE not set, using the development nonce");
            DEFAULT_NONCE.to_string()
        });

        Self {
            port: parse_or("PORT", DEFAULT_PORT),
            webhook_base_url: env::var("WEBHOOK_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| WEBHOOK_BASE_URL.to_string()),
            nonce,
            webhook_timeout: Duration::from_secs(parse_or("WEBHOOK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            top_campaigns: parse_or("TOP_CAMPAIGNS", DEFAULT_TOP_CAMPAIGNS),
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}
