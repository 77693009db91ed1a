use crate::config::Config;
use crate::errors::FetchError;
use crate::fetcher::WebhookClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub webhooks: WebhookClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let webhooks = WebhookClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            webhooks,
        })
    }
}
