use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::database::Gateway;

/// Shared application state passed to all handlers.
///
/// Built once at startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<dyn Gateway>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig, gateway: Arc<dyn Gateway>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(config.github.user_agent.clone())
            .timeout(Duration::from_secs(config.github.timeout_secs))
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            gateway,
            http,
        })
    }
}
