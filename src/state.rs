use crate::config::Config;
use crate::portal::PortalClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub portal: PortalClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let portal = PortalClient::new(&config.portal_base_url, config.portal_timeout)?;
        Ok(Self {
            portal,
            config: Arc::new(config),
        })
    }
}
