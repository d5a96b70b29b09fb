use crate::percent::ZeroTotal;
use crate::portal::DEFAULT_BASE_URL;
use std::{env, time::Duration};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub portal_base_url: String,
    pub portal_timeout: Duration,
    pub zero_total: ZeroTotal,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8080);

        let portal_base_url = lookup("PORTAL_BASE_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let portal_timeout = lookup("PORTAL_TIMEOUT_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(15));

        let zero_total = match lookup("ZERO_TOTAL_POLICY") {
            Some(value) => ZeroTotal::parse(&value).unwrap_or_else(|| {
                warn!("unknown ZERO_TOTAL_POLICY '{value}', using 'last'");
                ZeroTotal::default()
            }),
            None => ZeroTotal::default(),
        };

        Self {
            port,
            portal_base_url,
            portal_timeout,
            zero_total,
        }
    }
}
