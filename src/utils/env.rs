use std::time::Duration;

use crate::constants::{
    CACHE_DEFAULT_TTL, CACHE_SWEEP_INTERVAL, CONTENT_CACHE_TTL, TONCENTER_API_URL,
};

#[derive(Clone, Debug)]
pub struct EnvVars {
    pub toncenter_api_url: String,
    pub toncenter_api_key: Option<String>,
    pub content_cache_ttl: Duration,
    pub cache_default_ttl: Duration,
    pub cache_sweep_interval: Duration,
}

impl Default for EnvVars {
    fn default() -> Self {
        Self {
            toncenter_api_url: std::env::var("TONCENTER_API_URL")
                .unwrap_or_else(|_| TONCENTER_API_URL.to_string()),
            toncenter_api_key: std::env::var("TONCENTER_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            content_cache_ttl: secs_var("CONTENT_CACHE_TTL_SECS").unwrap_or(CONTENT_CACHE_TTL),
            cache_default_ttl: secs_var("CACHE_DEFAULT_TTL_SECS").unwrap_or(CACHE_DEFAULT_TTL),
            cache_sweep_interval: secs_var("CACHE_SWEEP_INTERVAL_SECS")
                .unwrap_or(CACHE_SWEEP_INTERVAL),
        }
    }
}

fn secs_var(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
