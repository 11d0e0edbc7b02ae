pub mod chain;
pub mod constants;
pub mod error;
pub mod jetton;
pub mod utils;

use std::sync::Arc;
use tokio::task::JoinHandle;

use chain::{ChainApi, toncenter::ToncenterClient};
use tonlib_core::TonAddress;
use error::JettonError;
use jetton::{ContentCache, ContentResolver, MasterData};

pub struct JettonState {
    pub http_client: reqwest::Client,
    pub chain: Arc<dyn ChainApi>,
    pub resolver: ContentResolver,
    pub env_vars: utils::env::EnvVars,
    sweeper: JoinHandle<()>,
}

impl JettonState {
    /// Build state around an existing chain client. Must be called from within a
    /// Tokio runtime: the cache sweeper is spawned here and stopped on drop.
    pub fn new(
        http_client: reqwest::Client,
        chain: Arc<dyn ChainApi>,
        env_vars: utils::env::EnvVars,
    ) -> Self {
        let cache = ContentCache::new(env_vars.cache_default_ttl);
        let sweeper = cache.start_sweeper(env_vars.cache_sweep_interval);
        let resolver = ContentResolver::new(http_client.clone(), cache, env_vars.content_cache_ttl);

        Self {
            http_client,
            chain,
            resolver,
            env_vars,
            sweeper,
        }
    }

    pub async fn master_data(&self, master: &TonAddress) -> Result<MasterData, JettonError> {
        jetton::get_master_data(self.chain.as_ref(), &self.resolver, master).await
    }

    pub async fn master_by_wallet(&self, wallet: &TonAddress) -> Result<MasterData, JettonError> {
        jetton::get_master_by_wallet(self.chain.as_ref(), &self.resolver, wallet).await
    }
}

impl Drop for JettonState {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}

/// Initialize state backed by toncenter, configured from the environment.
pub async fn init_state() -> Result<JettonState, reqwest::Error> {
    let env_vars = utils::env::EnvVars::default();

    let http_client = reqwest::Client::builder().build()?;
    let chain = ToncenterClient::new(
        http_client.clone(),
        env_vars.toncenter_api_url.clone(),
        env_vars.toncenter_api_key.clone(),
    );

    log::info!(
        "Jetton metadata state ready (toncenter: {}, content ttl: {:?}, sweep every {:?})",
        env_vars.toncenter_api_url,
        env_vars.content_cache_ttl,
        env_vars.cache_sweep_interval
    );

    Ok(JettonState::new(http_client, Arc::new(chain), env_vars))
}
