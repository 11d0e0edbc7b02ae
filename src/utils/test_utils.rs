//! Test utilities
//!
//! Common setup shared by the unit test modules.

#[cfg(test)]
use crate::JettonState;

#[cfg(test)]
use crate::chain::ChainApi;

#[cfg(test)]
use std::sync::Arc;

/// Load environment files so locally configured overrides apply to tests.
#[cfg(test)]
pub fn load_test_env() {
    dotenvy::from_filename(".env").ok();
    dotenvy::from_filename(".env.test").ok();
}

/// Route `log` output through the test harness. Safe to call repeatedly.
#[cfg(test)]
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build state around `chain` with the environment's cache settings.
#[cfg(test)]
pub fn init_test_state(chain: Arc<dyn ChainApi>) -> JettonState {
    load_test_env();

    let env_vars = crate::utils::env::EnvVars::default();

    JettonState::new(reqwest::Client::new(), chain, env_vars)
}
