use reqwest::StatusCode;
use std::num::ParseIntError;

use crate::chain::{AddressError, ChainError};
use crate::jetton::master::MasterData;

/// Failure while loading an off-chain metadata document. Never surfaces from
/// master-data lookups; the resolver degrades to on-chain fields instead.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("do get request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected response status code: {status}")]
    Remote { status: StatusCode },
    #[error("unmarshal response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum JettonError {
    #[error("{context}: {source}")]
    ChainQuery {
        context: &'static str,
        #[source]
        source: ChainError,
    },
    #[error("load master address: {0}")]
    AddressDecode(#[from] AddressError),
    #[error("wallet data holds no master address")]
    MissingMasterAddress,
    /// Decimals were not a base-10 integer. `master_data` is still fully
    /// resolved, with `decimals` left at zero.
    #[error("convert decimals: {source}")]
    DecimalsParse {
        master_data: Box<MasterData>,
        #[source]
        source: ParseIntError,
    },
}

impl JettonError {
    pub(crate) fn chain(context: &'static str) -> impl FnOnce(ChainError) -> Self {
        move |source| JettonError::ChainQuery { context, source }
    }

    /// Best-effort record that accompanies a decimals parse failure.
    pub fn partial_master_data(&self) -> Option<&MasterData> {
        match self {
            JettonError::DecimalsParse { master_data, .. } => Some(master_data.as_ref()),
            _ => None,
        }
    }

    pub fn into_partial_master_data(self) -> Option<MasterData> {
        match self {
            JettonError::DecimalsParse { master_data, .. } => Some(*master_data),
            _ => None,
        }
    }
}
