//! Blockchain Access
//!
//! The `ChainApi` trait is the boundary between master-data assembly and
//! whatever talks to the TON network. `toncenter` provides an HTTP-backed
//! implementation; tests supply in-memory ones.

pub mod cell;
pub mod toncenter;

use std::collections::HashMap;

use async_trait::async_trait;
use num_bigint::{BigInt, BigUint};
use reqwest::StatusCode;
use tonlib_core::cell::{ArcCell, TonCellError};
use tonlib_core::{TonAddress, TonAddressParseError};

pub use cell::{AddressError, load_address, parse_boc_base64};

use crate::constants::ATTR_URI;

#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("api error: {0}")]
    Api(String),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("get method exited with code {0}")]
    ExitCode(i64),
    #[error("malformed stack entry: {0}")]
    Stack(String),
    #[error("unsupported get method parameter: {0}")]
    UnsupportedParam(&'static str),
    #[error("expected a jetton master, got {0}")]
    UnexpectedContract(String),
    #[error("invalid address: {0}")]
    Address(#[from] TonAddressParseError),
    #[error("invalid bag of cells: {0}")]
    Cell(#[from] TonCellError),
}

/// Masterchain block a get method is executed against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    pub workchain: i32,
    pub shard: String,
    pub seqno: u32,
    pub root_hash: String,
    pub file_hash: String,
}

/// One entry of a get-method result stack. TVM integers are 257-bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TupleItem {
    Int(BigInt),
    Slice(ArcCell),
    Cell(ArcCell),
    Null,
    Other(String),
}

/// TEP-64 on-chain content dictionary, decoded to text values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OnchainContent {
    attributes: HashMap<String, String>,
}

impl OnchainContent {
    pub fn new(attributes: HashMap<String, String>) -> Self {
        Self { attributes }
    }

    /// Value of `name`, or the empty string when the key is absent.
    pub fn attribute(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }
}

impl<K, V> FromIterator<(K, V)> for OnchainContent
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Token content as stored by the jetton master.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Onchain(OnchainContent),
    Semichain { uri: String, onchain: OnchainContent },
    Offchain { uri: String },
    Unknown,
}

impl Content {
    /// Classify an on-chain dictionary: a `uri` key makes it semichain.
    pub fn from_onchain(onchain: OnchainContent) -> Self {
        match onchain.attributes.get(ATTR_URI) {
            Some(uri) => Content::Semichain {
                uri: uri.clone(),
                onchain,
            },
            None => Content::Onchain(onchain),
        }
    }
}

/// Result of the jetton master's `get_jetton_data`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JettonData {
    pub total_supply: BigUint,
    pub mintable: bool,
    pub admin: Option<TonAddress>,
    pub content: Content,
}

#[async_trait]
pub trait ChainApi: Send + Sync {
    async fn current_masterchain_info(&self) -> Result<BlockInfo, ChainError>;

    async fn run_get_method(
        &self,
        block: &BlockInfo,
        address: &TonAddress,
        method: &str,
        params: &[TupleItem],
    ) -> Result<Vec<TupleItem>, ChainError>;

    async fn get_jetton_data(&self, master: &TonAddress) -> Result<JettonData, ChainError>;
}
