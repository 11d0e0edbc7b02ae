//! Off-chain Metadata Fetching
//!
//! Loads the JSON document a semichain or off-chain jetton points at.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::error::ContentError;

/// Metadata document served from a jetton's content URI. Missing fields decode
/// to their zero value.
#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OffchainContent {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
    /// Either a JSON number or a numeric string.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub decimals: i32,
}

/// Fetch and decode the metadata document at `uri`.
///
/// Issues exactly one GET request. Anything but `200 OK` is a
/// [`ContentError::Remote`]; a body that does not match [`OffchainContent`] is a
/// [`ContentError::Decode`].
pub async fn fetch_offchain_content(
    client: &Client,
    uri: &str,
) -> Result<OffchainContent, ContentError> {
    log::debug!("Fetching off-chain content from {}", uri);

    let response = client
        .get(uri)
        .header("accept", "application/json")
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(ContentError::Remote { status });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
