//! Content Resolution
//!
//! Turns the content stored by a jetton master into display fields. On-chain
//! content is read directly; semichain and off-chain content pull the
//! referenced document through the cache. A failed fetch never fails the
//! resolution: the result keeps whatever the chain itself provided and records
//! why the rest is missing.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::cache::ContentCache;
use super::offchain::{OffchainContent, fetch_offchain_content};
use crate::chain::Content;
use crate::constants::{ATTR_DECIMALS, ATTR_DESCRIPTION, ATTR_IMAGE, ATTR_NAME, ATTR_SYMBOL};
use crate::error::ContentError;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Onchain,
    Semichain,
    Offchain,
}

/// How completely a content variant could be resolved.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Resolved,
    /// The off-chain document could not be loaded; only on-chain fields are set.
    Partial { reason: String },
    Unrecognized,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedContent {
    pub content_type: Option<ContentType>,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
    /// Decimals exactly as found; parsed by the caller.
    pub decimals: String,
    pub resolution: Resolution,
}

impl ResolvedContent {
    fn empty(content_type: Option<ContentType>, resolution: Resolution) -> Self {
        Self {
            content_type,
            name: String::new(),
            symbol: String::new(),
            description: String::new(),
            image: String::new(),
            decimals: String::new(),
            resolution,
        }
    }

    fn with_document(content_type: ContentType, doc: OffchainContent, decimals: String) -> Self {
        Self {
            content_type: Some(content_type),
            name: doc.name,
            symbol: doc.symbol,
            description: doc.description,
            image: doc.image,
            decimals,
            resolution: Resolution::Resolved,
        }
    }
}

#[derive(Clone)]
pub struct ContentResolver {
    http_client: Client,
    cache: ContentCache,
    content_ttl: Duration,
}

impl ContentResolver {
    pub fn new(http_client: Client, cache: ContentCache, content_ttl: Duration) -> Self {
        Self {
            http_client,
            cache,
            content_ttl,
        }
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub async fn resolve(&self, content: &Content) -> ResolvedContent {
        match content {
            Content::Onchain(onchain) => ResolvedContent {
                content_type: Some(ContentType::Onchain),
                name: onchain.attribute(ATTR_NAME).to_string(),
                symbol: onchain.attribute(ATTR_SYMBOL).to_string(),
                description: onchain.attribute(ATTR_DESCRIPTION).to_string(),
                image: onchain.attribute(ATTR_IMAGE).to_string(),
                decimals: onchain.attribute(ATTR_DECIMALS).to_string(),
                resolution: Resolution::Resolved,
            },
            Content::Semichain { uri, onchain } => {
                // decimals live on-chain for semichain content whatever the fetch does
                let decimals = onchain.attribute(ATTR_DECIMALS).to_string();

                match self.cached_offchain_content(uri).await {
                    Ok(doc) => ResolvedContent::with_document(ContentType::Semichain, doc, decimals),
                    Err(e) => {
                        log::error!("fetch cached offchain content: {}", e);
                        ResolvedContent {
                            decimals,
                            ..ResolvedContent::empty(
                                Some(ContentType::Semichain),
                                Resolution::Partial {
                                    reason: e.to_string(),
                                },
                            )
                        }
                    }
                }
            }
            Content::Offchain { uri } => match self.cached_offchain_content(uri).await {
                Ok(doc) => {
                    let decimals = doc.decimals.to_string();
                    ResolvedContent::with_document(ContentType::Offchain, doc, decimals)
                }
                Err(e) => {
                    log::error!("fetch cached offchain content: {}", e);
                    ResolvedContent::empty(
                        Some(ContentType::Offchain),
                        Resolution::Partial {
                            reason: e.to_string(),
                        },
                    )
                }
            },
            Content::Unknown => {
                log::error!("unknown content type");
                ResolvedContent::empty(None, Resolution::Unrecognized)
            }
        }
    }

    /// Serve the document at `uri` from cache, fetching and caching it on a miss.
    pub async fn cached_offchain_content(&self, uri: &str) -> Result<OffchainContent, ContentError> {
        if let Some(cached) = self.cache.get(uri).await {
            log::debug!("Cache hit for {}", uri);
            return Ok(cached);
        }

        let content = fetch_offchain_content(&self.http_client, uri).await?;

        self.cache
            .set(uri, content.clone(), self.content_ttl)
            .await;
        log::debug!("Cached content for {}: {:?}", uri, content);

        Ok(content)
    }
}
