//! Jetton Master Data
//!
//! Assembles the unified token record for a jetton master, either directly
//! from its address or starting from one of its wallets.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use tonlib_core::TonAddress;

use super::resolver::{ContentResolver, ContentType, Resolution};
use crate::chain::{ChainApi, TupleItem, load_address};
use crate::constants::GET_WALLET_DATA;
use crate::error::JettonError;

#[serde_as]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MasterData {
    /// Serialized in the bounceable user-friendly form.
    #[serde_as(as = "DisplayFromStr")]
    pub address: TonAddress,
    pub content_type: Option<ContentType>,
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
    pub decimals: i32,
    pub resolution: Resolution,
}

/// Fetch and resolve master data for the jetton master at `master`.
///
/// Chain failures are fatal. Off-chain content failures are not: the record
/// comes back with empty display fields and a [`Resolution::Partial`].
///
/// If the resolved decimals are not a base-10 integer the call returns
/// [`JettonError::DecimalsParse`], which still carries the populated record
/// (with `decimals` at zero).
pub async fn get_master_data(
    api: &dyn ChainApi,
    resolver: &ContentResolver,
    master: &TonAddress,
) -> Result<MasterData, JettonError> {
    let data = api
        .get_jetton_data(master)
        .await
        .map_err(JettonError::chain("get jetton data"))?;

    let resolved = resolver.resolve(&data.content).await;

    let parsed = resolved.decimals.parse::<i32>();

    let master_data = MasterData {
        address: master.clone(),
        content_type: resolved.content_type,
        name: resolved.name,
        symbol: resolved.symbol,
        description: resolved.description,
        image: resolved.image,
        decimals: parsed.as_ref().copied().unwrap_or(0),
        resolution: resolved.resolution,
    };

    match parsed {
        Ok(_) => Ok(master_data),
        Err(source) => {
            log::error!("convert decimals for {}: {}", master, source);
            Err(JettonError::DecimalsParse {
                master_data: Box::new(master_data),
                source,
            })
        }
    }
}

/// Resolve the jetton master behind `wallet` and fetch its master data.
///
/// Runs `get_wallet_data` on the wallet and decodes every slice in the result
/// as an address. The last one wins: the result is ordered balance, owner,
/// master, wallet code.
pub async fn get_master_by_wallet(
    api: &dyn ChainApi,
    resolver: &ContentResolver,
    wallet: &TonAddress,
) -> Result<MasterData, JettonError> {
    let block = api
        .current_masterchain_info()
        .await
        .map_err(JettonError::chain("get current masterchain info"))?;

    let stack = api
        .run_get_method(&block, wallet, GET_WALLET_DATA, &[])
        .await
        .map_err(JettonError::chain("run get method"))?;

    let mut master = None;
    for item in stack {
        if let TupleItem::Slice(cell) = item {
            master = Some(load_address(&cell)?);
        }
    }

    let master = master.ok_or(JettonError::MissingMasterAddress)?;
    log::debug!("Wallet {} belongs to jetton master {}", wallet, master);

    get_master_data(api, resolver, &master).await
}
