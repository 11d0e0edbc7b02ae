//! Toncenter Client
//!
//! `ChainApi` over the public toncenter HTTP API. Get methods and masterchain
//! info use the v3 endpoints (typed stack entries); jetton data uses v2
//! `getTokenData`, which already decodes the TEP-64 content dictionary.

use async_trait::async_trait;
use num_bigint::{BigInt, BigUint, Sign};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use serde_with::{DisplayFromStr, serde_as};
use std::collections::HashMap;
use tonlib_core::TonAddress;

use super::{
    BlockInfo, ChainApi, ChainError, Content, JettonData, OnchainContent, TupleItem,
    parse_boc_base64,
};

const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Clone)]
pub struct ToncenterClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct MasterchainInfo {
    last: BlockHeader,
}

#[derive(Deserialize)]
struct BlockHeader {
    workchain: i32,
    shard: String,
    seqno: u32,
    root_hash: String,
    file_hash: String,
}

#[derive(Serialize)]
struct RunGetMethodRequest<'a> {
    address: String,
    method: &'a str,
    stack: Vec<StackEntry>,
    seqno: u32,
}

#[derive(Deserialize)]
struct RunGetMethodResponse {
    exit_code: i64,
    #[serde(default)]
    stack: Vec<StackEntry>,
}

#[derive(Serialize, Deserialize)]
struct StackEntry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: Value,
}

#[derive(Deserialize)]
struct V2Response<T> {
    ok: bool,
    result: Option<T>,
    error: Option<String>,
}

#[serde_as]
#[derive(Deserialize)]
struct TokenData {
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    total_supply: BigUint,
    #[serde(default)]
    mintable: bool,
    admin_address: Option<String>,
    jetton_content: Option<JettonContent>,
    contract_type: String,
}

#[derive(Deserialize)]
struct JettonContent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: Value,
}

impl ToncenterClient {
    pub fn new(http_client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header("accept", "application/json");
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ChainError> {
        let response = self.authorized(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            log::debug!("toncenter returned {}", status);
            return Err(ChainError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ChainApi for ToncenterClient {
    async fn current_masterchain_info(&self) -> Result<BlockInfo, ChainError> {
        let info: MasterchainInfo = self
            .send(self.http_client.get(self.url("v3/masterchainInfo")))
            .await?;

        Ok(BlockInfo {
            workchain: info.last.workchain,
            shard: info.last.shard,
            seqno: info.last.seqno,
            root_hash: info.last.root_hash,
            file_hash: info.last.file_hash,
        })
    }

    async fn run_get_method(
        &self,
        block: &BlockInfo,
        address: &TonAddress,
        method: &str,
        params: &[TupleItem],
    ) -> Result<Vec<TupleItem>, ChainError> {
        let stack = params
            .iter()
            .map(encode_param)
            .collect::<Result<Vec<_>, _>>()?;

        let request = RunGetMethodRequest {
            address: address.to_hex(),
            method,
            stack,
            seqno: block.seqno,
        };

        let response: RunGetMethodResponse = self
            .send(
                self.http_client
                    .post(self.url("v3/runGetMethod"))
                    .json(&request),
            )
            .await?;

        if response.exit_code != 0 {
            return Err(ChainError::ExitCode(response.exit_code));
        }

        response.stack.into_iter().map(decode_entry).collect()
    }

    async fn get_jetton_data(&self, master: &TonAddress) -> Result<JettonData, ChainError> {
        let response: V2Response<TokenData> = self
            .send(
                self.http_client
                    .get(self.url("v2/getTokenData"))
                    .query(&[("address", master.to_hex())]),
            )
            .await?;

        if !response.ok {
            return Err(ChainError::Api(
                response.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        let data = response
            .result
            .ok_or_else(|| ChainError::Api("empty result".to_string()))?;

        jetton_data(data)
    }
}

fn jetton_data(data: TokenData) -> Result<JettonData, ChainError> {
    if data.contract_type != "jetton_master" {
        return Err(ChainError::UnexpectedContract(data.contract_type));
    }

    let admin = match data.admin_address.as_deref() {
        Some(addr) if !addr.is_empty() => Some(addr.parse::<TonAddress>()?),
        _ => None,
    };

    let content = match data.jetton_content {
        Some(content) => decode_content(content),
        None => Content::Unknown,
    };

    Ok(JettonData {
        total_supply: data.total_supply,
        mintable: data.mintable,
        admin,
        content,
    })
}

fn decode_content(content: JettonContent) -> Content {
    match (content.kind.as_str(), content.data) {
        ("onchain", Value::Object(map)) => {
            let attributes: HashMap<String, String> = map
                .into_iter()
                .map(|(key, value)| {
                    let text = match value {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (key, text)
                })
                .collect();
            Content::from_onchain(OnchainContent::new(attributes))
        }
        ("offchain", Value::String(uri)) => Content::Offchain { uri },
        (kind, _) => {
            log::debug!("unrecognized jetton content type: {}", kind);
            Content::Unknown
        }
    }
}

fn encode_param(param: &TupleItem) -> Result<StackEntry, ChainError> {
    match param {
        TupleItem::Int(n) => {
            let value = match n.sign() {
                Sign::Minus => format!("-0x{:x}", n.magnitude()),
                _ => format!("0x{:x}", n.magnitude()),
            };
            Ok(StackEntry {
                kind: "num".to_string(),
                value: Value::String(value),
            })
        }
        TupleItem::Slice(_) => Err(ChainError::UnsupportedParam("slice")),
        TupleItem::Cell(_) => Err(ChainError::UnsupportedParam("cell")),
        TupleItem::Null => Err(ChainError::UnsupportedParam("null")),
        TupleItem::Other(_) => Err(ChainError::UnsupportedParam("other")),
    }
}

fn decode_entry(entry: StackEntry) -> Result<TupleItem, ChainError> {
    match entry.kind.as_str() {
        "num" => {
            let text = entry
                .value
                .as_str()
                .ok_or_else(|| ChainError::Stack(entry.value.to_string()))?;
            parse_num(text).map(TupleItem::Int)
        }
        "slice" | "cell" => {
            let boc = entry
                .value
                .as_str()
                .ok_or_else(|| ChainError::Stack(entry.value.to_string()))?;
            let cell = parse_boc_base64(boc)?;
            Ok(if entry.kind == "slice" {
                TupleItem::Slice(cell)
            } else {
                TupleItem::Cell(cell)
            })
        }
        "null" => Ok(TupleItem::Null),
        _ => Ok(TupleItem::Other(entry.kind)),
    }
}

fn parse_num(text: &str) -> Result<BigInt, ChainError> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let parsed = match digits.strip_prefix("0x") {
        Some(hex) => BigInt::parse_bytes(hex.as_bytes(), 16),
        None => BigInt::parse_bytes(digits.as_bytes(), 10),
    }
    .ok_or_else(|| ChainError::Stack(text.to_string()))?;

    Ok(if negative { -parsed } else { parsed })
}
