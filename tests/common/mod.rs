#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use base64::{Engine, prelude::BASE64_STANDARD};
use jetton_meta::chain::{BlockInfo, ChainApi, ChainError, Content, JettonData, TupleItem};
use jetton_meta::jetton::{ContentCache, ContentResolver};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tonlib_core::TonAddress;
use tonlib_core::cell::{ArcCell, BagOfCells, CellBuilder};

pub const TEST_DOCUMENT: &str =
    r#"{"name":"Test","symbol":"TST","description":"d","image":"i","decimals":9}"#;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Default)]
struct ServerState {
    documents: Arc<HashMap<String, String>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

/// Local HTTP server serving metadata documents under `/meta/{name}`.
/// Unknown names get a 404; `/slow` never answers in time.
pub struct MetadataServer {
    addr: SocketAddr,
    state: ServerState,
    handle: JoinHandle<()>,
}

impl MetadataServer {
    pub async fn start() -> Self {
        Self::start_with(Router::new()).await
    }

    /// Start with extra routes merged in (e.g. a fake chain API).
    pub async fn start_with(extra: Router) -> Self {
        let documents: HashMap<String, String> = [
            ("test.json", TEST_DOCUMENT),
            (
                "semi.json",
                r#"{"name":"Semi Token","symbol":"SEMI","description":"semichain","image":"https://img.example/semi.png"}"#,
            ),
            ("broken.json", r#"{"name": "Broken""#),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let state = ServerState {
            documents: Arc::new(documents),
            hits: Arc::default(),
        };

        let app = Router::new()
            .route("/meta/{name}", get(serve_document))
            .route("/slow", get(slow))
            .with_state(state.clone())
            .merge(extra);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        MetadataServer {
            addr,
            state,
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn document_url(&self, name: &str) -> String {
        self.url(&format!("/meta/{}", name))
    }

    pub fn hits(&self, name: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or(0)
    }
}

impl Drop for MetadataServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_document(State(state): State<ServerState>, Path(name): Path<String>) -> Response {
    *state.hits.lock().unwrap().entry(name.clone()).or_default() += 1;

    match state.documents.get(&name) {
        Some(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn slow() -> &'static str {
    tokio::time::sleep(Duration::from_secs(30)).await;
    TEST_DOCUMENT
}

pub fn resolver(content_ttl: Duration) -> ContentResolver {
    ContentResolver::new(
        reqwest::Client::new(),
        ContentCache::new(Duration::from_secs(300)),
        content_ttl,
    )
}

/// In-memory chain with fixed jetton contents and wallet get-method results.
#[derive(Default)]
pub struct MockChain {
    pub jettons: HashMap<String, Content>,
    pub wallets: HashMap<String, Vec<TupleItem>>,
    pub jetton_calls: AtomicUsize,
}

impl MockChain {
    pub fn with_jetton(mut self, master: &TonAddress, content: Content) -> Self {
        self.jettons.insert(master.to_hex(), content);
        self
    }

    pub fn with_wallet(mut self, wallet: &TonAddress, stack: Vec<TupleItem>) -> Self {
        self.wallets.insert(wallet.to_hex(), stack);
        self
    }

    pub fn jetton_calls(&self) -> usize {
        self.jetton_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainApi for MockChain {
    async fn current_masterchain_info(&self) -> Result<BlockInfo, ChainError> {
        Ok(BlockInfo {
            workchain: -1,
            shard: "8000000000000000".to_string(),
            seqno: 42,
            root_hash: String::new(),
            file_hash: String::new(),
        })
    }

    async fn run_get_method(
        &self,
        block: &BlockInfo,
        address: &TonAddress,
        method: &str,
        _params: &[TupleItem],
    ) -> Result<Vec<TupleItem>, ChainError> {
        assert_eq!(block.seqno, 42);
        if method != "get_wallet_data" {
            return Err(ChainError::ExitCode(11));
        }
        self.wallets
            .get(&address.to_hex())
            .cloned()
            .ok_or_else(|| ChainError::Api(format!("account {} not found", address)))
    }

    async fn get_jetton_data(&self, master: &TonAddress) -> Result<JettonData, ChainError> {
        self.jetton_calls.fetch_add(1, Ordering::SeqCst);
        let content = self
            .jettons
            .get(&master.to_hex())
            .cloned()
            .ok_or_else(|| ChainError::Api(format!("account {} not found", master)))?;

        Ok(JettonData {
            total_supply: 1_000_000_000u64.into(),
            mintable: true,
            admin: None,
            content,
        })
    }
}

/// Basechain address whose hash is `byte` repeated.
pub fn address(byte: u8) -> TonAddress {
    TonAddress::from_hex_str(&format!("0:{}", format!("{:02x}", byte).repeat(32))).unwrap()
}

/// Cell holding `addr` as `addr_std`.
pub fn address_cell(addr: &TonAddress) -> ArcCell {
    let cell = CellBuilder::new()
        .store_address(addr)
        .unwrap()
        .build()
        .unwrap();
    Arc::new(cell)
}

/// Cell holding the low `bits` bits of `value`.
pub fn bits_cell(bits: usize, value: u8) -> ArcCell {
    let cell = CellBuilder::new()
        .store_u8(bits, value)
        .unwrap()
        .build()
        .unwrap();
    Arc::new(cell)
}

/// `addr` as a base64 bag of cells, the way toncenter returns stack slices.
pub fn address_boc_base64(addr: &TonAddress) -> String {
    let boc = BagOfCells::from_root(address_cell(addr).as_ref().clone());
    BASE64_STANDARD.encode(boc.serialize(false).unwrap())
}
