use std::time::Duration;

pub const TONCENTER_API_URL: &str = "https://toncenter.com/api";

/// TTL applied to every off-chain document stored after a fetch.
pub const CONTENT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);
pub const CACHE_DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
pub const CACHE_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

pub const GET_WALLET_DATA: &str = "get_wallet_data";

// TEP-64 attribute keys
pub const ATTR_NAME: &str = "name";
pub const ATTR_SYMBOL: &str = "symbol";
pub const ATTR_DESCRIPTION: &str = "description";
pub const ATTR_IMAGE: &str = "image";
pub const ATTR_DECIMALS: &str = "decimals";
pub const ATTR_URI: &str = "uri";
