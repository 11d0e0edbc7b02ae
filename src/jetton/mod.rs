pub mod cache;
pub mod master;
pub mod offchain;
pub mod resolver;

pub use cache::ContentCache;
pub use master::{MasterData, get_master_by_wallet, get_master_data};
pub use offchain::{OffchainContent, fetch_offchain_content};
pub use resolver::{ContentResolver, ContentType, Resolution, ResolvedContent};
