pub mod rpc;
pub mod wallet;

pub use rpc::SolanaClient;
pub use wallet::{KeypairFile, WalletError, WalletManager};
