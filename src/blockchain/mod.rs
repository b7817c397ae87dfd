pub mod etherscan;
pub mod traits;

pub use etherscan::EtherscanClient;
pub use traits::{Transaction, TransactionSource};
