//! Public-mint NFT page: connect a wallet, watch the minted count, mint.

pub mod blockchain;
pub mod config;
pub mod console;
pub mod lifecycle;
pub mod observability;
pub mod page;

pub use config::MinterConfig;
pub use page::{Intent, MintPage};
