//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! minter.toml
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → MinterConfig (validated, immutable)
//!     → handed to MintPage and the connector at startup
//! ```
//!
//! # Design Decisions
//! - All fields have defaults; a minimal config only names the contract
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ContractConfig, MintConfig, MinterConfig, NetworkConfig, ObservabilityConfig, PollerConfig,
    WalletConfig,
};
pub use validation::ValidationError;
