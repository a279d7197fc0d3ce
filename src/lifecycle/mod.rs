//! Lifecycle management.
//!
//! ```text
//! Ctrl-C (signals.rs) → MintPage::teardown → Shutdown::trigger (shutdown.rs)
//!     → poller task leaves its loop
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
