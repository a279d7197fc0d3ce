//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! blockchain / page
//!     → logging.rs (structured tracing events, stderr)
//!     → metrics.rs (counters and gauges, optional Prometheus endpoint)
//! ```

pub mod logging;
pub mod metrics;
