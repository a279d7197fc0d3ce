//! Metrics collection and exposition.
//!
//! # Metrics
//! - `minter_polls_total` (counter): minted-count reads by outcome
//! - `minter_minted_count` (gauge): last minted count read from the contract
//! - `minter_mints_total` (counter): mint attempts by outcome
//! - `minter_rpc_health` (gauge): 1=last RPC request reached the node, 0=not
//!
//! Without an installed recorder every call is a no-op.

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_poll(success: bool) {
    let outcome = if success { "ok" } else { "error" };
    counter!("minter_polls_total", "outcome" => outcome).increment(1);
}

pub fn record_minted_count(count: u64) {
    gauge!("minter_minted_count").set(count as f64);
}

/// `outcome` is one of "confirmed", "reverted", "rejected", "error".
pub fn record_mint(outcome: &'static str) {
    counter!("minter_mints_total", "outcome" => outcome).increment(1);
}

pub fn record_rpc_health(healthy: bool) {
    gauge!("minter_rpc_health").set(if healthy { 1.0 } else { 0.0 });
}
