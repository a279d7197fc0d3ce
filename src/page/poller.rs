//! Periodic minted-count refresh.
//!
//! Reads are serialized: a tick that fires while a read is still in flight
//! is skipped. The loop exits as soon as its [`ShutdownListener`] fires, even
//! mid-read.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::blockchain::transaction::MIN_POLL_INTERVAL;
use crate::blockchain::NftContract;
use crate::lifecycle::ShutdownListener;
use crate::observability::metrics;
use crate::page::state::{MintCount, UiState};

pub struct Poller {
    contract: NftContract,
    interval: Duration,
    state: UiState,
}

impl Poller {
    pub fn new(contract: NftContract, interval: Duration, state: UiState) -> Self {
        Self {
            contract,
            interval: interval.max(MIN_POLL_INTERVAL),
            state,
        }
    }

    pub fn spawn(self, stop: ShutdownListener) -> JoinHandle<()> {
        tokio::spawn(self.run(stop))
    }

    pub async fn run(self, mut stop: ShutdownListener) {
        tracing::debug!(
            contract = %self.contract.address(),
            interval_ms = self.interval.as_millis() as u64,
            "Minted-count poller starting"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !self.state.is_connected() {
                        continue;
                    }
                    tokio::select! {
                        _ = refresh(&self.contract, &self.state) => {}
                        _ = stop.recv() => break,
                    }
                }
                _ = stop.recv() => break,
            }
        }

        tracing::debug!("Minted-count poller stopped");
    }
}

/// Read the count once and publish it. Failures keep the previous value.
pub async fn refresh(contract: &NftContract, state: &UiState) {
    match contract.read_token_count().await {
        Ok(count) => {
            metrics::record_poll(true);
            metrics::record_minted_count(count);
            state.update(|s| {
                if !s.session.connected || s.minted == Some(MintCount(count)) {
                    return false;
                }
                s.minted = Some(MintCount(count));
                true
            });
        }
        Err(e) => {
            metrics::record_poll(false);
            tracing::warn!(error = %e, "Failed to read minted count");
        }
    }
}
