//! The mint page: session ownership, intents, and UI state.
//!
//! # Data Flow
//! ```text
//! Intent::Connect
//!     → WalletConnector::connect → Capability::wrap → guard::guard
//!     → NftContract::bind → Poller (spawned, read-only binding)
//! Intent::Mint
//!     → MintAction::execute (loading flag set around it)
//! every step → UiState → view::render
//! ```
//!
//! Intent handlers log and swallow failures. The `try_*` variants return
//! them for callers that need the outcome.

pub mod mint;
pub mod poller;
pub mod state;
pub mod view;

use alloy::primitives::{Address, U256};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::blockchain::{
    guard, BlockchainError, Capability, ChainId, ConfirmationPolicy, ConfirmationStatus,
    NftContract, WalletConnector,
};
use crate::config::validation::validate_config;
use crate::config::{ConfigError, MinterConfig, ValidationError};
use crate::lifecycle::Shutdown;

pub use mint::MintAction;
pub use poller::Poller;
pub use state::{MintCount, Session, SessionPhase, UiState, ViewState};

use state::PhaseReset;

/// What the user asked the page to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Connect,
    Mint,
}

/// Errors from page-level operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("wallet is not connected")]
    NotConnected,

    #[error("a mint is already in progress")]
    MintInProgress,

    #[error(transparent)]
    Chain(#[from] BlockchainError),
}

/// A connected wallet session. Dropped on teardown.
struct ActiveSession {
    contract: NftContract,
    poller_stop: Shutdown,
    poller: JoinHandle<()>,
}

/// The single mint page.
pub struct MintPage {
    connector: Arc<dyn WalletConnector>,
    contract_address: Address,
    required_chain: ChainId,
    network_name: String,
    poll_interval: Duration,
    mint_action: MintAction,
    state: UiState,
    session: Mutex<Option<ActiveSession>>,
}

impl MintPage {
    /// Build the page. The connector is owned for the page's lifetime.
    /// Fails with [`ConfigError::Validation`] on any invalid setting.
    pub fn new(config: &MinterConfig, connector: Arc<dyn WalletConnector>) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let contract_address = config
            .contract
            .parsed_address()
            .map_err(|e| invalid("contract.address", e))?;
        let price = config
            .mint
            .price_wei()
            .map_err(|e| invalid("mint.price", e))?;

        Ok(Self {
            connector,
            contract_address,
            required_chain: ChainId(config.network.required_chain_id),
            network_name: config.network.name.clone(),
            poll_interval: config.poller.interval(),
            mint_action: MintAction::new(price, ConfirmationPolicy::from(&config.mint)),
            state: UiState::new(ViewState::new(config.contract.max_supply)),
            session: Mutex::new(None),
        })
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn view(&self) -> ViewState {
        self.state.snapshot()
    }

    pub fn mint_price(&self) -> U256 {
        self.mint_action.price()
    }

    /// Dispatch an intent, logging any failure.
    pub async fn dispatch(&self, intent: Intent) {
        match intent {
            Intent::Connect => self.connect().await,
            Intent::Mint => self.mint().await,
        }
    }

    /// Press the page's button: dispatch whatever it currently offers.
    pub async fn press(&self) {
        match view::button(&self.view()).intent {
            Some(intent) => self.dispatch(intent).await,
            None => tracing::debug!("Button pressed while busy, ignoring"),
        }
    }

    pub async fn connect(&self) {
        if let Err(e) = self.try_connect().await {
            tracing::error!(error = %e, "Failed to connect wallet");
        }
    }

    pub async fn mint(&self) {
        if let Err(e) = self.try_mint().await {
            tracing::error!(error = %e, "Mint failed");
        }
    }

    /// Connect the wallet and start polling. No-op when already connected.
    pub async fn try_connect(&self) -> Result<(), SessionError> {
        let mut session = self.session.lock().await;
        if session.is_some() {
            return Ok(());
        }

        self.state.update(|s| s.begin_connecting());
        let pending = PhaseReset::new(&self.state, |s| s.connect_failed(None));

        let capability = match self.open_capability().await {
            Ok(capability) => capability,
            Err(e) => {
                pending.disarm();
                let notice = match &e {
                    BlockchainError::WrongNetwork { expected, actual } => Some(format!(
                        "Please switch your wallet to {} (chain ID {}); it is on chain ID {}.",
                        self.network_name, expected, actual
                    )),
                    _ => None,
                };
                self.state.update(|s| {
                    s.connect_failed(notice);
                    true
                });
                return Err(e.into());
            }
        };

        let contract = NftContract::bind(self.contract_address, capability);
        let account = contract.capability().signer();
        pending.disarm();
        self.state.update(|s| {
            s.connected(account);
            true
        });

        let poller_stop = Shutdown::new();
        let poller = Poller::new(contract.read_only(), self.poll_interval, self.state.clone())
            .spawn(poller_stop.subscribe());

        tracing::info!(
            contract = %self.contract_address,
            chain_id = %self.required_chain,
            "Mint page connected"
        );

        *session = Some(ActiveSession {
            contract,
            poller_stop,
            poller,
        });
        Ok(())
    }

    async fn open_capability(&self) -> Result<Capability, BlockchainError> {
        let handle = self.connector.connect().await?;
        let capability = Capability::wrap(handle, true)?;
        guard::guard(capability, self.required_chain).await
    }

    /// Mint one token and wait for confirmation.
    ///
    /// The loading flag is cleared on every exit path, including when the
    /// returned future is dropped before it completes.
    pub async fn try_mint(&self) -> Result<ConfirmationStatus, SessionError> {
        let contract = {
            let session = self.session.lock().await;
            session
                .as_ref()
                .map(|active| active.contract.clone())
                .ok_or(SessionError::NotConnected)?
        };

        if !self.state.update(|s| s.begin_minting()) {
            return Err(SessionError::MintInProgress);
        }

        let result = {
            let _idle = PhaseReset::new(&self.state, ViewState::finish_minting);
            self.mint_action.execute(&contract).await
        };

        let status = result?;
        poller::refresh(&contract.read_only(), &self.state).await;
        Ok(status)
    }

    /// Page unload: stop polling and drop the session.
    pub async fn teardown(&self) {
        let active = self.session.lock().await.take();
        if let Some(active) = active {
            active.poller_stop.trigger();
            if let Err(e) = active.poller.await {
                tracing::warn!(error = %e, "Poller task ended abnormally");
            }
            tracing::info!("Mint page session closed");
        }
        self.state.update(|s| {
            s.disconnected();
            true
        });
    }
}

fn invalid(field: &'static str, message: String) -> ConfigError {
    ConfigError::Validation(vec![ValidationError {
        field,
        message,
    }])
}

impl std::fmt::Debug for MintPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MintPage")
            .field("contract_address", &self.contract_address)
            .field("required_chain", &self.required_chain)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}
