//! UI state: the single container the view renders from.

use alloy::primitives::Address;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

/// Where the page is in the connect/mint lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Disconnected,
    Connecting,
    Connected,
    Minting,
}

/// What the page knows about the wallet session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    pub connected: bool,
    pub has_signer: bool,
}

/// Number of tokens issued so far, as last read from the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MintCount(pub u64);

/// Everything the view needs to render the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub phase: SessionPhase,
    pub session: Session,
    pub loading: bool,
    pub minted: Option<MintCount>,
    pub max_supply: u64,
    pub account: Option<Address>,
    /// User-facing notice (wrong network).
    pub notice: Option<String>,
}

impl ViewState {
    pub fn new(max_supply: u64) -> Self {
        Self {
            phase: SessionPhase::Disconnected,
            session: Session::default(),
            loading: false,
            minted: None,
            max_supply,
            account: None,
            notice: None,
        }
    }

    /// `Disconnected → Connecting`. Returns false from any other phase.
    pub fn begin_connecting(&mut self) -> bool {
        if self.phase != SessionPhase::Disconnected {
            return false;
        }
        self.phase = SessionPhase::Connecting;
        self.loading = true;
        self.notice = None;
        true
    }

    /// `Connecting → Connected`.
    pub fn connected(&mut self, account: Option<Address>) {
        self.phase = SessionPhase::Connected;
        self.session = Session {
            connected: true,
            has_signer: account.is_some(),
        };
        self.account = account;
        self.loading = false;
    }

    /// `Connecting → Disconnected`, keeping an optional notice.
    pub fn connect_failed(&mut self, notice: Option<String>) {
        self.phase = SessionPhase::Disconnected;
        self.session = Session::default();
        self.account = None;
        self.loading = false;
        self.notice = notice;
    }

    /// `Connected → Minting`. Returns false from any other phase.
    pub fn begin_minting(&mut self) -> bool {
        if self.phase != SessionPhase::Connected {
            return false;
        }
        self.phase = SessionPhase::Minting;
        self.loading = true;
        true
    }

    /// `Minting → Connected`.
    pub fn finish_minting(&mut self) {
        if self.phase == SessionPhase::Minting {
            self.phase = SessionPhase::Connected;
        }
        self.loading = false;
    }

    /// Page teardown: back to a fresh disconnected page.
    pub fn disconnected(&mut self) {
        *self = Self::new(self.max_supply);
    }
}

/// Shared handle to the page's [`ViewState`].
///
/// Writers mutate through [`UiState::update`]; renderers subscribe.
#[derive(Debug, Clone)]
pub struct UiState {
    tx: Arc<watch::Sender<ViewState>>,
}

impl UiState {
    pub fn new(initial: ViewState) -> Self {
        let (tx, _) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Apply `f`; subscribers are notified when it returns true.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut ViewState) -> bool,
    {
        self.tx.send_if_modified(f)
    }

    pub fn snapshot(&self) -> ViewState {
        self.tx.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.tx.borrow().session.connected
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.tx.subscribe()
    }
}

/// Undoes a transient phase if dropped while still armed.
///
/// Held across the awaits of a connect or mint so a caller that drops the
/// future (a timeout, a lost `select!` branch) cannot leave the page stuck
/// in `Connecting` or `Minting`.
pub(crate) struct PhaseReset<'a> {
    state: &'a UiState,
    reset: Option<fn(&mut ViewState)>,
}

impl<'a> PhaseReset<'a> {
    pub(crate) fn new(state: &'a UiState, reset: fn(&mut ViewState)) -> Self {
        Self {
            state,
            reset: Some(reset),
        }
    }

    /// The caller has settled the phase itself.
    pub(crate) fn disarm(mut self) {
        self.reset = None;
    }
}

impl Drop for PhaseReset<'_> {
    fn drop(&mut self) {
        if let Some(reset) = self.reset.take() {
            self.state.update(|s| {
                reset(s);
                true
            });
        }
    }
}
