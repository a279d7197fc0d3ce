//! Rendering of the mint page.
//!
//! Pure functions of [`ViewState`]: the button the page shows (and the intent
//! pressing it dispatches), the minted counter line, and a text rendering.

use crate::page::state::{SessionPhase, ViewState};
use crate::page::Intent;

pub const CONNECT_PROMPT: &str = "Connect your wallet";
pub const CONNECT_LABEL: &str = "Connect wallet";
pub const LOADING_LABEL: &str = "Loading…";
pub const MINT_LABEL: &str = "Public Mint";

/// The page's single button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    /// `None` while a request is in flight.
    pub intent: Option<Intent>,
}

pub fn button(state: &ViewState) -> Button {
    match state.phase {
        SessionPhase::Disconnected => Button {
            label: CONNECT_LABEL,
            intent: Some(Intent::Connect),
        },
        SessionPhase::Connecting | SessionPhase::Minting => Button {
            label: LOADING_LABEL,
            intent: None,
        },
        SessionPhase::Connected => Button {
            label: MINT_LABEL,
            intent: Some(Intent::Mint),
        },
    }
}

pub fn minted_line(minted: u64, max_supply: u64) -> String {
    format!("{}/{} have been minted.", minted, max_supply)
}

/// The notice in `state` if it differs from the one last alerted.
pub fn fresh_notice<'a>(state: &'a ViewState, alerted: Option<&str>) -> Option<&'a str> {
    state.notice.as_deref().filter(|notice| Some(*notice) != alerted)
}

/// Text rendering of the page.
pub fn render(state: &ViewState) -> String {
    let mut lines = Vec::new();

    if let Some(notice) = &state.notice {
        lines.push(format!("!! {}", notice));
    }

    if state.session.connected {
        if let Some(account) = state.account {
            lines.push(format!("Account: {}", account));
        }
        let minted = state.minted.map(|m| m.0).unwrap_or(0);
        lines.push(minted_line(minted, state.max_supply));
    } else {
        lines.push(CONNECT_PROMPT.to_string());
    }

    lines.push(format!("[ {} ]", button(state).label));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::state::MintCount;
    use alloy::primitives::Address;

    fn connected_state() -> ViewState {
        let mut state = ViewState::new(10);
        state.begin_connecting();
        state.connected(Some(Address::ZERO));
        state
    }

    #[test]
    fn test_minted_line() {
        for value in [0u64, 1, 7, 10, 11, u64::MAX] {
            assert_eq!(
                minted_line(value, 10),
                format!("{}/10 have been minted.", value)
            );
        }
    }

    #[test]
    fn test_button_per_phase() {
        let mut state = ViewState::new(10);
        assert_eq!(button(&state).label, CONNECT_LABEL);
        assert_eq!(button(&state).intent, Some(Intent::Connect));

        state.begin_connecting();
        assert_eq!(button(&state).label, LOADING_LABEL);
        assert_eq!(button(&state).intent, None);

        state.connected(Some(Address::ZERO));
        assert_eq!(button(&state).label, MINT_LABEL);
        assert_eq!(button(&state).intent, Some(Intent::Mint));

        state.begin_minting();
        assert_eq!(button(&state).label, LOADING_LABEL);
        assert_eq!(button(&state).intent, None);
    }

    #[test]
    fn test_render_disconnected() {
        let text = render(&ViewState::new(10));
        assert!(text.contains(CONNECT_PROMPT));
        assert!(text.contains("[ Connect wallet ]"));
        assert!(!text.contains("have been minted"));
    }

    #[test]
    fn test_render_connected_with_count() {
        let mut state = connected_state();
        state.minted = Some(MintCount(4));
        let text = render(&state);
        assert!(text.contains("4/10 have been minted."));
        assert!(text.contains("[ Public Mint ]"));
        assert!(!text.contains(CONNECT_PROMPT));
    }

    #[test]
    fn test_render_notice() {
        let mut state = ViewState::new(10);
        state.connect_failed(Some("Please switch networks".to_string()));
        assert!(render(&state).starts_with("!! Please switch networks"));
    }

    #[test]
    fn test_notice_alerts_once() {
        let mut state = ViewState::new(10);
        assert_eq!(fresh_notice(&state, None), None);

        state.begin_connecting();
        state.connect_failed(Some("switch network".to_string()));
        assert_eq!(fresh_notice(&state, None), Some("switch network"));
        assert_eq!(fresh_notice(&state, Some("switch network")), None);

        state.notice = Some("switch to chain 80001".to_string());
        assert_eq!(
            fresh_notice(&state, Some("switch network")),
            Some("switch to chain 80001")
        );
    }
}
