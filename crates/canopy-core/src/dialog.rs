// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Open/close animation state machine for the settings dialog.
//!
//! ```text
//! closed --open()--> opening --transition end--> open
//! open   --close()-> closing --transition end--> closed
//! ```
//!
//! `open()` during `closing` re-enters `opening`; `close()` during `opening`
//! enters `closing`. A transition end outside `opening`/`closing` is stale and
//! ignored.

/// Dialog lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    /// Hidden, no modal semantics.
    #[default]
    Closed,
    /// Presented, enter animation running.
    Opening,
    /// Presented, settled.
    Open,
    /// Exit animation running; still modal until it completes.
    Closing,
}

impl DialogState {
    /// Whether the dialog counts as open for the user.
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Opening | Self::Open)
    }
}

/// View work the host must perform after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEffect {
    /// Show modally and start the enter animation.
    Present,
    /// Start the exit animation.
    BeginDismiss,
    /// Hide the backdrop and detach modal semantics.
    FinishDismiss,
}

/// Pure transition table; the panel maps effects onto its view.
#[derive(Debug, Default)]
pub struct DialogMachine {
    state: DialogState,
}

impl DialogMachine {
    /// Machine in [`DialogState::Closed`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> DialogState {
        self.state
    }

    /// Request the dialog open.
    pub fn open(&mut self) -> Option<DialogEffect> {
        match self.state {
            DialogState::Closed | DialogState::Closing => {
                self.state = DialogState::Opening;
                Some(DialogEffect::Present)
            }
            DialogState::Opening | DialogState::Open => None,
        }
    }

    /// Request the dialog close.
    pub fn close(&mut self) -> Option<DialogEffect> {
        match self.state {
            DialogState::Opening | DialogState::Open => {
                self.state = DialogState::Closing;
                Some(DialogEffect::BeginDismiss)
            }
            DialogState::Closed | DialogState::Closing => None,
        }
    }

    /// The dialog's animation completion signal fired.
    pub fn transition_finished(&mut self) -> Option<DialogEffect> {
        match self.state {
            DialogState::Opening => {
                self.state = DialogState::Open;
                None
            }
            DialogState::Closing => {
                self.state = DialogState::Closed;
                Some(DialogEffect::FinishDismiss)
            }
            DialogState::Closed | DialogState::Open => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle() {
        let mut m = DialogMachine::new();
        assert_eq!(m.open(), Some(DialogEffect::Present));
        assert_eq!(m.state(), DialogState::Opening);
        assert_eq!(m.transition_finished(), None);
        assert_eq!(m.state(), DialogState::Open);
        assert_eq!(m.close(), Some(DialogEffect::BeginDismiss));
        assert_eq!(m.state(), DialogState::Closing);
        assert_eq!(m.transition_finished(), Some(DialogEffect::FinishDismiss));
        assert_eq!(m.state(), DialogState::Closed);
    }

    #[test]
    fn open_then_immediate_close_waits_for_signal() {
        let mut m = DialogMachine::new();
        m.open();
        assert_eq!(m.close(), Some(DialogEffect::BeginDismiss));
        assert_eq!(m.state(), DialogState::Closing);
        assert_eq!(m.transition_finished(), Some(DialogEffect::FinishDismiss));
        assert_eq!(m.state(), DialogState::Closed);
    }

    #[test]
    fn reopen_during_close_ignores_stale_close_signal() {
        let mut m = DialogMachine::new();
        m.open();
        m.transition_finished();
        m.close();
        assert_eq!(m.open(), Some(DialogEffect::Present));
        // The enter animation's end settles the dialog open, never closed.
        assert_eq!(m.transition_finished(), None);
        assert_eq!(m.state(), DialogState::Open);
        assert_eq!(m.transition_finished(), None);
        assert!(m.state().is_open());
    }

    #[test]
    fn redundant_requests_are_noops() {
        let mut m = DialogMachine::new();
        assert_eq!(m.close(), None);
        assert_eq!(m.transition_finished(), None);
        m.open();
        assert_eq!(m.open(), None);
        m.close();
        assert_eq!(m.close(), None);
    }
}
