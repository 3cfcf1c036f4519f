use serde::Serialize;
use tracing::{debug, warn};

use crate::prefs::PreferenceStore;

pub const CARD_CLOSED_KEY: &str = "productCardClosed";

/// Something whose viewport pointer input can be switched on and off.
pub trait ViewportGate {
    fn set_viewport_interactive(&mut self, interactive: bool);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CardState {
    pub is_closed: bool,
    pub is_mobile_layout: bool,
}

impl CardState {
    pub fn is_open(&self) -> bool {
        !self.is_closed
    }

    /// Floating button that brings a closed card back (phone layout only).
    pub fn reopen_affordance_visible(&self) -> bool {
        self.is_closed && self.is_mobile_layout
    }

    pub fn scroll_locked(&self) -> bool {
        self.is_open() && self.is_mobile_layout
    }

    /// An open card covers the viewport on phones; on desktop it never does.
    pub fn blocks_viewport(&self) -> bool {
        self.is_open() && self.is_mobile_layout
    }
}

pub struct CardController<S> {
    state: CardState,
    store: S,
}

impl<S: PreferenceStore> CardController<S> {
    /// Reads the persisted flag. Anything other than `"true"`, including a failed
    /// read, starts the card open.
    pub fn load(store: S, mobile: bool) -> Self {
        let is_closed = match store.get(CARD_CLOSED_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(error = %err, "could not read card preference, using default");
                false
            }
        };
        Self {
            state: CardState {
                is_closed,
                is_mobile_layout: mobile,
            },
            store,
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Brings the gate in line with the current state.
    pub fn sync_gate<G: ViewportGate>(&self, gate: &mut G) {
        gate.set_viewport_interactive(!self.state.blocks_viewport());
    }

    pub fn close<G: ViewportGate>(&mut self, gate: &mut G) {
        self.state.is_closed = true;
        self.persist();
        gate.set_viewport_interactive(true);
        debug!(mobile = self.state.is_mobile_layout, "product card closed");
    }

    pub fn open<G: ViewportGate>(&mut self, gate: &mut G) {
        self.state.is_closed = false;
        self.persist();
        if self.state.is_mobile_layout {
            gate.set_viewport_interactive(false);
        }
        debug!(mobile = self.state.is_mobile_layout, "product card opened");
    }

    pub fn toggle<G: ViewportGate>(&mut self, gate: &mut G) {
        if self.state.is_closed {
            self.open(gate);
        } else {
            self.close(gate);
        }
    }

    fn persist(&mut self) {
        let value = if self.state.is_closed { "true" } else { "false" };
        if let Err(err) = self.store.set(CARD_CLOSED_KEY, value) {
            warn!(error = %err, "could not save card preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;
    use crate::{Error, Result};

    #[derive(Default)]
    struct Gate {
        interactive: Option<bool>,
    }

    impl ViewportGate for Gate {
        fn set_viewport_interactive(&mut self, interactive: bool) {
            self.interactive = Some(interactive);
        }
    }

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::Storage("disabled".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("disabled".to_string()))
        }
    }

    #[test]
    fn starts_open_without_a_stored_flag() {
        let card = CardController::load(MemoryStore::new(), false);
        assert!(card.state().is_open());
    }

    #[test]
    fn stored_true_starts_closed() {
        let card = CardController::load(MemoryStore::with_value(CARD_CLOSED_KEY, "true"), true);
        assert!(card.state().is_closed);
        assert!(card.state().reopen_affordance_visible());

        let card = CardController::load(MemoryStore::with_value(CARD_CLOSED_KEY, "true"), false);
        assert!(!card.state().reopen_affordance_visible());
    }

    #[test]
    fn only_the_exact_string_true_counts() {
        let card = CardController::load(MemoryStore::with_value(CARD_CLOSED_KEY, "TRUE"), true);
        assert!(card.state().is_open());
    }

    #[test]
    fn close_twice_matches_close_once() -> Result<()> {
        let mut gate = Gate::default();
        let mut once = CardController::load(MemoryStore::new(), true);
        once.close(&mut gate);
        let mut twice = CardController::load(MemoryStore::new(), true);
        twice.close(&mut gate);
        twice.close(&mut gate);
        assert_eq!(once.state(), twice.state());
        assert_eq!(twice.store().get(CARD_CLOSED_KEY)?, Some("true".to_string()));
        Ok(())
    }

    #[test]
    fn open_and_close_gate_the_viewport_on_mobile() -> Result<()> {
        let mut gate = Gate::default();
        let mut card = CardController::load(MemoryStore::new(), true);
        card.close(&mut gate);
        assert_eq!(gate.interactive, Some(true));
        assert!(!card.state().scroll_locked());
        card.open(&mut gate);
        assert_eq!(gate.interactive, Some(false));
        assert!(card.state().scroll_locked());
        assert_eq!(card.store().get(CARD_CLOSED_KEY)?, Some("false".to_string()));
        Ok(())
    }

    #[test]
    fn desktop_open_never_blocks_the_viewport() {
        let mut gate = Gate::default();
        let mut card = CardController::load(MemoryStore::new(), false);
        card.open(&mut gate);
        assert_eq!(gate.interactive, None);
        card.sync_gate(&mut gate);
        assert_eq!(gate.interactive, Some(true));
    }

    #[test]
    fn storage_failures_are_contained() {
        let mut gate = Gate::default();
        let mut card = CardController::load(BrokenStore, true);
        assert!(card.state().is_open());
        card.close(&mut gate);
        assert!(card.state().is_closed);
        card.toggle(&mut gate);
        assert!(card.state().is_open());
    }
}
