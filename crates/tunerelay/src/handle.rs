use std::sync::{Arc, Mutex, OnceLock};

use tunerelay_core::config::RelayConfig;

use crate::budget::BudgetExceeded;

/// The owning reference to the live session.
///
/// Goes `Inert` exactly once, when the teardown command executes; every
/// access afterwards reports the absence instead of reaching a dead session.
pub(crate) enum SessionSlot<T: ?Sized> {
    Active(Arc<T>),
    Inert,
}

/// State shared between the execution loop and the inline re-entrant path.
///
/// Both run on the execution thread; the mutex keeps the slot sound for the
/// proxy clones that hold this state from other threads without touching it.
pub(crate) struct RelayState<T: ?Sized> {
    pub(crate) config: RelayConfig,
    fatal: OnceLock<BudgetExceeded>,
    slot: Mutex<SessionSlot<T>>,
}

impl<T: ?Sized> RelayState<T> {
    pub(crate) fn new(config: RelayConfig, session: Arc<T>) -> Self {
        Self {
            config,
            fatal: OnceLock::new(),
            slot: Mutex::new(SessionSlot::Active(session)),
        }
    }

    pub(crate) fn session(&self) -> Option<Arc<T>> {
        match &*self.slot.lock().expect("session slot lock poisoned") {
            SessionSlot::Active(session) => Some(Arc::clone(session)),
            SessionSlot::Inert => None,
        }
    }

    pub(crate) fn set_inert(&self) {
        *self.slot.lock().expect("session slot lock poisoned") = SessionSlot::Inert;
    }

    pub(crate) fn is_inert(&self) -> bool {
        matches!(
            *self.slot.lock().expect("session slot lock poisoned"),
            SessionSlot::Inert
        )
    }

    /// Latches the first hard-budget violation; the loop checks it after
    /// every command, so a violation on the inline path still kills the
    /// relay.
    pub(crate) fn poison(&self, violation: BudgetExceeded) {
        let _ = self.fatal.set(violation);
    }

    pub(crate) fn fatal(&self) -> Option<BudgetExceeded> {
        self.fatal.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tunerelay_core::config::RelayConfig;

    use super::RelayState;
    use crate::budget::BudgetExceeded;

    #[test]
    fn slot_goes_inert_once_and_stays_there() {
        let state: RelayState<str> = RelayState::new(RelayConfig::default(), Arc::from("session"));
        assert!(!state.is_inert());
        assert_eq!(state.session().as_deref(), Some("session"));
        state.set_inert();
        assert!(state.is_inert());
        assert!(state.session().is_none());
        state.set_inert();
        assert!(state.is_inert());
    }

    #[test]
    fn only_the_first_violation_is_kept() {
        let state: RelayState<str> = RelayState::new(RelayConfig::default(), Arc::from("session"));
        assert!(state.fatal().is_none());
        state.poison(BudgetExceeded {
            command: "tune",
            elapsed_ms: 2400,
            budget_ms: 2000,
        });
        state.poison(BudgetExceeded {
            command: "set_main",
            elapsed_ms: 6000,
            budget_ms: 5000,
        });
        let violation = state.fatal().expect("latched violation");
        assert_eq!(violation.command, "tune");
    }
}
