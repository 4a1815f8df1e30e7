//! Mocked ActionDispatcher for testing without the intervention API

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use pressure_scanner::{Action, ActionDispatcher, ActionKind, ActionOutcome};

/// Dispatcher that records every dispatched action and fails the
/// configured kinds
pub struct MockDispatcher {
    fail_kinds: HashSet<ActionKind>,
    dispatched: Arc<Mutex<Vec<ActionKind>>>,
}

impl MockDispatcher {
    pub fn new() -> Self {
        Self {
            fail_kinds: HashSet::new(),
            dispatched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(kinds: impl IntoIterator<Item = ActionKind>) -> Self {
        Self {
            fail_kinds: kinds.into_iter().collect(),
            dispatched: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle for inspecting dispatched actions after the runner owns self
    pub fn dispatched_handle(&self) -> Arc<Mutex<Vec<ActionKind>>> {
        Arc::clone(&self.dispatched)
    }
}

#[async_trait]
impl ActionDispatcher for MockDispatcher {
    async fn dispatch(&self, action: &Action) -> ActionOutcome {
        self.dispatched.lock().unwrap().push(action.action);

        if self.fail_kinds.contains(&action.action) {
            ActionOutcome {
                action: action.action,
                success: false,
                message: "simulated dispatch failure".to_string(),
            }
        } else {
            ActionOutcome {
                action: action.action,
                success: true,
                message: "ok".to_string(),
            }
        }
    }
}
