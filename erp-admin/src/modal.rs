//! Modal host contract.
//!
//! Screens open and close modals by id. Stacking, focus and markup belong
//! to the host.

use std::sync::{Arc, Mutex};

pub trait ModalHost: Send + Sync {
    fn open(&self, id: &str);
    fn close(&self, id: &str);
}

/// Tracks open modals in memory, most recent last.
///
/// Clones share the same stack.
#[derive(Debug, Clone, Default)]
pub struct ModalStack {
    open: Arc<Mutex<Vec<String>>>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open
            .lock()
            .map(|stack| stack.iter().any(|m| m == id))
            .unwrap_or(false)
    }

    /// The most recently opened modal.
    pub fn top(&self) -> Option<String> {
        self.open.lock().ok().and_then(|stack| stack.last().cloned())
    }
}

impl ModalHost for ModalStack {
    fn open(&self, id: &str) {
        log::debug!("Opening modal {}", id);
        if let Ok(mut stack) = self.open.lock() {
            stack.retain(|m| m != id);
            stack.push(id.to_string());
        }
    }

    fn close(&self, id: &str) {
        log::debug!("Closing modal {}", id);
        if let Ok(mut stack) = self.open.lock() {
            stack.retain(|m| m != id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reopen_moves_to_top() {
        let modals = ModalStack::new();
        modals.open("detail");
        modals.open("confirm");
        modals.open("detail");
        assert_eq!(modals.top().as_deref(), Some("detail"));

        modals.close("detail");
        assert_eq!(modals.top().as_deref(), Some("confirm"));
        assert!(!modals.is_open("detail"));
    }
}
