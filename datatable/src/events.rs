//! Interaction results.

/// Result of handling a user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// The interaction had no effect (control absent, disabled or out of range).
    Ignored,
    /// The interaction changed state or reached a host callback.
    Consumed,
}

impl EventResult {
    /// Check if the interaction was handled.
    pub fn is_handled(&self) -> bool {
        !matches!(self, EventResult::Ignored)
    }
}

impl From<bool> for EventResult {
    fn from(handled: bool) -> Self {
        if handled {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}
