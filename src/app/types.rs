//! Type definitions for the application state.
//!
//! - [`Alert`] - Modal message with an optional follow-up navigation

use super::navigation::NavAction;

/// A modal message. Dismissing it performs `then`, if set.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub then: Option<NavAction>,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            then: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }

    /// Navigate with `action` once dismissed.
    pub fn then(mut self, action: NavAction) -> Self {
        self.then = Some(action);
        self
    }
}
