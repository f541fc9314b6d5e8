use serde::Serialize;

use crate::constants::{ERROR_PREFIX, FALLBACK_MESSAGE};

/// Who produced a message in a conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
    Error,
}

impl Origin {
    pub fn label(&self) -> &'static str {
        match self {
            Origin::User => "You",
            Origin::Assistant => "Assistant",
            Origin::Error => "Error",
        }
    }
}

/// A single displayed conversation turn. Always plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub text: String,
    pub origin: Origin,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin::User,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            origin: Origin::Assistant,
        }
    }

    /// An application-level error reported by the backend, shown verbatim.
    pub fn backend_error(error: &str) -> Self {
        Self {
            text: format!("{}{}", ERROR_PREFIX, error),
            origin: Origin::Error,
        }
    }

    /// The fixed message shown when a request fails in transport or decoding.
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_MESSAGE.to_string(),
            origin: Origin::Error,
        }
    }
}

/// Append-only conversation log. The view follows the newest entry.
#[derive(Debug, Default, Clone)]
pub struct MessageLog {
    messages: Vec<Message>,
    // Index of the entry the view is pinned to.
    scroll_position: usize,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_position = self.messages.len() - 1;
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn scroll_position(&self) -> usize {
        self.scroll_position
    }
}
