//! Events emitted by the session for the presentation layer.

use serde::Serialize;

use huddle_shared::{Message, MessageId};

/// A state change the presentation layer should render.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum SessionEvent {
    /// The message list changed.  Carries the full ordered snapshot,
    /// newest-first, plus the ids of locally sent messages not yet echoed
    /// by the remote store.
    MessagesChanged {
        messages: Vec<Message>,
        pending: Vec<MessageId>,
    },

    /// A remote write failed and was abandoned.  The message remains in
    /// the local snapshot, still marked pending.  No retry is attempted.
    SendFailed { id: MessageId },
}
