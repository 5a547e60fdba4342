//! In-memory session state and its transition rules.
//!
//! The message list is kept newest-first by `created_at`.  Remote
//! snapshots are authoritative: a delivered snapshot replaces the list
//! wholesale, except that locally sent messages the remote has not echoed
//! yet (pending) are overlaid until they appear in a snapshot.

use std::collections::HashSet;

use huddle_shared::{Author, Draft, Message, MessageId};

/// Message list state owned by one chat session.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Ordered snapshot, newest-first.
    messages: Vec<Message>,
    /// Ids of locally sent messages not yet present in a remote snapshot.
    pending: HashSet<MessageId>,
}

impl SessionState {
    /// Start from a cached snapshot.  Cached messages are never pending:
    /// they already round-tripped through the remote store in a previous
    /// session.
    pub fn new(initial: Vec<Message>) -> Self {
        Self {
            messages: initial,
            pending: HashSet::new(),
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pending_ids(&self) -> Vec<MessageId> {
        self.pending.iter().copied().collect()
    }

    pub fn is_pending(&self, id: MessageId) -> bool {
        self.pending.contains(&id)
    }

    /// Finalize each draft and prepend it, newest-first.  Returns the
    /// finalized messages in the order they were supplied, all marked
    /// pending.
    pub fn append_drafts(&mut self, drafts: Vec<Draft>, author: &Author) -> Vec<Message> {
        let mut sent = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let message = draft.finalize(author.clone());
            self.pending.insert(message.id);
            self.messages.insert(0, message.clone());
            sent.push(message);
        }
        sent
    }

    /// Apply an authoritative remote snapshot.
    ///
    /// The delivered list replaces the state.  Pending messages it does
    /// not contain are re-inserted at their timestamp position; pending
    /// messages it does contain are confirmed and unmarked.
    pub fn apply_remote_snapshot(&mut self, remote: Vec<Message>) {
        let remote_ids: HashSet<MessageId> = remote.iter().map(|m| m.id).collect();
        self.pending.retain(|id| !remote_ids.contains(id));

        let overlay: Vec<Message> = self
            .messages
            .iter()
            .filter(|m| self.pending.contains(&m.id))
            .cloned()
            .collect();

        let mut next = remote;
        next.extend(overlay);
        // The remote list is already newest-first; the stable sort only
        // slots the overlaid messages in.
        next.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.messages = next;
    }

    /// Drop everything, including pending markers.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.pending.clear();
    }
}
