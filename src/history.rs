//! Message History
//!
//! The ordered chat log. Memory is the source of truth; every mutation is
//! written through to the store, and a failed write is only logged.

use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, MESSAGES_KEY};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single chat message, persisted verbatim as `{role, content}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Append-only message list bound to a store slot
#[derive(Debug)]
pub struct MessageHistory<S> {
    store: S,
    messages: Vec<Message>,
}

impl<S: KeyValueStore> MessageHistory<S> {
    /// Rehydrate from the store. Missing or unparsable data yields an empty list.
    pub fn load(store: S) -> Self {
        let messages = match store.get(MESSAGES_KEY) {
            Some(raw) => match serde_json::from_str::<Vec<Message>>(&raw) {
                Ok(messages) => messages,
                Err(e) => {
                    tracing::warn!("Discarding unreadable message history: {}", e);
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        tracing::debug!(count = messages.len(), "Loaded message history");
        Self { store, messages }
    }

    /// Append a message and persist the full list
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.persist();
    }

    /// Empty the list and delete the persisted slot
    pub fn clear(&mut self) {
        self.messages.clear();
        if let Err(e) = self.store.remove(MESSAGES_KEY) {
            tracing::warn!("Failed to remove persisted history: {}", e);
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
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

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.messages)
            .map_err(crate::error::StoreError::from)
            .and_then(|raw| self.store.set(MESSAGES_KEY, &raw));

        if let Err(e) = result {
            tracing::warn!("Failed to persist message history: {}", e);
        }
    }
}

impl<'a, S> IntoIterator for &'a MessageHistory<S> {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);

        let parsed: Message =
            serde_json::from_str(r#"{"role":"assistant","content":"hello"}"#).unwrap();
        assert_eq!(parsed, Message::assistant("hello"));
    }

    #[test]
    fn test_reload_roundtrip() {
        let store = MemoryStore::new();
        let mut history = MessageHistory::load(store.clone());
        history.push(Message::user("What failed?"));
        history.push(Message::assistant("Mostly timeouts."));
        history.push(Message::user("Where?"));

        let reloaded = MessageHistory::load(store);
        assert_eq!(reloaded.messages(), history.messages());
    }

    #[test]
    fn test_missing_slot_is_empty() {
        let history = MessageHistory::load(MemoryStore::new());
        assert!(history.is_empty());
    }

    #[test]
    fn test_corrupt_slot_degrades_to_empty() {
        let store = MemoryStore::new();
        store.set(MESSAGES_KEY, "[{\"role\":\"robot\"").unwrap();

        let history = MessageHistory::load(store.clone());
        assert!(history.is_empty());

        store.set(MESSAGES_KEY, "{\"not\":\"a list\"}").unwrap();
        assert!(MessageHistory::load(store).is_empty());
    }

    #[test]
    fn test_clear_removes_slot() {
        let store = MemoryStore::new();
        let mut history = MessageHistory::load(store.clone());
        history.push(Message::user("one"));
        assert!(store.contains(MESSAGES_KEY));

        history.clear();
        assert!(history.is_empty());
        assert!(!store.contains(MESSAGES_KEY));
        assert!(MessageHistory::load(store).is_empty());
    }
}
