//! Session Identity
//!
//! One opaque token per storage context, created on first use and reused
//! until the storage is wiped. It correlates chat turns on the backend and
//! carries no authority.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, SESSION_KEY};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Client-generated session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Reuse the stored id verbatim, or mint one and write it back
    ///
    /// A failed write is logged; the fresh id is still used for this process.
    pub fn load_or_create<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        if let Some(saved) = store.get(SESSION_KEY) {
            if !saved.trim().is_empty() {
                return Self(saved);
            }
        }

        let id = Self::generate();
        if let Err(e) = store.set(SESSION_KEY, id.as_str()) {
            tracing::warn!("Failed to persist session id: {}", e);
        }
        tracing::debug!(session_id = %id, "Created new session");
        id
    }

    /// Fresh random base-36 token (122 random bits)
    pub fn generate() -> Self {
        Self(to_base36(uuid::Uuid::new_v4().as_u128()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(25);
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
