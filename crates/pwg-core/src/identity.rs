//! # Session Identity
//!
//! A guide session lives only in memory. The identifier exists so that log
//! lines and state dumps from the same session can be correlated.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one in-memory guide session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_display_prefix() {
        let id = SessionId::new();
        let s = id.to_string();
        assert!(s.starts_with("session:"));
        assert!(s.ends_with(&id.0.to_string()));
    }
}
