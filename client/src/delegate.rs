//! Auth-token delegate.
//!
//! The client keeps only a `Weak` handle to its delegate. The owner decides
//! how long the delegate lives; once it is dropped the client behaves as if
//! it never had one.

use std::sync::{PoisonError, RwLock};

/// Source of the current bearer token.
///
/// Implementations synchronize their own state; the client may read the token
/// from several in-flight calls at once.
pub trait ClientDelegate: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: Option<String>);
}

/// In-memory delegate holding a single token.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }
}

impl ClientDelegate for TokenStore {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_store_reads_back_what_was_set() {
        let store = TokenStore::default();
        assert_eq!(store.token(), None);
        store.set_token(Some("abc".to_string()));
        assert_eq!(store.token().as_deref(), Some("abc"));
        store.set_token(None);
        assert_eq!(store.token(), None);
    }
}
