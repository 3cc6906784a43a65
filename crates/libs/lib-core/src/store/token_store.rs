use super::kv::KeyValueStorage;

/// Key of the API bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// The optional bearer token sent to the risk API.
///
/// The token is written under [`TOKEN_KEY`] by the external sign-in flow;
/// this side only reads it and clears it on disconnect.
#[derive(Debug, Clone, Default)]
pub struct TokenStore<K> {
    storage: K,
}

impl<K: KeyValueStorage> TokenStore<K> {
    pub fn new(storage: K) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("[STORE] Failed to read token: {}", e);
                None
            }
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            log::warn!("[STORE] Failed to remove token: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStorage;

    #[test]
    fn test_token_lifecycle() {
        let storage = MemoryStorage::new();
        let tokens = TokenStore::new(storage.clone());
        assert_eq!(tokens.get(), None);
        storage.set(TOKEN_KEY, "jwt").unwrap();
        assert_eq!(tokens.get().as_deref(), Some("jwt"));
        tokens.clear();
        assert_eq!(tokens.get(), None);
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn test_empty_token_reads_as_none() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "").unwrap();
        assert_eq!(TokenStore::new(storage).get(), None);
    }
}
