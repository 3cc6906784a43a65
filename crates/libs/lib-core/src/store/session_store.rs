//! # Session Store
//!
//! Loads, saves and clears the persisted session. Storage failures never
//! reach the caller: a broken backend degrades to "nothing persisted" and is
//! logged. Corrupted records are wiped and reported as
//! [`Restored::Discarded`] so a warning can be shown.

use super::kv::KeyValueStorage;
use super::record::{LegacyValues, SessionRecord};
use super::token_store::TOKEN_KEY;
use crate::error::GuardianError;
use crate::model::Session;

/// Canonical key for the session record.
pub const SESSION_KEY: &str = "risk_guardian.session";

/// Per-field keys written by earlier builds. Read once, then removed.
pub const LEGACY_KEYS: [&str; 5] = ["walletAddress", "walletNetwork", "walletType", "demoMode", "showApp"];

/// Outcome of [`SessionRepository::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Restored {
    /// Nothing stored.
    Empty,
    Session(Session),
    /// A record existed but could not be trusted; storage has been cleared.
    Discarded(GuardianError),
}

impl Restored {
    pub fn session(&self) -> Session {
        match self {
            Restored::Session(session) => session.clone(),
            Restored::Empty | Restored::Discarded(_) => Session::Disconnected,
        }
    }
}

pub trait SessionRepository {
    fn load(&self) -> Restored;
    /// Persist `session`. Saving [`Session::Disconnected`] clears storage.
    fn save(&self, session: &Session);
    /// Remove the session, every legacy key and the API token.
    fn clear(&self);
}

impl<R: SessionRepository + ?Sized> SessionRepository for &R {
    fn load(&self) -> Restored {
        (**self).load()
    }

    fn save(&self, session: &Session) {
        (**self).save(session)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore<K> {
    storage: K,
}

impl<K: KeyValueStorage> SessionStore<K> {
    pub fn new(storage: K) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &K {
        &self.storage
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("[STORE] Failed to read '{}': {}", key, e);
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Err(e) = self.storage.remove(key) {
            log::warn!("[STORE] Failed to remove '{}': {}", key, e);
        }
    }

    fn remove_legacy(&self) {
        for key in LEGACY_KEYS {
            self.remove(key);
        }
    }

    fn read_legacy(&self) -> LegacyValues {
        LegacyValues {
            address: self.read("walletAddress"),
            network: self.read("walletNetwork"),
            wallet_type: self.read("walletType"),
            demo_mode: self.read("demoMode"),
        }
    }

    fn discard(&self, reason: String) -> Restored {
        log::warn!("[STORE] Discarding stored session: {}", reason);
        self.clear();
        Restored::Discarded(GuardianError::CorruptedState(reason))
    }

    fn restore_record(&self, record: SessionRecord, migrated: bool) -> Restored {
        match record.decode() {
            Ok(decoded) => {
                if decoded.repaired || migrated {
                    log::info!("[STORE] Rewriting stored session as canonical record");
                    self.save(&decoded.session);
                }
                if decoded.session.is_connected() {
                    Restored::Session(decoded.session)
                } else {
                    self.clear();
                    Restored::Empty
                }
            }
            Err(reason) => self.discard(reason),
        }
    }
}

impl<K: KeyValueStorage> SessionRepository for SessionStore<K> {
    fn load(&self) -> Restored {
        if let Some(raw) = self.read(SESSION_KEY) {
            return match serde_json::from_str::<SessionRecord>(&raw) {
                Ok(record) => self.restore_record(record, false),
                Err(e) => self.discard(format!("unreadable record: {}", e)),
            };
        }

        let legacy = self.read_legacy();
        if legacy.is_empty() {
            // A lone showApp flag means nothing without an address.
            self.remove_legacy();
            return Restored::Empty;
        }

        log::info!("[STORE] Migrating legacy session keys");
        match SessionRecord::from_legacy(&legacy) {
            Some(record) => self.restore_record(record, true),
            None => {
                // Leftover preferences without an account: nothing was lost.
                log::debug!("[STORE] Dropping legacy keys without a session");
                self.remove_legacy();
                Restored::Empty
            }
        }
    }

    fn save(&self, session: &Session) {
        let Some(record) = SessionRecord::from_session(session) else {
            self.clear();
            return;
        };

        match serde_json::to_string(&record) {
            Ok(json) => {
                if let Err(e) = self.storage.set(SESSION_KEY, &json) {
                    log::error!("[STORE] Failed to persist session: {}", e);
                }
            }
            Err(e) => log::error!("[STORE] Failed to encode session: {}", e),
        }
        self.remove_legacy();
    }

    fn clear(&self) {
        self.remove(SESSION_KEY);
        self.remove(TOKEN_KEY);
        self.remove_legacy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Network, StellarAddress, WalletKind, DEMO_ADDRESS};
    use crate::store::kv::{MemoryStorage, StorageError};
    use serde_json::{json, Value};

    const ADDR: &str = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";

    fn tracked() -> Session {
        Session::Tracked {
            address: StellarAddress::parse(ADDR).unwrap(),
            network: Network::Testnet,
        }
    }

    fn store() -> (SessionStore<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (SessionStore::new(storage.clone()), storage)
    }

    fn stored_record(storage: &MemoryStorage) -> Value {
        serde_json::from_str(&storage.get(SESSION_KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_save_then_load() {
        let (store, _) = store();
        store.save(&tracked());
        assert_eq!(store.load(), Restored::Session(tracked()));
    }

    #[test]
    fn test_clear_then_load_is_empty() {
        let (store, storage) = store();
        store.save(&tracked());
        storage.set(TOKEN_KEY, "jwt").unwrap();
        store.clear();
        assert_eq!(store.load(), Restored::Empty);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_saving_disconnected_clears() {
        let (store, storage) = store();
        store.save(&tracked());
        store.save(&Session::Disconnected);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_demo_record_holds_no_real_address() {
        let (store, storage) = store();
        store.save(&tracked());
        store.save(&Session::Demo { network: Network::Testnet });
        let record = stored_record(&storage);
        assert_eq!(record["address"], DEMO_ADDRESS);
        assert!(!storage.get(SESSION_KEY).unwrap().unwrap().contains(ADDR));
    }

    #[test]
    fn test_nested_address_is_repaired_and_rewritten() {
        let (store, storage) = store();
        let record = json!({
            "version": 1,
            "address": { "address": ADDR },
            "network": "testnet",
            "walletKind": "manual",
            "mode": "tracked",
            "demoActive": false,
            "showApp": true
        });
        storage.set(SESSION_KEY, &record.to_string()).unwrap();

        assert_eq!(store.load(), Restored::Session(tracked()));
        assert_eq!(stored_record(&storage)["address"], ADDR);
    }

    #[test]
    fn test_unreadable_record_is_discarded() {
        let (store, storage) = store();
        storage.set(SESSION_KEY, "{not json").unwrap();
        storage.set(TOKEN_KEY, "jwt").unwrap();

        assert!(matches!(store.load(), Restored::Discarded(GuardianError::CorruptedState(_))));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_object_without_address_is_discarded() {
        let (store, storage) = store();
        let record = json!({
            "address": { "foo": "bar" },
            "walletKind": "freighter",
            "mode": "connected"
        });
        storage.set(SESSION_KEY, &record.to_string()).unwrap();

        let restored = store.load();
        assert!(matches!(restored, Restored::Discarded(_)));
        assert_eq!(restored.session(), Session::Disconnected);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_legacy_keys_are_migrated() {
        let (store, storage) = store();
        storage.set("walletAddress", ADDR).unwrap();
        storage.set("walletNetwork", "testnet").unwrap();
        storage.set("walletType", "freighter").unwrap();
        storage.set("showApp", "true").unwrap();

        let expected = Session::Connected {
            address: StellarAddress::parse(ADDR).unwrap(),
            network: Network::Testnet,
            wallet: WalletKind::Freighter,
        };
        assert_eq!(store.load(), Restored::Session(expected));
        assert_eq!(storage.keys(), vec![SESSION_KEY.to_string()]);
    }

    #[test]
    fn test_legacy_demo_mode_is_migrated() {
        let (store, storage) = store();
        storage.set("walletAddress", ADDR).unwrap();
        storage.set("demoMode", "true").unwrap();

        assert_eq!(store.load(), Restored::Session(Session::Demo { network: Network::Testnet }));
        assert!(!storage.get(SESSION_KEY).unwrap().unwrap().contains(ADDR));
    }

    #[test]
    fn test_leftover_legacy_preferences_restore_empty() {
        let leftovers: [&[(&str, &str)]; 5] = [
            &[("walletNetwork", "testnet")],
            &[("walletType", "freighter")],
            &[("demoMode", "false")],
            &[("walletAddress", "  "), ("walletNetwork", "mainnet")],
            &[("demoMode", "false"), ("walletType", "xbull"), ("showApp", "true")],
        ];
        for keys in leftovers {
            let (store, storage) = store();
            for (key, value) in keys {
                storage.set(key, value).unwrap();
            }

            assert_eq!(store.load(), Restored::Empty, "{:?}", keys);
            assert!(storage.is_empty(), "{:?}", keys);
        }
    }

    #[test]
    fn test_unusable_legacy_address_is_discarded() {
        let (store, storage) = store();
        storage.set("walletAddress", "not-an-address").unwrap();
        storage.set("walletType", "manual").unwrap();

        assert!(matches!(store.load(), Restored::Discarded(GuardianError::CorruptedState(_))));
        assert!(storage.is_empty());
    }

    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError("denied".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError("quota exceeded".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError("denied".into()))
        }
    }

    #[test]
    fn test_broken_storage_degrades_silently() {
        let store = SessionStore::new(BrokenStorage);
        store.save(&tracked());
        store.clear();
        assert_eq!(store.load(), Restored::Empty);
    }
}
