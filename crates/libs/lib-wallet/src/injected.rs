//! # Injected Extensions
//!
//! Freighter and xBull inject a global object into the page. Their APIs have
//! changed shape across versions (method names, reply formats), so every
//! extension is described by an [`ExtensionProfile`] listing the globals to
//! look under and the method names to try, in order. [`InjectedAdapter`]
//! does the trying.
//!
//! Reply shapes seen in the wild:
//!
//! ```text
//! "GABC..."                              bare string
//! { "address": "GABC..." }               Freighter v2+
//! { "publicKey": "GABC..." }             xBull, older Freighter
//! { "account": { "address": "GABC..." }} nested
//! { "error": "User declined access" }    refusal
//! ```

use async_trait::async_trait;
use lib_core::model::address_from_json;
use lib_core::{GuardianError, Result, WalletKind};
use serde_json::Value;

/// A page global exposed by an extension.
#[async_trait(?Send)]
pub trait InjectedObject {
    fn has_method(&self, name: &str) -> bool;

    /// Invoke a zero-argument method and await its reply if it is a promise.
    /// The error is whatever message the extension threw.
    async fn call(&self, method: &str) -> std::result::Result<Value, String>;
}

/// Where injected globals are looked up (`window` in the browser).
pub trait GlobalScope {
    type Object: InjectedObject;

    fn lookup(&self, name: &str) -> Option<Self::Object>;
}

impl<G: GlobalScope + ?Sized> GlobalScope for &G {
    type Object = G::Object;

    fn lookup(&self, name: &str) -> Option<Self::Object> {
        (**self).lookup(name)
    }
}

/// How to find and drive one extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionProfile {
    pub kind: WalletKind,
    /// Candidate global names, most specific first.
    pub globals: &'static [&'static str],
    /// A candidate counts only if it has at least one of these.
    pub expected_methods: &'static [&'static str],
    pub connected_methods: &'static [&'static str],
    pub access_methods: &'static [&'static str],
    pub address_methods: &'static [&'static str],
}

pub const FREIGHTER: ExtensionProfile = ExtensionProfile {
    kind: WalletKind::Freighter,
    globals: &["freighterApi", "freighter"],
    expected_methods: &["requestAccess", "getAddress", "getPublicKey", "isConnected"],
    // `isConnected` only reports that the extension is installed.
    connected_methods: &["isAllowed"],
    access_methods: &["requestAccess", "connect", "enable"],
    address_methods: &["getAddress", "getPublicKey"],
};

pub const XBULL: ExtensionProfile = ExtensionProfile {
    kind: WalletKind::XBull,
    globals: &["xBullSDK", "xBull", "xbull"],
    expected_methods: &["connect", "getPublicKey", "getAddress"],
    connected_methods: &["isConnected"],
    access_methods: &["connect", "requestAccess", "enable"],
    address_methods: &["getPublicKey", "getAddress"],
};

impl ExtensionProfile {
    pub fn for_kind(kind: WalletKind) -> Option<&'static ExtensionProfile> {
        match kind {
            WalletKind::Freighter => Some(&FREIGHTER),
            WalletKind::XBull => Some(&XBULL),
            _ => None,
        }
    }

    pub fn all() -> [&'static ExtensionProfile; 2] {
        [&FREIGHTER, &XBULL]
    }
}

/// Pull the account id out of an extension reply.
///
/// Returns `None` for refusals (`{"error": ...}`) and for replies without a
/// usable string.
pub fn normalize_address_reply(reply: &Value) -> Option<String> {
    if reply_error(reply).is_some() {
        return None;
    }
    address_from_json(reply)
}

/// The refusal message carried by a reply, if any.
fn reply_error(reply: &Value) -> Option<String> {
    match reply.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(
            other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        ),
    }
}

/// `true` or `{ "<method>": true }`.
fn reply_is_truthy(method: &str, reply: &Value) -> bool {
    match reply {
        Value::Bool(b) => *b,
        Value::Object(map) => map.get(method).and_then(Value::as_bool) == Some(true),
        _ => false,
    }
}

/// [`WalletAdapter`](crate::WalletAdapter) for any injected extension.
#[derive(Debug, Clone)]
pub struct InjectedAdapter<S> {
    scope: S,
    profile: &'static ExtensionProfile,
}

impl<S: GlobalScope> InjectedAdapter<S> {
    pub fn new(scope: S, profile: &'static ExtensionProfile) -> Self {
        Self { scope, profile }
    }

    pub fn for_kind(scope: S, kind: WalletKind) -> Option<Self> {
        ExtensionProfile::for_kind(kind).map(|profile| Self::new(scope, profile))
    }

    pub fn profile(&self) -> &'static ExtensionProfile {
        self.profile
    }

    /// First candidate global that looks like the extension.
    fn find(&self) -> Option<S::Object> {
        self.profile.globals.iter().find_map(|name| {
            self.scope
                .lookup(name)
                .filter(|obj| self.profile.expected_methods.iter().any(|m| obj.has_method(m)))
        })
    }

    fn require(&self) -> Result<S::Object> {
        self.find().ok_or(GuardianError::NotInstalled { wallet: self.profile.kind })
    }

    fn not_authorized(&self, reason: impl Into<String>) -> GuardianError {
        GuardianError::NotAuthorized {
            wallet: self.profile.kind,
            reason: reason.into(),
        }
    }
}

#[async_trait(?Send)]
impl<S: GlobalScope> crate::WalletAdapter for InjectedAdapter<S> {
    fn kind(&self) -> WalletKind {
        self.profile.kind
    }

    fn detect(&self) -> bool {
        self.find().is_some()
    }

    async fn is_connected(&self) -> bool {
        let Some(obj) = self.find() else {
            return false;
        };
        for method in self.profile.connected_methods {
            if !obj.has_method(method) {
                continue;
            }
            match obj.call(method).await {
                Ok(reply) => return reply_is_truthy(method, &reply),
                Err(e) => log::debug!("[CONNECT] {}.{} failed: {}", self.profile.kind, method, e),
            }
        }
        false
    }

    async fn request_access(&self) -> Result<Option<String>> {
        let obj = self.require()?;
        let mut last_error = None;

        for method in self.profile.access_methods {
            if !obj.has_method(method) {
                continue;
            }
            log::debug!("[CONNECT] Requesting access via {}.{}", self.profile.kind, method);
            match obj.call(method).await {
                Ok(reply) => match reply_error(&reply) {
                    None => return Ok(normalize_address_reply(&reply).filter(|a| !a.trim().is_empty())),
                    Some(e) => last_error = Some(e),
                },
                Err(e) => last_error = Some(e),
            }
        }

        Err(self.not_authorized(last_error.unwrap_or_else(|| "no access method available".to_string())))
    }

    async fn get_address(&self) -> Result<String> {
        let obj = self.require()?;
        let mut last_error = None;

        for method in self.profile.address_methods {
            if !obj.has_method(method) {
                continue;
            }
            match obj.call(method).await {
                Ok(reply) => {
                    if let Some(address) = normalize_address_reply(&reply) {
                        return Ok(address);
                    }
                    last_error = Some(reply_error(&reply).unwrap_or_else(|| "empty address".to_string()));
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(self.not_authorized(last_error.unwrap_or_else(|| "no address method available".to_string())))
    }
}

/// Scripted page globals for tests.
#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default)]
    pub struct FakeObject {
        replies: HashMap<&'static str, std::result::Result<Value, String>>,
        pub calls: Rc<RefCell<Vec<String>>>,
    }

    impl FakeObject {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(mut self, method: &'static str, reply: Value) -> Self {
            self.replies.insert(method, Ok(reply));
            self
        }

        pub fn throw(mut self, method: &'static str, error: &str) -> Self {
            self.replies.insert(method, Err(error.to_string()));
            self
        }
    }

    #[async_trait(?Send)]
    impl InjectedObject for FakeObject {
        fn has_method(&self, name: &str) -> bool {
            self.replies.contains_key(name)
        }

        async fn call(&self, method: &str) -> std::result::Result<Value, String> {
            self.calls.borrow_mut().push(method.to_string());
            self.replies
                .get(method)
                .cloned()
                .unwrap_or_else(|| Err(format!("{} is not a function", method)))
        }
    }

    /// Globals can be added later, like an extension finishing injection.
    #[derive(Debug, Clone, Default)]
    pub struct FakeScope {
        globals: Rc<RefCell<HashMap<String, FakeObject>>>,
    }

    impl FakeScope {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(self, name: &str, object: FakeObject) -> Self {
            self.inject(name, object);
            self
        }

        pub fn inject(&self, name: &str, object: FakeObject) {
            self.globals.borrow_mut().insert(name.to_string(), object);
        }
    }

    impl GlobalScope for FakeScope {
        type Object = FakeObject;

        fn lookup(&self, name: &str) -> Option<FakeObject> {
            self.globals.borrow().get(name).cloned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{FakeObject, FakeScope};
    use super::*;
    use crate::WalletAdapter;
    use serde_json::json;

    const ADDR: &str = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";

    #[test]
    fn test_normalize_address_reply() {
        assert_eq!(normalize_address_reply(&json!(ADDR)).as_deref(), Some(ADDR));
        assert_eq!(normalize_address_reply(&json!({ "address": ADDR })).as_deref(), Some(ADDR));
        assert_eq!(normalize_address_reply(&json!({ "publicKey": ADDR })).as_deref(), Some(ADDR));
        assert_eq!(
            normalize_address_reply(&json!({ "account": { "address": ADDR } })).as_deref(),
            Some(ADDR)
        );
        assert_eq!(normalize_address_reply(&json!({ "address": "", "error": "denied" })), None);
        assert_eq!(normalize_address_reply(&json!({ "address": ADDR, "error": null })).as_deref(), Some(ADDR));
        assert_eq!(normalize_address_reply(&json!(null)), None);
    }

    #[test]
    fn test_detect_requires_expected_method() {
        let scope = FakeScope::new().with("freighter", FakeObject::new());
        let adapter = InjectedAdapter::new(scope.clone(), &FREIGHTER);
        assert!(!adapter.detect());

        scope.inject("freighterApi", FakeObject::new().reply("getAddress", json!(ADDR)));
        assert!(adapter.detect());
    }

    #[test]
    fn test_detect_falls_back_to_later_globals() {
        let scope = FakeScope::new().with("xbull", FakeObject::new().reply("connect", json!(true)));
        assert!(InjectedAdapter::new(scope, &XBULL).detect());
    }

    #[tokio::test]
    async fn test_request_access_tries_methods_in_order() {
        let obj = FakeObject::new()
            .throw("requestAccess", "requestAccess is broken")
            .reply("connect", json!({ "error": "User declined" }))
            .reply("enable", json!(true));
        let calls = obj.calls.clone();
        let adapter = InjectedAdapter::new(FakeScope::new().with("freighterApi", obj), &FREIGHTER);

        adapter.request_access().await.unwrap();
        assert_eq!(*calls.borrow(), vec!["requestAccess", "connect", "enable"]);
    }

    #[tokio::test]
    async fn test_request_access_exhausted_is_not_authorized() {
        let obj = FakeObject::new().reply("requestAccess", json!({ "error": "User declined access" }));
        let adapter = InjectedAdapter::new(FakeScope::new().with("freighterApi", obj), &FREIGHTER);

        match adapter.request_access().await {
            Err(GuardianError::NotAuthorized { wallet, reason }) => {
                assert_eq!(wallet, WalletKind::Freighter);
                assert_eq!(reason, "User declined access");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_address_falls_back() {
        let obj = FakeObject::new()
            .reply("getAddress", json!({ "address": "" }))
            .reply("getPublicKey", json!(ADDR));
        let adapter = InjectedAdapter::new(FakeScope::new().with("freighterApi", obj), &FREIGHTER);
        assert_eq!(adapter.get_address().await.unwrap(), ADDR);
    }

    #[tokio::test]
    async fn test_empty_address_is_not_authorized() {
        let obj = FakeObject::new().reply("getPublicKey", json!(""));
        let adapter = InjectedAdapter::new(FakeScope::new().with("xBullSDK", obj), &XBULL);
        assert!(matches!(
            adapter.get_address().await,
            Err(GuardianError::NotAuthorized { wallet: WalletKind::XBull, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_extension() {
        let adapter = InjectedAdapter::new(FakeScope::new(), &XBULL);
        assert!(!adapter.is_connected().await);
        assert_eq!(
            adapter.request_access().await,
            Err(GuardianError::NotInstalled { wallet: WalletKind::XBull })
        );
    }

    #[tokio::test]
    async fn test_request_access_returns_granted_address() {
        let obj = FakeObject::new().reply("requestAccess", json!({ "address": ADDR }));
        let adapter = InjectedAdapter::new(FakeScope::new().with("freighterApi", obj), &FREIGHTER);
        assert_eq!(adapter.request_access().await, Ok(Some(ADDR.to_string())));

        let obj = FakeObject::new().reply("requestAccess", json!({ "address": "" }));
        let adapter = InjectedAdapter::new(FakeScope::new().with("freighterApi", obj), &FREIGHTER);
        assert_eq!(adapter.request_access().await, Ok(None));
    }

    #[tokio::test]
    async fn test_is_connected_reply_shapes() {
        let obj = FakeObject::new().reply("isAllowed", json!({ "isAllowed": true }));
        let adapter = InjectedAdapter::new(FakeScope::new().with("freighterApi", obj), &FREIGHTER);
        assert!(adapter.is_connected().await);

        // Installed but this site was never authorized.
        let obj = FakeObject::new()
            .reply("isConnected", json!({ "isConnected": true }))
            .reply("isAllowed", json!({ "isAllowed": false }));
        let adapter = InjectedAdapter::new(FakeScope::new().with("freighterApi", obj), &FREIGHTER);
        assert!(!adapter.is_connected().await);

        let obj = FakeObject::new().throw("isConnected", "locked");
        let adapter = InjectedAdapter::new(FakeScope::new().with("xBullSDK", obj), &XBULL);
        assert!(!adapter.is_connected().await);
    }
}
