//! # Wallet Connector
//!
//! Turns a user's choice on the landing page into a [`Session`]. Every path
//! ends in either a valid session or a [`GuardianError`] that maps to a
//! notice; the connector itself never touches storage.
//!
//! | Request | Result |
//! |---------|--------|
//! | `Extension(kind)` | `Session::Connected` |
//! | `Manual(input)` | `Session::Tracked` (read-only) |
//! | `Hardware` | always `NotImplemented` |
//! | `Demo` | `Session::Demo` |

use lib_core::{GuardianError, Network, Result, Session, StellarAddress, WalletKind};

use crate::horizon::{NetworkVerifier, NoVerification};
use crate::injected::{GlobalScope, InjectedAdapter};
use crate::WalletAdapter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectRequest {
    Extension(WalletKind),
    /// Address typed by the user.
    Manual(String),
    Hardware,
    Demo,
}

impl ConnectRequest {
    /// Wallet kind the resulting session will carry.
    pub fn wallet_kind(&self) -> WalletKind {
        match self {
            ConnectRequest::Extension(kind) => *kind,
            ConnectRequest::Manual(_) => WalletKind::Manual,
            ConnectRequest::Hardware => WalletKind::Hardware,
            ConnectRequest::Demo => WalletKind::Demo,
        }
    }
}

pub struct WalletConnector<S, V = NoVerification> {
    scope: S,
    verifier: V,
}

impl<S: GlobalScope + Clone> WalletConnector<S, NoVerification> {
    pub fn new(scope: S) -> Self {
        Self {
            scope,
            verifier: NoVerification,
        }
    }
}

impl<S: GlobalScope + Clone, V: NetworkVerifier> WalletConnector<S, V> {
    pub fn with_verifier<W: NetworkVerifier>(self, verifier: W) -> WalletConnector<S, W> {
        WalletConnector {
            scope: self.scope,
            verifier,
        }
    }

    pub fn adapter(&self, kind: WalletKind) -> Option<InjectedAdapter<S>> {
        InjectedAdapter::for_kind(self.scope.clone(), kind)
    }

    pub async fn connect(&self, request: ConnectRequest, network: Network) -> Result<Session> {
        log::info!("[CONNECT] {:?} on {}", request, network);
        match request {
            ConnectRequest::Extension(kind) => {
                let adapter = self
                    .adapter(kind)
                    .ok_or_else(|| GuardianError::Connection {
                        wallet: kind,
                        reason: "not a browser extension".to_string(),
                    })?;
                self.connect_adapter(&adapter, network).await
            }
            ConnectRequest::Manual(input) => {
                let address = StellarAddress::parse(&input)?;
                self.verifier.verify(&address, network).await?;
                Ok(Session::Tracked { address, network })
            }
            ConnectRequest::Hardware => Err(GuardianError::NotImplemented(WalletKind::Hardware)),
            ConnectRequest::Demo => Ok(Session::Demo { network }),
        }
    }

    /// Drive any adapter through detect, access and address retrieval.
    pub async fn connect_adapter<A: WalletAdapter + ?Sized>(&self, adapter: &A, network: Network) -> Result<Session> {
        let wallet = adapter.kind();
        if !adapter.detect() {
            return Err(GuardianError::NotInstalled { wallet });
        }

        let mut requested = false;
        let mut granted = None;
        if !adapter.is_connected().await {
            granted = adapter.request_access().await?;
            requested = true;
        }

        let raw = match granted {
            Some(address) => address,
            None => match adapter.get_address().await {
                Ok(raw) if !raw.trim().is_empty() => raw,
                // Reported as allowed but no account exposed: prompt once.
                Ok(_) | Err(GuardianError::NotAuthorized { .. }) if !requested => {
                    log::debug!("[CONNECT] {} exposed no address, requesting access", wallet);
                    match adapter.request_access().await? {
                        Some(address) => address,
                        None => adapter.get_address().await?,
                    }
                }
                other => other?,
            },
        };
        if raw.trim().is_empty() {
            return Err(GuardianError::NotAuthorized {
                wallet,
                reason: "wallet returned an empty address".to_string(),
            });
        }

        let address = StellarAddress::parse(&raw)?;
        self.verifier.verify(&address, network).await?;

        log::info!("[CONNECT] {} connected {}", wallet, address);
        Ok(Session::Connected { address, network, wallet })
    }

    /// Whether the extension behind a connected session still reports a
    /// connection. Sessions without an extension are always "still connected".
    pub async fn still_connected(&self, session: &Session) -> bool {
        let Session::Connected { wallet, .. } = session else {
            return true;
        };
        match self.adapter(*wallet) {
            Some(adapter) => adapter.is_connected().await,
            None => true,
        }
    }
}
