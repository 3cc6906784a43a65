//! Canonical storage record and the conversions into and out of [`Session`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{address_from_json, Network, Session, SessionMode, StellarAddress, WalletKind, DEMO_ADDRESS};

pub const RECORD_VERSION: u32 = 1;

/// What `risk_guardian.session` holds.
///
/// `address` stays an untyped JSON value so that records written by older
/// builds (where the address was sometimes an object) can be repaired
/// instead of rejected wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub address: Value,
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub wallet_kind: WalletKind,
    pub mode: SessionMode,
    #[serde(default)]
    pub demo_active: bool,
    #[serde(default)]
    pub show_app: bool,
}

fn default_version() -> u32 {
    RECORD_VERSION
}

/// Result of turning a record back into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decoded {
    pub session: Session,
    /// The record needed fixing and should be written back.
    pub repaired: bool,
}

/// Legacy per-key values, as read from storage.
#[derive(Debug, Default, Clone)]
pub(crate) struct LegacyValues {
    pub address: Option<String>,
    pub network: Option<String>,
    pub wallet_type: Option<String>,
    pub demo_mode: Option<String>,
}

impl LegacyValues {
    pub fn is_empty(&self) -> bool {
        self.address.is_none() && self.network.is_none() && self.wallet_type.is_none() && self.demo_mode.is_none()
    }
}

impl SessionRecord {
    /// `None` for a disconnected session: nothing is persisted.
    pub fn from_session(session: &Session) -> Option<Self> {
        if !session.is_connected() {
            return None;
        }
        Some(Self {
            version: RECORD_VERSION,
            address: Value::String(session.address().to_string()),
            network: session.network(),
            wallet_kind: session.wallet_kind(),
            mode: session.mode(),
            demo_active: session.is_demo(),
            show_app: session.shows_app(),
        })
    }

    /// Rebuild the canonical record from keys written by earlier builds.
    pub(crate) fn from_legacy(legacy: &LegacyValues) -> Option<Self> {
        let network = legacy
            .network
            .as_deref()
            .and_then(|n| n.parse().ok())
            .unwrap_or_default();

        if legacy.demo_mode.as_deref().map(str::trim) == Some("true") {
            return Some(Self {
                version: RECORD_VERSION,
                address: Value::String(DEMO_ADDRESS.to_string()),
                network,
                wallet_kind: WalletKind::Demo,
                mode: SessionMode::Demo,
                demo_active: true,
                show_app: true,
            });
        }

        let raw = legacy.address.as_deref().map(str::trim).filter(|a| !a.is_empty())?;
        // Older builds sometimes JSON-stringified the whole reply object.
        let address = serde_json::from_str::<Value>(raw)
            .ok()
            .filter(Value::is_object)
            .unwrap_or_else(|| Value::String(raw.to_string()));

        let wallet_kind = legacy
            .wallet_type
            .as_deref()
            .and_then(|w| w.parse().ok())
            .unwrap_or(WalletKind::Manual);
        let mode = if wallet_kind.is_extension() {
            SessionMode::Connected
        } else {
            SessionMode::Tracked
        };

        Some(Self {
            version: RECORD_VERSION,
            address,
            network,
            wallet_kind,
            mode,
            demo_active: false,
            show_app: true,
        })
    }

    /// Check the record for consistency and rebuild the session.
    ///
    /// Errors carry a short reason; the caller discards the record.
    pub(crate) fn decode(&self) -> Result<Decoded, String> {
        if self.version > RECORD_VERSION {
            return Err(format!("unsupported record version {}", self.version));
        }
        if self.demo_active != (self.mode == SessionMode::Demo) {
            return Err("demo flag disagrees with mode".to_string());
        }

        match self.mode {
            SessionMode::Disconnected => Ok(Decoded {
                session: Session::Disconnected,
                repaired: false,
            }),
            SessionMode::Demo => {
                // Demo never keeps a real address around.
                let clean = match &self.address {
                    Value::Null => true,
                    Value::String(s) => s.is_empty() || s == DEMO_ADDRESS,
                    _ => false,
                };
                Ok(Decoded {
                    session: Session::Demo { network: self.network },
                    repaired: !clean || self.wallet_kind != WalletKind::Demo || !self.show_app,
                })
            }
            SessionMode::Connected => {
                if !self.wallet_kind.is_extension() {
                    return Err(format!("connected session with wallet '{}'", self.wallet_kind.id()));
                }
                let (address, repaired) = self.address()?;
                Ok(Decoded {
                    session: Session::Connected {
                        address,
                        network: self.network,
                        wallet: self.wallet_kind,
                    },
                    repaired: repaired || !self.show_app,
                })
            }
            SessionMode::Tracked => {
                if !matches!(self.wallet_kind, WalletKind::Manual | WalletKind::None) {
                    return Err(format!("tracked session with wallet '{}'", self.wallet_kind.id()));
                }
                let (address, repaired) = self.address()?;
                Ok(Decoded {
                    session: Session::Tracked {
                        address,
                        network: self.network,
                    },
                    repaired: repaired || self.wallet_kind != WalletKind::Manual || !self.show_app,
                })
            }
        }
    }

    /// The stored address, and whether it had to be dug out of an object.
    fn address(&self) -> Result<(StellarAddress, bool), String> {
        let repaired = !matches!(self.address, Value::String(_));
        let raw = address_from_json(&self.address).ok_or_else(|| "address is missing or unreadable".to_string())?;
        let address = StellarAddress::parse(&raw).map_err(|e| e.to_string())?;
        Ok((address, repaired || raw != self.address.as_str().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ADDR: &str = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";

    fn connected() -> Session {
        Session::Connected {
            address: StellarAddress::parse(ADDR).unwrap(),
            network: Network::Mainnet,
            wallet: WalletKind::XBull,
        }
    }

    #[test]
    fn test_record_layout() {
        let record = SessionRecord::from_session(&connected()).unwrap();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "version": 1,
                "address": ADDR,
                "network": "mainnet",
                "walletKind": "xbull",
                "mode": "connected",
                "demoActive": false,
                "showApp": true
            })
        );
        assert!(SessionRecord::from_session(&Session::Disconnected).is_none());
    }

    #[test]
    fn test_decode_round_trips_every_mode() {
        let sessions = [
            connected(),
            Session::Tracked { address: StellarAddress::parse(ADDR).unwrap(), network: Network::Testnet },
            Session::Demo { network: Network::Testnet },
        ];
        for session in sessions {
            let decoded = SessionRecord::from_session(&session).unwrap().decode().unwrap();
            assert_eq!(decoded.session, session);
            assert!(!decoded.repaired);
        }
    }

    #[test]
    fn test_nested_address_is_repaired() {
        let mut record = SessionRecord::from_session(&connected()).unwrap();
        record.address = json!({ "address": ADDR });
        let decoded = record.decode().unwrap();
        assert_eq!(decoded.session, connected());
        assert!(decoded.repaired);
    }

    #[test]
    fn test_unextractable_address_is_rejected() {
        let mut record = SessionRecord::from_session(&connected()).unwrap();
        record.address = json!({ "foo": 1 });
        assert!(record.decode().is_err());
        record.address = json!("not-an-address");
        assert!(record.decode().is_err());
    }

    #[test]
    fn test_inconsistent_flags_are_rejected() {
        let mut record = SessionRecord::from_session(&connected()).unwrap();
        record.demo_active = true;
        assert!(record.decode().is_err());

        let mut record = SessionRecord::from_session(&connected()).unwrap();
        record.wallet_kind = WalletKind::Manual;
        assert!(record.decode().is_err());
    }

    #[test]
    fn test_demo_with_real_address_is_scrubbed() {
        let mut record = SessionRecord::from_session(&Session::Demo { network: Network::Testnet }).unwrap();
        record.address = json!(ADDR);
        let decoded = record.decode().unwrap();
        assert_eq!(decoded.session.address(), DEMO_ADDRESS);
        assert!(decoded.repaired);
    }

    #[test]
    fn test_from_legacy() {
        let legacy = LegacyValues {
            address: Some(format!("{{\"publicKey\":\"{}\"}}", ADDR)),
            network: Some("PUBLIC".into()),
            wallet_type: Some("freighter".into()),
            demo_mode: None,
        };
        let record = SessionRecord::from_legacy(&legacy).unwrap();
        assert_eq!(record.mode, SessionMode::Connected);
        let decoded = record.decode().unwrap();
        assert_eq!(decoded.session.network(), Network::Mainnet);
        assert!(decoded.repaired);

        let demo = LegacyValues { demo_mode: Some("true".into()), ..Default::default() };
        assert_eq!(SessionRecord::from_legacy(&demo).unwrap().mode, SessionMode::Demo);
        assert!(SessionRecord::from_legacy(&LegacyValues::default()).is_none());
    }
}
