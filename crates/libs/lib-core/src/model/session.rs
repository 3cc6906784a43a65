//! # Session
//!
//! The session is a tagged union: an address only exists in the variants that
//! carry one, and demo mode cannot coexist with a real wallet. The flat view
//! the dashboard needs (`address`, `connected`, `demo`, `mode`, ...) is
//! derived, never stored separately.

use serde::{Deserialize, Serialize};

use super::address::{StellarAddress, DEMO_ADDRESS};
use super::network::Network;
use super::wallet::WalletKind;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Session {
    #[default]
    Disconnected,
    /// Signing-capable browser extension.
    Connected {
        address: StellarAddress,
        network: Network,
        wallet: WalletKind,
    },
    /// Manually entered address, read-only.
    Tracked {
        address: StellarAddress,
        network: Network,
    },
    /// Fixture data, placeholder address.
    Demo { network: Network },
}

/// Discriminant of [`Session`], used for display and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    #[default]
    Disconnected,
    Connected,
    Tracked,
    Demo,
}

impl Session {
    pub fn mode(&self) -> SessionMode {
        match self {
            Session::Disconnected => SessionMode::Disconnected,
            Session::Connected { .. } => SessionMode::Connected,
            Session::Tracked { .. } => SessionMode::Tracked,
            Session::Demo { .. } => SessionMode::Demo,
        }
    }

    /// Account id; empty when disconnected, the demo placeholder in demo mode.
    pub fn address(&self) -> &str {
        match self {
            Session::Disconnected => "",
            Session::Connected { address, .. } | Session::Tracked { address, .. } => address.as_str(),
            Session::Demo { .. } => DEMO_ADDRESS,
        }
    }

    /// The real account, if any. Demo sessions have none.
    pub fn stellar_address(&self) -> Option<&StellarAddress> {
        match self {
            Session::Connected { address, .. } | Session::Tracked { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn network(&self) -> Network {
        match self {
            Session::Disconnected => Network::default(),
            Session::Connected { network, .. }
            | Session::Tracked { network, .. }
            | Session::Demo { network } => *network,
        }
    }

    pub fn wallet_kind(&self) -> WalletKind {
        match self {
            Session::Disconnected => WalletKind::None,
            Session::Connected { wallet, .. } => *wallet,
            Session::Tracked { .. } => WalletKind::Manual,
            Session::Demo { .. } => WalletKind::Demo,
        }
    }

    /// True once an address (real or demo) has been accepted.
    pub fn is_connected(&self) -> bool {
        !matches!(self, Session::Disconnected)
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Session::Demo { .. })
    }

    /// Only extension sessions can sign.
    pub fn can_sign(&self) -> bool {
        matches!(self, Session::Connected { .. })
    }

    /// Whether app navigation should be visible.
    pub fn shows_app(&self) -> bool {
        self.is_connected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> StellarAddress {
        StellarAddress::parse("GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN").unwrap()
    }

    #[test]
    fn test_disconnected_view() {
        let session = Session::default();
        assert_eq!(session.address(), "");
        assert_eq!(session.mode(), SessionMode::Disconnected);
        assert_eq!(session.wallet_kind(), WalletKind::None);
        assert!(!session.is_connected());
        assert!(!session.shows_app());
    }

    #[test]
    fn test_flags_agree_with_mode() {
        let sessions = [
            Session::Disconnected,
            Session::Connected { address: address(), network: Network::Mainnet, wallet: WalletKind::Freighter },
            Session::Tracked { address: address(), network: Network::Testnet },
            Session::Demo { network: Network::Testnet },
        ];
        for session in sessions {
            assert_eq!(session.is_demo(), session.mode() == SessionMode::Demo);
            assert_eq!(session.is_connected(), session.mode() != SessionMode::Disconnected);
            assert_eq!(session.wallet_kind() == WalletKind::Demo, session.is_demo());
        }
    }

    #[test]
    fn test_demo_uses_placeholder_address() {
        let session = Session::Demo { network: Network::Testnet };
        assert_eq!(session.address(), DEMO_ADDRESS);
        assert!(session.stellar_address().is_none());
        assert!(!session.can_sign());
    }

    #[test]
    fn test_tracked_is_read_only() {
        let session = Session::Tracked { address: address(), network: Network::Mainnet };
        assert_eq!(session.wallet_kind(), WalletKind::Manual);
        assert!(!session.can_sign());
        assert_eq!(session.network(), Network::Mainnet);
    }
}
