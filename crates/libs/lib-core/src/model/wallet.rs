use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GuardianError;

/// How the current session obtained its address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    /// Freighter browser extension.
    Freighter,
    /// xBull browser extension.
    XBull,
    /// Ledger and friends. Not supported yet.
    Hardware,
    /// Address typed in by the user, read-only.
    Manual,
    Demo,
    #[default]
    None,
}

impl WalletKind {
    /// Extensions the connector knows how to drive.
    pub const EXTENSIONS: [WalletKind; 2] = [WalletKind::Freighter, WalletKind::XBull];

    pub fn name(&self) -> &'static str {
        match self {
            WalletKind::Freighter => "Freighter",
            WalletKind::XBull => "xBull",
            WalletKind::Hardware => "Hardware wallet",
            WalletKind::Manual => "Manual address",
            WalletKind::Demo => "Demo",
            WalletKind::None => "None",
        }
    }

    /// Storage and wire identifier.
    pub fn id(&self) -> &'static str {
        match self {
            WalletKind::Freighter => "freighter",
            WalletKind::XBull => "xbull",
            WalletKind::Hardware => "hardware",
            WalletKind::Manual => "manual",
            WalletKind::Demo => "demo",
            WalletKind::None => "none",
        }
    }

    /// Browser extensions capable of signing.
    pub fn is_extension(&self) -> bool {
        matches!(self, WalletKind::Freighter | WalletKind::XBull)
    }

    /// Where to send users who do not have the extension yet.
    pub fn install_url(&self) -> Option<&'static str> {
        match self {
            WalletKind::Freighter => Some("https://www.freighter.app/"),
            WalletKind::XBull => Some("https://xbull.app/"),
            _ => None,
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive; also accepts `ledger` for [`WalletKind::Hardware`].
impl FromStr for WalletKind {
    type Err = GuardianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freighter" => Ok(WalletKind::Freighter),
            "xbull" => Ok(WalletKind::XBull),
            "hardware" | "ledger" => Ok(WalletKind::Hardware),
            "manual" => Ok(WalletKind::Manual),
            "demo" => Ok(WalletKind::Demo),
            "none" | "" => Ok(WalletKind::None),
            other => Err(GuardianError::InvalidFormat(format!("unknown wallet '{}'", other))),
        }
    }
}
