use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GuardianError;

/// Stellar network the session is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
}

impl Network {
    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "Mainnet",
            Network::Testnet => "Testnet",
        }
    }

    /// Horizon base URL for this network.
    pub fn default_horizon_url(&self) -> &'static str {
        match self {
            Network::Mainnet => "https://horizon.stellar.org",
            Network::Testnet => "https://horizon-testnet.stellar.org",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts our own spelling plus the names wallet extensions report
/// (`PUBLIC`, `TESTNET`).
impl FromStr for Network {
    type Err = GuardianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "public" | "pubnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            other => Err(GuardianError::InvalidFormat(format!("unknown network '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("PUBLIC".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!(" testnet ".parse::<Network>().unwrap(), Network::Testnet);
        assert!("futurenet".parse::<Network>().is_err());
    }

    #[test]
    fn test_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Network::Mainnet).unwrap(), "\"mainnet\"");
    }
}
