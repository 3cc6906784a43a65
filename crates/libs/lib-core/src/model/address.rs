//! # Stellar Addresses
//!
//! Account ids are 56 characters long, start with `G` and use the RFC 4648
//! base32 alphabet (`A-Z`, `2-7`).
//!
//! ```rust
//! use lib_core::model::StellarAddress;
//!
//! let addr: StellarAddress = " GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN ".parse().unwrap();
//! assert_eq!(addr.as_str().len(), 56);
//! assert!("GABC".parse::<StellarAddress>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GuardianError;

/// Placeholder account used by demo mode.
///
/// Contains digits outside the base32 alphabet, so it never parses as a
/// [`StellarAddress`] and cannot collide with a real account.
pub const DEMO_ADDRESS: &str = "GDEMOTEST1234567890ABCDEFGHIJKLMNOPQRSTUVWXYZABCDEFGHIJK";

/// Address length in characters.
pub const ADDRESS_LEN: usize = 56;

static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^G[A-Z2-7]{55}$").unwrap_or_else(|e| panic!("invalid address pattern: {}", e))
});

/// Keys an address may hide under when it arrives wrapped in an object.
const ADDRESS_FIELDS: &[&str] = &["address", "publicKey", "account"];

/// A validated Stellar public account id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StellarAddress(String);

impl StellarAddress {
    /// Validate `input` (surrounding whitespace is ignored).
    pub fn parse(input: &str) -> Result<Self, GuardianError> {
        let candidate = input.trim();
        if candidate.is_empty() {
            return Err(GuardianError::InvalidFormat("address is empty".to_string()));
        }
        if candidate.len() != ADDRESS_LEN {
            return Err(GuardianError::InvalidFormat(format!(
                "expected {} characters, got {}",
                ADDRESS_LEN,
                candidate.len()
            )));
        }
        if !ADDRESS_RE.is_match(candidate) {
            return Err(GuardianError::InvalidFormat(
                "must start with G and contain only A-Z and 2-7".to_string(),
            ));
        }
        Ok(Self(candidate.to_string()))
    }

    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StellarAddress {
    type Err = GuardianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for StellarAddress {
    type Error = GuardianError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<StellarAddress> for String {
    fn from(address: StellarAddress) -> Self {
        address.0
    }
}

impl AsRef<str> for StellarAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StellarAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pull an address string out of a loosely shaped JSON value.
///
/// Accepts a bare string, an object carrying `address` / `publicKey` /
/// `account` (one more level of nesting is followed, e.g.
/// `{"account": {"address": "G..."}}`), or a string that itself holds such
/// an object serialized as JSON. Returns `None` when nothing non-empty is found.
/// The result is not validated.
pub fn address_from_json(value: &Value) -> Option<String> {
    extract(value, 2)
}

fn extract(value: &Value, depth: u8) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('{') && depth > 0 {
                let inner: Value = serde_json::from_str(trimmed).ok()?;
                return extract(&inner, depth - 1);
            }
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Object(map) if depth > 0 => ADDRESS_FIELDS
            .iter()
            .filter_map(|field| map.get(*field))
            .find_map(|inner| extract(inner, depth - 1)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VALID: &str = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";

    #[test]
    fn test_valid_address() {
        let addr = StellarAddress::parse(VALID).unwrap();
        assert_eq!(addr.as_str(), VALID);
        assert_eq!(addr.to_string(), VALID);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let padded = format!("\n  {}\t", VALID);
        assert_eq!(StellarAddress::parse(&padded).unwrap().as_str(), VALID);
    }

    #[test]
    fn test_rejects_malformed() {
        let lowercase = VALID.to_lowercase();
        let secret_seed = VALID.replacen('G', "S", 1);
        let with_one = VALID.replacen('5', "1", 1);
        for input in ["", "G", &VALID[..55], lowercase.as_str(), secret_seed.as_str(), with_one.as_str()] {
            assert!(
                matches!(StellarAddress::parse(input), Err(GuardianError::InvalidFormat(_))),
                "accepted {:?}",
                input
            );
        }
        let too_long = format!("{}A", VALID);
        assert!(!StellarAddress::is_valid(&too_long));
    }

    #[test]
    fn test_demo_address_is_not_a_real_account() {
        assert_eq!(DEMO_ADDRESS.len(), ADDRESS_LEN);
        assert!(!StellarAddress::is_valid(DEMO_ADDRESS));
    }

    #[test]
    fn test_serde_validates() {
        let ok: StellarAddress = serde_json::from_value(json!(VALID)).unwrap();
        assert_eq!(ok.as_str(), VALID);
        assert!(serde_json::from_value::<StellarAddress>(json!("nope")).is_err());
    }

    #[test]
    fn test_address_from_json_shapes() {
        assert_eq!(address_from_json(&json!(VALID)).as_deref(), Some(VALID));
        assert_eq!(address_from_json(&json!({ "address": VALID })).as_deref(), Some(VALID));
        assert_eq!(address_from_json(&json!({ "publicKey": VALID })).as_deref(), Some(VALID));
        assert_eq!(
            address_from_json(&json!({ "account": { "address": VALID } })).as_deref(),
            Some(VALID)
        );
        let serialized = format!("{{\"address\":\"{}\"}}", VALID);
        assert_eq!(address_from_json(&json!(serialized)).as_deref(), Some(VALID));
    }

    #[test]
    fn test_address_from_json_rejects_empty_and_foreign_shapes() {
        assert_eq!(address_from_json(&json!("")), None);
        assert_eq!(address_from_json(&json!({ "address": "" })), None);
        assert_eq!(address_from_json(&json!({ "foo": VALID })), None);
        assert_eq!(address_from_json(&json!(42)), None);
        assert_eq!(address_from_json(&Value::Null), None);
        assert_eq!(address_from_json(&json!("{not json")), None);
    }
}
