//! # Shared Display Helpers
//!
//! Formatting used by the dashboard views and by notices raised from the
//! session layer.
//!
//! - [`format_address`] - Stellar account ids with an ellipsis
//! - [`truncate_address`] - `format_address` with the dashboard defaults
//! - [`format_usd`] - Dollar amounts with thousands separators
//! - [`format_percent`] - Allocation percentages
//!
//! ```rust
//! use shared::utils::truncate_address;
//!
//! let address = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";
//! assert_eq!(truncate_address(address), "GA5ZSE...KZVN");
//! ```

/// Show the first `prefix_len` and last `suffix_len` characters of an address.
///
/// Addresses too short to shorten meaningfully are returned as-is.
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";
/// assert_eq!(format_address(addr, 4, 4), "GA5Z...KZVN");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= prefix_len + suffix_len {
        return address.to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// Dashboard default: 6 leading characters (keeps the `G` plus five) and 4 trailing.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Format a dollar amount with comma separators and two decimals.
///
/// ```rust
/// use shared::utils::format_usd;
///
/// assert_eq!(format_usd(128750.0), "$128,750.00");
/// assert_eq!(format_usd(-4750.5), "-$4,750.50");
/// ```
pub fn format_usd(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (integer_part, decimal_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, ch) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, decimal_part)
}

/// Format an allocation percentage (already on a 0-100 scale).
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";

    #[test]
    fn test_format_address() {
        assert_eq!(format_address(ADDR, 4, 4), "GA5Z...KZVN");
        assert_eq!(format_address(ADDR, 2, 2), "GA...VN");
        assert_eq!(format_address("abc", 4, 4), "abc");
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(truncate_address(ADDR), "GA5ZSE...KZVN");
        assert_eq!(truncate_address(""), "");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-15.75), "-$15.75");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(43.671), "43.67%");
    }
}
