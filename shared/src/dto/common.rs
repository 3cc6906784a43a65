use serde::{Deserialize, Serialize};

/// Generic acknowledgement returned by mutation endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body produced by the risk API (`{"detail": "..."}`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_parses_detail() {
        let parsed: ErrorResponse = serde_json::from_str(r#"{"detail":"User not found"}"#).unwrap();
        assert_eq!(parsed.detail, "User not found");
    }
}
