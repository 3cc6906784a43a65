use async_trait::async_trait;
use lib_core::{Result, WalletKind};

/// One wallet backend.
///
/// Browser objects are not `Send`, hence `?Send`.
#[async_trait(?Send)]
pub trait WalletAdapter {
    fn kind(&self) -> WalletKind;

    /// Whether the wallet is present on the page. Never prompts.
    fn detect(&self) -> bool;

    /// Whether the wallet has already granted this site access.
    /// Any failure counts as "no".
    async fn is_connected(&self) -> bool;

    /// Ask the user to grant access. Some wallets answer with the account
    /// id; it is returned when present.
    ///
    /// # Errors
    /// - [`GuardianError::NotInstalled`](lib_core::GuardianError::NotInstalled) if the wallet vanished
    /// - [`GuardianError::NotAuthorized`](lib_core::GuardianError::NotAuthorized) if every method was refused
    async fn request_access(&self) -> Result<Option<String>>;

    /// The account id the wallet exposes, normalized to a string but not
    /// yet validated.
    async fn get_address(&self) -> Result<String>;
}
