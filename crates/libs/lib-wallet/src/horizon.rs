//! Account existence check against Stellar Horizon.
//!
//! A freshly connected wallet may be pointed at the other network. Horizon
//! answers `404` for accounts that do not exist on the network it serves,
//! which is the only case treated as an error. Anything else (Horizon down,
//! CORS, rate limits) is logged and the connection proceeds.

use async_trait::async_trait;
use lib_core::http::{HttpRequest, HttpTransport};
use lib_core::{Config, GuardianError, Network, Result, StellarAddress};

#[async_trait(?Send)]
pub trait NetworkVerifier {
    async fn verify(&self, address: &StellarAddress, network: Network) -> Result<()>;
}

/// Accepts every account.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVerification;

#[async_trait(?Send)]
impl NetworkVerifier for NoVerification {
    async fn verify(&self, _address: &StellarAddress, _network: Network) -> Result<()> {
        Ok(())
    }
}

pub struct HorizonVerifier<T> {
    transport: T,
    mainnet_url: String,
    testnet_url: String,
}

impl<T: HttpTransport> HorizonVerifier<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            mainnet_url: Network::Mainnet.default_horizon_url().to_string(),
            testnet_url: Network::Testnet.default_horizon_url().to_string(),
        }
    }

    pub fn from_config(transport: T, config: &Config) -> Self {
        Self {
            transport,
            mainnet_url: config.horizon_mainnet_url.clone(),
            testnet_url: config.horizon_testnet_url.clone(),
        }
    }

    fn account_url(&self, address: &StellarAddress, network: Network) -> String {
        let base = match network {
            Network::Mainnet => &self.mainnet_url,
            Network::Testnet => &self.testnet_url,
        };
        format!("{}/accounts/{}", base.trim_end_matches('/'), address)
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> NetworkVerifier for HorizonVerifier<T> {
    async fn verify(&self, address: &StellarAddress, network: Network) -> Result<()> {
        let url = self.account_url(address, network);
        log::debug!("[CONNECT] Verifying account at {}", url);

        match self.transport.send(HttpRequest::get(url)).await {
            Ok(response) if response.status == 404 => {
                log::warn!("[CONNECT] Account {} not found on {}", address, network);
                Err(GuardianError::WrongNetwork { expected: network })
            }
            Ok(response) if !response.is_success() => {
                log::warn!("[CONNECT] Horizon returned {}, skipping network check", response.status);
                Ok(())
            }
            Ok(_) => Ok(()),
            Err(e) => {
                log::warn!("[CONNECT] Horizon unreachable, skipping network check: {}", e);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_core::http::{HttpResponse, TransportError};
    use std::cell::RefCell;

    const ADDR: &str = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";

    struct Canned {
        reply: std::result::Result<HttpResponse, TransportError>,
        urls: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl HttpTransport for Canned {
        async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
            self.urls.borrow_mut().push(request.url);
            self.reply.clone()
        }
    }

    fn verifier(reply: std::result::Result<HttpResponse, TransportError>) -> HorizonVerifier<Canned> {
        HorizonVerifier::new(Canned { reply, urls: RefCell::new(Vec::new()) })
    }

    #[tokio::test]
    async fn test_404_is_wrong_network() {
        let v = verifier(Ok(HttpResponse::new(404, "{}")));
        let address = StellarAddress::parse(ADDR).unwrap();
        assert_eq!(
            v.verify(&address, Network::Mainnet).await,
            Err(GuardianError::WrongNetwork { expected: Network::Mainnet })
        );
        assert_eq!(
            v.transport.urls.borrow()[0],
            format!("https://horizon.stellar.org/accounts/{}", ADDR)
        );
    }

    #[tokio::test]
    async fn test_other_failures_are_ignored() {
        let address = StellarAddress::parse(ADDR).unwrap();
        for reply in [
            Ok(HttpResponse::new(200, "{}")),
            Ok(HttpResponse::new(503, "")),
            Err(TransportError("offline".into())),
        ] {
            assert!(verifier(reply).verify(&address, Network::Testnet).await.is_ok());
        }
    }
}
