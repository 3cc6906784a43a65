//! # API Gateway
//!
//! One method per risk API endpoint. Every method takes the current
//! [`Session`] and checks demo mode first: demo sessions are answered from
//! [`fixtures`](crate::fixtures) and never reach the network.
//!
//! ## Status mapping
//!
//! | Status | Error |
//! |--------|-------|
//! | 404 | [`GuardianError::RemoteNotFound`] ("no data yet", informational) |
//! | 401 | [`GuardianError::Unauthorized`], stored token dropped |
//! | other non-2xx / network | [`GuardianError::RemoteFailure`] |

use chrono::{NaiveDateTime, Utc};
use lib_core::http::{HttpRequest, HttpTransport};
use lib_core::store::{KeyValueStorage, TokenStore};
use lib_core::{Config, GuardianError, Result, Session};
use serde::de::DeserializeOwned;
use shared::dto::{
    Alert, AssetCreate, CreateUserRequest, CreateUserResponse, MessageResponse, Portfolio, RebalanceExecuteRequest,
    RebalanceExecution, RebalanceOrder, RebalanceRequest, RebalanceSuggestion, RiskAnalysis, RiskAnalysisRequest,
};

use crate::fixtures;

pub struct ApiGateway<T, K> {
    transport: T,
    tokens: TokenStore<K>,
    api_root: String,
}

impl<T: HttpTransport, K: KeyValueStorage> ApiGateway<T, K> {
    pub fn new(transport: T, storage: K, config: &Config) -> Self {
        Self {
            transport,
            tokens: TokenStore::new(storage),
            api_root: config.api_root(),
        }
    }

    pub fn tokens(&self) -> &TokenStore<K> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_root, path)
    }

    fn now() -> NaiveDateTime {
        Utc::now().naive_utc()
    }

    /// The session's account, or an error when nothing is connected.
    fn wallet(session: &Session) -> Result<&str> {
        match session.address() {
            "" => Err(GuardianError::RemoteFailure("no wallet connected".to_string())),
            address => Ok(address),
        }
    }

    async fn request<R: DeserializeOwned>(&self, request: HttpRequest, what: &str) -> Result<R> {
        let request = request.bearer(self.tokens.get());
        log::debug!("[API] {} {}", request.method.as_str(), request.url);

        let response = self.transport.send(request).await?;
        match response.status {
            404 => {
                log::info!("[API] No {} found", what);
                Err(GuardianError::RemoteNotFound(what.to_string()))
            }
            401 => {
                log::warn!("[API] Unauthorized, dropping stored token");
                self.tokens.clear();
                Err(GuardianError::Unauthorized)
            }
            status if !response.is_success() => {
                let detail = response.detail().unwrap_or_else(|| format!("HTTP {}", status));
                log::error!("[API] Fetching {} failed: {}", what, detail);
                Err(GuardianError::RemoteFailure(detail))
            }
            _ => response.json(),
        }
    }

    pub async fn create_user(&self, session: &Session) -> Result<CreateUserResponse> {
        let wallet = Self::wallet(session)?;
        let request = HttpRequest::post(self.url("/portfolio/users")).json(&CreateUserRequest::new(wallet))?;
        self.request(request, "user").await
    }

    /// Register the wallet with the API after a successful connection.
    /// Failures (including "already exists") are logged and swallowed.
    pub async fn ensure_user(&self, session: &Session) {
        if session.is_demo() || !session.is_connected() {
            return;
        }
        match self.create_user(session).await {
            Ok(response) => log::info!("[API] {}", response.message),
            Err(e) => log::warn!("[API] User registration skipped: {}", e),
        }
    }

    pub async fn get_portfolio(&self, session: &Session) -> Result<Portfolio> {
        if session.is_demo() {
            return Ok(fixtures::portfolio(Self::now()));
        }
        let wallet = Self::wallet(session)?;
        self.request(HttpRequest::get(self.url(&format!("/portfolio/{}", wallet))), "portfolio")
            .await
    }

    pub async fn add_asset(&self, session: &Session, asset: &AssetCreate) -> Result<MessageResponse> {
        if session.is_demo() {
            return Ok(fixtures::write_ack());
        }
        let wallet = Self::wallet(session)?;
        let request = HttpRequest::post(self.url(&format!("/portfolio/{}/assets", wallet))).json(asset)?;
        self.request(request, "portfolio").await
    }

    pub async fn analyze_risk(&self, session: &Session) -> Result<RiskAnalysis> {
        if session.is_demo() {
            return Ok(fixtures::risk_analysis(Self::now()));
        }
        let wallet = Self::wallet(session)?;
        let request = HttpRequest::post(self.url("/risk/analyze")).json(&RiskAnalysisRequest::new(wallet))?;
        self.request(request, "risk analysis").await
    }

    pub async fn get_alerts(&self, session: &Session) -> Result<Vec<Alert>> {
        if session.is_demo() {
            return Ok(fixtures::alerts(Self::now()));
        }
        let wallet = Self::wallet(session)?;
        self.request(HttpRequest::get(self.url(&format!("/alerts/{}", wallet))), "alerts")
            .await
    }

    pub async fn get_active_alerts(&self, session: &Session) -> Result<Vec<Alert>> {
        if session.is_demo() {
            return Ok(fixtures::active_alerts(Self::now()));
        }
        let wallet = Self::wallet(session)?;
        self.request(HttpRequest::get(self.url(&format!("/alerts/{}/active", wallet))), "alerts")
            .await
    }

    pub async fn resolve_alert(&self, session: &Session, alert_id: i64) -> Result<MessageResponse> {
        if session.is_demo() {
            return Ok(fixtures::write_ack());
        }
        self.request(HttpRequest::patch(self.url(&format!("/alerts/{}/resolve", alert_id))), "alert")
            .await
    }

    pub async fn delete_alert(&self, session: &Session, alert_id: i64) -> Result<MessageResponse> {
        if session.is_demo() {
            return Ok(fixtures::write_ack());
        }
        self.request(HttpRequest::delete(self.url(&format!("/alerts/{}", alert_id))), "alert")
            .await
    }

    pub async fn suggest_rebalance(&self, session: &Session) -> Result<RebalanceSuggestion> {
        if session.is_demo() {
            return Ok(fixtures::rebalance_suggestion(Self::now()));
        }
        let wallet = Self::wallet(session)?;
        let request = HttpRequest::post(self.url("/rebalance/suggest")).json(&RebalanceRequest::new(wallet))?;
        self.request(request, "rebalance suggestion").await
    }

    pub async fn execute_rebalance(&self, session: &Session, orders: Vec<RebalanceOrder>) -> Result<RebalanceExecution> {
        if session.is_demo() {
            return Ok(fixtures::rebalance_execution(&orders, Self::now()));
        }
        let wallet = Self::wallet(session)?;
        let body = RebalanceExecuteRequest {
            wallet_address: wallet.to_string(),
            orders,
        };
        let request = HttpRequest::post(self.url("/rebalance/execute")).json(&body)?;
        self.request(request, "rebalance").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lib_core::http::{HttpMethod, HttpResponse, TransportError};
    use lib_core::store::{MemoryStorage, TOKEN_KEY};
    use lib_core::{Network, StellarAddress};
    use parking_lot::Mutex;
    use serde_json::json;

    const ADDR: &str = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";

    #[derive(Default)]
    struct Scripted {
        replies: Mutex<Vec<std::result::Result<HttpResponse, TransportError>>>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn replying(reply: std::result::Result<HttpResponse, TransportError>) -> Self {
            let scripted = Self::default();
            scripted.replies.lock().push(reply);
            scripted
        }
    }

    #[async_trait(?Send)]
    impl HttpTransport for Scripted {
        async fn send(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
            self.sent.lock().push(request);
            self.replies
                .lock()
                .pop()
                .unwrap_or_else(|| Err(TransportError("no scripted reply".into())))
        }
    }

    fn tracked() -> Session {
        Session::Tracked {
            address: StellarAddress::parse(ADDR).unwrap(),
            network: Network::Testnet,
        }
    }

    fn gateway(transport: Scripted) -> (ApiGateway<Scripted, MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (ApiGateway::new(transport, storage.clone(), &Config::default()), storage)
    }

    #[tokio::test]
    async fn test_demo_never_hits_the_network() {
        let (api, _) = gateway(Scripted::default());
        let demo = Session::Demo { network: Network::Testnet };

        assert_eq!(api.get_portfolio(&demo).await.unwrap().total_value, fixtures::DEMO_TOTAL_VALUE);
        assert_eq!(api.get_alerts(&demo).await.unwrap().len(), 5);
        assert!(api.analyze_risk(&demo).await.is_ok());
        assert!(api.suggest_rebalance(&demo).await.unwrap().should_rebalance);
        assert!(api.resolve_alert(&demo, 1).await.is_ok());
        api.ensure_user(&demo).await;

        assert!(api.transport.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_portfolio_request_shape() {
        let body = json!({
            "id": 1,
            "wallet_address": ADDR,
            "risk_tolerance": 0.5,
            "total_value": 10.0,
            "risk_score": 1.0,
            "assets": []
        });
        let (api, storage) = gateway(Scripted::replying(Ok(HttpResponse::new(200, body.to_string()))));
        storage.set(TOKEN_KEY, "jwt").unwrap();

        let portfolio = api.get_portfolio(&tracked()).await.unwrap();
        assert_eq!(portfolio.id, Some(1));

        let sent = api.transport.sent.lock();
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].url, format!("http://localhost:8000/api/v1/portfolio/{}", ADDR));
        assert_eq!(sent[0].bearer.as_deref(), Some("jwt"));
    }

    #[tokio::test]
    async fn test_404_is_not_found() {
        let (api, _) = gateway(Scripted::replying(Ok(HttpResponse::new(404, r#"{"detail":"User not found"}"#))));
        assert_eq!(
            api.get_portfolio(&tracked()).await,
            Err(GuardianError::RemoteNotFound("portfolio".into()))
        );
    }

    #[tokio::test]
    async fn test_401_drops_token() {
        let (api, storage) = gateway(Scripted::replying(Ok(HttpResponse::new(401, "{}"))));
        storage.set(TOKEN_KEY, "expired").unwrap();

        assert_eq!(api.get_alerts(&tracked()).await, Err(GuardianError::Unauthorized));
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_other_failures_carry_detail() {
        let (api, _) = gateway(Scripted::replying(Ok(HttpResponse::new(500, r#"{"detail":"Risk engine down"}"#))));
        assert_eq!(
            api.analyze_risk(&tracked()).await,
            Err(GuardianError::RemoteFailure("Risk engine down".into()))
        );

        let (api, _) = gateway(Scripted::replying(Err(TransportError("offline".into()))));
        assert!(matches!(api.get_active_alerts(&tracked()).await, Err(GuardianError::RemoteFailure(_))));
    }

    #[tokio::test]
    async fn test_ensure_user_swallows_errors() {
        let (api, _) = gateway(Scripted::replying(Ok(HttpResponse::new(400, r#"{"detail":"User already exists"}"#))));
        api.ensure_user(&tracked()).await;

        let sent = api.transport.sent.lock();
        assert_eq!(sent[0].url, "http://localhost:8000/api/v1/portfolio/users");
        assert_eq!(sent[0].body, Some(json!({ "wallet_address": ADDR, "risk_tolerance": 0.5 })));
    }

    #[tokio::test]
    async fn test_disconnected_session_is_rejected_locally() {
        let (api, _) = gateway(Scripted::default());
        assert!(api.get_portfolio(&Session::Disconnected).await.is_err());
        assert!(api.transport.sent.lock().is_empty());
    }
}
