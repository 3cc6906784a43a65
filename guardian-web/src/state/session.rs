//! Session state

use async_trait::async_trait;
use leptos::prelude::*;
use lib_api::ApiGateway;
use lib_core::store::SessionStore;
use lib_core::{core_config, GuardianError, Network, Result, Session, StellarAddress};
use lib_session::{AttemptOutcome, AttemptToken, SessionController};
use lib_wallet::{ConnectRequest, HorizonVerifier, NetworkVerifier, NoVerification, WalletAvailability, WalletConnector};

use crate::services::extensions::WindowScope;
use crate::services::http::GlooTransport;
use crate::services::storage::AppStorage;
use crate::state::toasts::ToastNotifier;

pub type Controller = SessionController<SessionStore<AppStorage>, ToastNotifier>;
pub type Api = ApiGateway<GlooTransport, AppStorage>;
pub type Connector = WalletConnector<WindowScope, Verifier>;

/// Network check chosen at runtime from the configuration.
pub enum Verifier {
    Off(NoVerification),
    Horizon(HorizonVerifier<GlooTransport>),
}

#[async_trait(?Send)]
impl NetworkVerifier for Verifier {
    async fn verify(&self, address: &StellarAddress, network: Network) -> Result<()> {
        match self {
            Verifier::Off(v) => v.verify(address, network).await,
            Verifier::Horizon(v) => v.verify(address, network).await,
        }
    }
}

/// Global session context
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub controller: RwSignal<Controller>,
    pub availability: RwSignal<WalletAvailability>,
    /// Network chosen on the landing page for the next connection.
    pub network: RwSignal<Network>,
    /// Attempt currently in flight, if any.
    pub pending: RwSignal<Option<AttemptToken>>,
    storage: StoredValue<AppStorage>,
}

impl SessionContext {
    pub fn new(notifier: ToastNotifier) -> Self {
        let storage = AppStorage::detect();
        let controller = SessionController::new(SessionStore::new(storage.clone()), notifier);
        Self {
            controller: RwSignal::new(controller),
            availability: RwSignal::new(WalletAvailability::default()),
            network: RwSignal::new(core_config().default_network),
            pending: RwSignal::new(None),
            storage: StoredValue::new(storage),
        }
    }

    pub fn is_connecting(&self) -> bool {
        self.pending.with(|p| p.is_some())
    }

    pub fn session(&self) -> Session {
        self.controller.with(|c| c.session().clone())
    }

    pub fn session_untracked(&self) -> Session {
        self.controller.with_untracked(|c| c.session().clone())
    }

    pub fn is_restored(&self) -> bool {
        self.controller.with(|c| c.is_restored())
    }

    /// Load the persisted session once, at startup.
    pub fn restore(&self) {
        self.controller.update(|c| {
            c.restore();
        });
    }

    pub fn api(&self) -> Api {
        let config = core_config();
        ApiGateway::new(
            GlooTransport::new(config.request_timeout_ms),
            self.storage.get_value(),
            config,
        )
    }

    pub fn connector(&self) -> Connector {
        let config = core_config();
        let verifier = if config.verify_network {
            Verifier::Horizon(HorizonVerifier::from_config(
                GlooTransport::new(config.request_timeout_ms),
                config,
            ))
        } else {
            Verifier::Off(NoVerification)
        };
        WalletConnector::new(WindowScope).with_verifier(verifier)
    }

    /// Run one connection attempt. A newer attempt started meanwhile wins and
    /// this result is dropped.
    pub async fn connect(self, request: ConnectRequest) -> AttemptOutcome {
        let network = self.network.get_untracked();
        let Some(token) = self.controller.try_update(|c| c.begin_attempt()) else {
            return AttemptOutcome::Stale;
        };
        let _ = self.pending.try_set(Some(token));

        let result = self.connector().connect(request, network).await;

        let outcome = self
            .controller
            .try_update(|c| c.finish_attempt(token, result))
            .unwrap_or(AttemptOutcome::Stale);
        let _ = self.pending.try_update(|p| {
            if *p == Some(token) {
                *p = None;
            }
        });

        if let AttemptOutcome::Applied(session) = &outcome {
            let session = session.clone();
            let api = self.api();
            leptos::task::spawn_local(async move {
                api.ensure_user(&session).await;
            });
        }
        outcome
    }

    pub fn enable_demo(&self) {
        let network = self.network.get_untracked();
        self.pending.set(None);
        self.controller.update(|c| c.enable_demo(network));
    }

    pub fn disable_demo(&self) -> bool {
        self.controller.try_update(|c| c.disable_demo()).unwrap_or(false)
    }

    pub fn reset_demo(&self) -> bool {
        self.controller.try_update(|c| c.reset_demo()).unwrap_or(false)
    }

    pub fn disconnect(&self) {
        self.pending.set(None);
        self.controller.update(|c| c.disconnect());
    }

    pub fn report(&self, err: &GuardianError) {
        self.controller.with_untracked(|c| c.report(err));
    }
}

pub fn provide_session_context(notifier: ToastNotifier) -> SessionContext {
    let ctx = SessionContext::new(notifier);
    provide_context(ctx);
    ctx
}

pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}
