//! # Session Controller
//!
//! Owns the current [`Session`] and is the only code that changes it. Every
//! transition replaces the whole value and then persists it, so observers
//! never see a half-updated session.
//!
//! ## Transitions
//!
//! | From | Event | To |
//! |------|-------|----|
//! | any | connect succeeds | `Connected` / `Tracked` (leaving demo first) |
//! | any | [`enable_demo`](SessionController::enable_demo) | `Demo` |
//! | `Demo` | [`disable_demo`](SessionController::disable_demo) / [`reset_demo`](SessionController::reset_demo) | `Disconnected` |
//! | any | [`disconnect`](SessionController::disconnect) | `Disconnected` |
//! | `Connected` | [`extension_disconnected`](SessionController::extension_disconnected) | `Disconnected` |
//!
//! ## Stale responses
//!
//! Connecting is asynchronous and the controller cannot be borrowed across
//! the wait (it lives in a reactive signal). Callers take an
//! [`AttemptToken`] before awaiting and hand it back with the result. Any
//! newer attempt or transition in between makes the token stale and the
//! result is dropped.

use lib_core::store::{Restored, SessionRepository};
use lib_core::{GuardianError, Network, Notice, Notifier, Result, Session, WalletKind};
use lib_wallet::horizon::NetworkVerifier;
use lib_wallet::injected::GlobalScope;
use lib_wallet::{ConnectRequest, WalletConnector};

/// Identifies one connection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The session now reflects the result.
    Applied(Session),
    /// Session unchanged; a notice was emitted.
    Failed(GuardianError),
    /// Superseded by a newer attempt or transition; nothing happened.
    Stale,
}

impl AttemptOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, AttemptOutcome::Applied(_))
    }
}

pub struct SessionController<R, N> {
    session: Session,
    repository: R,
    notifier: N,
    generation: u64,
    restored: bool,
}

impl<R: SessionRepository, N: Notifier> SessionController<R, N> {
    /// Starts disconnected; call [`restore`](Self::restore) to load storage.
    pub fn new(repository: R, notifier: N) -> Self {
        Self {
            session: Session::Disconnected,
            repository,
            notifier,
            generation: 0,
            restored: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether [`restore`](Self::restore) has run.
    pub fn is_restored(&self) -> bool {
        self.restored
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Load the persisted session. A corrupted record has already been
    /// wiped by the store; the user gets a warning and starts disconnected.
    pub fn restore(&mut self) -> &Session {
        let restored = self.repository.load();
        self.restored = true;
        self.generation += 1;

        match restored {
            Restored::Session(session) => {
                log::info!("[SESSION] Restored {:?} session for {}", session.mode(), session.address());
                self.session = session;
            }
            Restored::Empty => {
                log::debug!("[SESSION] Nothing to restore");
                self.session = Session::Disconnected;
            }
            Restored::Discarded(err) => {
                log::warn!("[SESSION] Stored session discarded: {}", err);
                self.session = Session::Disconnected;
                self.notifier.notify(err.notice());
            }
        }
        &self.session
    }

    /// Start a connection attempt, invalidating any attempt still pending.
    pub fn begin_attempt(&mut self) -> AttemptToken {
        self.generation += 1;
        AttemptToken(self.generation)
    }

    pub fn is_current(&self, token: AttemptToken) -> bool {
        token.0 == self.generation
    }

    /// Apply the result of the attempt identified by `token`.
    pub fn finish_attempt(&mut self, token: AttemptToken, result: Result<Session>) -> AttemptOutcome {
        if !self.is_current(token) {
            log::debug!("[SESSION] Dropping stale connection result");
            return AttemptOutcome::Stale;
        }
        // The token is single-use.
        self.generation += 1;

        match result {
            Ok(Session::Disconnected) => {
                log::warn!("[SESSION] Connection attempt produced no session");
                AttemptOutcome::Stale
            }
            Ok(Session::Demo { network }) => {
                self.enable_demo(network);
                AttemptOutcome::Applied(self.session.clone())
            }
            Ok(session) => {
                if self.session.is_demo() {
                    log::info!("[SESSION] Leaving demo mode for a real wallet");
                    self.replace(Session::Disconnected);
                }
                self.replace(session);
                self.notifier.notify(connected_notice(&self.session));
                AttemptOutcome::Applied(self.session.clone())
            }
            Err(err) => {
                log::warn!("[SESSION] Connection failed: {}", err);
                self.notifier.notify(err.notice());
                AttemptOutcome::Failed(err)
            }
        }
    }

    /// Connect in one call when the caller can hold the controller across
    /// the await (tests, non-reactive hosts).
    pub async fn connect<S, V>(
        &mut self,
        connector: &WalletConnector<S, V>,
        request: ConnectRequest,
        network: Network,
    ) -> AttemptOutcome
    where
        S: GlobalScope + Clone,
        V: NetworkVerifier,
    {
        let token = self.begin_attempt();
        let result = connector.connect(request, network).await;
        self.finish_attempt(token, result)
    }

    /// Switch to demo data. Any real address is dropped from memory and
    /// storage.
    pub fn enable_demo(&mut self, network: Network) {
        self.replace(Session::Demo { network });
        self.notifier.notify(Notice::info(
            "Demo mode",
            "You are exploring sample data. Connect a wallet to see your own portfolio.",
        ));
    }

    /// Leave demo mode. Returns `false` (and does nothing) outside demo.
    pub fn disable_demo(&mut self) -> bool {
        if !self.session.is_demo() {
            return false;
        }
        log::info!("[SESSION] Demo mode disabled");
        self.replace(Session::Disconnected);
        true
    }

    /// Leave demo mode and wipe every demo trace, back to the landing page.
    pub fn reset_demo(&mut self) -> bool {
        if !self.disable_demo() {
            return false;
        }
        self.notifier.notify(Notice::info("Demo reset", "Demo data cleared."));
        true
    }

    /// User-initiated disconnect. Clears storage and the API token.
    pub fn disconnect(&mut self) {
        log::info!("[SESSION] Disconnecting {}", self.session.wallet_kind());
        self.replace(Session::Disconnected);
    }

    /// The extension stopped reporting a connection (locked, revoked).
    /// No automatic reconnect is attempted.
    pub fn extension_disconnected(&mut self) -> bool {
        let Session::Connected { wallet, .. } = &self.session else {
            return false;
        };
        let wallet = *wallet;
        log::warn!("[SESSION] {} reported disconnected", wallet);
        self.replace(Session::Disconnected);
        self.notifier.notify(Notice::warning(
            "Wallet disconnected",
            format!("{} is no longer connected. Reconnect to continue.", wallet),
        ));
        true
    }

    /// Emit the notice for an error raised outside the controller.
    pub fn report(&self, err: &GuardianError) {
        self.notifier.notify(err.notice());
    }

    /// Saving `Disconnected` clears storage, token included.
    fn replace(&mut self, session: Session) {
        self.generation += 1;
        self.session = session;
        self.repository.save(&self.session);
    }
}

fn connected_notice(session: &Session) -> Notice {
    match session.wallet_kind() {
        WalletKind::Manual => Notice::success(
            "Tracking address",
            format!("Read-only view of {}.", shared::utils::truncate_address(session.address())),
        ),
        wallet => Notice::success(
            "Wallet connected",
            format!("{} connected on {}.", wallet, session.network()),
        ),
    }
}
