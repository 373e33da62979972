//! Session state machine driving the login flow.
//!
//! The machine itself is pure: [`step`] maps the current state and an
//! incoming event to the next state plus an optional [`Effect`]. Effects
//! describe work (network calls) as data; the CLI runner executes them and
//! feeds the resulting event back in. This keeps the transition table
//! directly testable without any I/O.
//!
//! ```text
//! CheckingSession ─ Unauthenticated ─▶ Authorizing ─ Authorized ─▶ ExchangingCode ─┐
//!        │                                                                         │ LoggedIn
//!        ├─ Expired ─▶ Refreshing ─ LoggedIn ─────────────────────────────────────▶│
//!        └─ Authenticated ─▶ AlreadyAuthenticated ─┐                               ▼
//!                                                  └─ ProfileFetched ◀── FetchingProfile ─▶ Ready
//! ```
//!
//! `Error` is absorbing and terminal for the current run: a denied or
//! mismatched authorization must be re-initiated by the user explicitly.

/// Derived (never stored) view of the stored token, computed from token
/// presence and the expiry instant at the moment of the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Expired,
    Authenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    CheckingSession,
    Authorizing,
    ExchangingCode,
    Refreshing,
    AlreadyAuthenticated,
    FetchingProfile,
    Ready,
    Error(String),
}

/// Transition events fed into [`step`], produced by executing effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Unauthenticated,
    Expired,
    Authenticated,
    Authorized { code: String, verifier: String },
    LoggedIn,
    ProfileFetched,
    Failed(String),
}

impl From<SessionStatus> for SessionEvent {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Unauthenticated => SessionEvent::Unauthenticated,
            SessionStatus::Expired => SessionEvent::Expired,
            SessionStatus::Authenticated => SessionEvent::Authenticated,
        }
    }
}

/// Side effects requested by a transition, executed by the CLI runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    BeginAuthorization,
    ExchangeCode { code: String, verifier: String },
    Refresh,
    FetchProfile,
}

/// Applies one event to the current state.
///
/// Any `Failed` event moves to the absorbing `Error` state, as does an
/// event that is not expected in the current state.
pub fn step(state: SessionState, event: SessionEvent) -> (SessionState, Option<Effect>) {
    use SessionEvent as E;
    use SessionState as S;

    match (state, event) {
        (_, E::Failed(reason)) => (S::Error(reason), None),
        (S::Error(reason), _) => (S::Error(reason), None),

        (S::CheckingSession, E::Unauthenticated) => {
            (S::Authorizing, Some(Effect::BeginAuthorization))
        }
        (S::CheckingSession, E::Expired) => (S::Refreshing, Some(Effect::Refresh)),
        (S::CheckingSession, E::Authenticated) => {
            (S::AlreadyAuthenticated, Some(Effect::FetchProfile))
        }

        (S::Authorizing, E::Authorized { code, verifier }) => (
            S::ExchangingCode,
            Some(Effect::ExchangeCode { code, verifier }),
        ),

        (S::ExchangingCode, E::LoggedIn) | (S::Refreshing, E::LoggedIn) => {
            (S::FetchingProfile, Some(Effect::FetchProfile))
        }

        (S::FetchingProfile, E::ProfileFetched) | (S::AlreadyAuthenticated, E::ProfileFetched) => {
            (S::Ready, None)
        }

        (state, event) => (
            S::Error(format!("unexpected event {:?} in state {:?}", event, state)),
            None,
        ),
    }
}
