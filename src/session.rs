use crate::api::SessionApi;
use crate::error::{ApiError, DashboardError};
use crate::lifecycle::MountFlag;
use crate::models::{SessionState, User};

/// What the gated view should render for the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateView<'a> {
    Loading,
    LoginPrompt,
    Content(&'a User),
}

/// Resolves authentication once per mount before dependent UI renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGate {
    state: SessionState,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate {
    pub fn new() -> Self {
        Self {
            state: SessionState::Unknown,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Unknown
    }

    /// Data fetching is only allowed for an authenticated viewer.
    pub fn allows_fetch(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn view(&self) -> GateView<'_> {
        match &self.state {
            SessionState::Unknown => GateView::Loading,
            SessionState::Unauthenticated => GateView::LoginPrompt,
            SessionState::Authenticated(user) => GateView::Content(user),
        }
    }

    /// Applies the query outcome. Only the first outcome after mount (or
    /// after [`SessionGate::recheck`]) takes effect; returns whether it did.
    /// Failures are logged and never surfaced as notifications.
    pub fn resolve(&mut self, outcome: Result<User, ApiError>) -> bool {
        if self.state != SessionState::Unknown {
            log::warn!("Ignoring late session result; gate already resolved");
            return false;
        }
        self.state = match outcome {
            Ok(user) => {
                log::info!("Session active for {}", user.username);
                SessionState::Authenticated(user)
            }
            Err(error) => {
                if !error.is_unauthorized() {
                    log::warn!("Session check did not return an auth status; treating viewer as signed out");
                }
                DashboardError::AuthExpected(error).log();
                SessionState::Unauthenticated
            }
        };
        true
    }

    pub fn recheck(&mut self) {
        self.state = SessionState::Unknown;
    }
}

/// Issues the session query. Yields `None` when the view was torn down
/// while the query was outstanding.
pub async fn query_session<A>(api: &A, mount: &MountFlag) -> Option<Result<User, ApiError>>
where
    A: SessionApi + ?Sized,
{
    let outcome = api.current_user().await;
    if mount.is_mounted() {
        Some(outcome)
    } else {
        log::info!("Session check finished after teardown; result dropped");
        None
    }
}
