use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("serialization error: {0}")]
    Serialize(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status: 401 | 403, .. })
    }
}

/// Which remote resource a fetch failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Summary,
    Payments,
}

impl Resource {
    pub fn label(self) -> &'static str {
        match self {
            Resource::Summary => "transaction summary",
            Resource::Payments => "upcoming payments",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("no active session: {0}")]
    AuthExpected(ApiError),
    #[error("failed to fetch {}: {source}", .resource.label())]
    DataFetchFailure { resource: Resource, source: ApiError },
    #[error("failed to mark payment {id} as paid: {source}")]
    MutationFailure { id: String, source: ApiError },
}

impl DashboardError {
    /// Message for the notification sink. Missing sessions stay silent.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            DashboardError::AuthExpected(_) => None,
            DashboardError::DataFetchFailure { resource: Resource::Summary, .. } => {
                Some("Failed to load transaction data")
            }
            DashboardError::DataFetchFailure { resource: Resource::Payments, .. } => {
                Some("Failed to load upcoming payments")
            }
            DashboardError::MutationFailure { .. } => Some("Failed to update payment status"),
        }
    }

    pub fn log(&self) {
        match self {
            DashboardError::AuthExpected(_) => log::warn!("Authentication check failed: {}", self),
            _ => log::error!("{}", self),
        }
    }
}
