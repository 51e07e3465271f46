use thiserror::Error;

/// Failures while establishing a session. Shown on the login form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),
    #[error("Invalid JWT format: {0}")]
    InvalidFormat(String),
    #[error("Sign in request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("Your session has expired, please sign in again")]
    SessionExpired,
    /// The query engine reported an error or the request never completed.
    #[error("{0}")]
    Query(String),
    /// The response parsed but lacked the expected fields.
    #[error("Unexpected response shape: {0}")]
    DataShape(String),
    /// The credential could not be saved.
    #[error("Unable to save session: {0}")]
    Storage(String),
}

impl From<gritlab_client::Error> for AuthError {
    fn from(value: gritlab_client::Error) -> Self {
        match value {
            gritlab_client::Error::SigninRejected { .. } => Self::Rejected(value.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl From<gritlab_client::Error> for DashboardError {
    fn from(value: gritlab_client::Error) -> Self {
        Self::Query(value.to_string())
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
