use thiserror::Error;
use crate::api::ApiClientError;
use crate::lib_constants::DEFAULT_LOGIN_FAILURE_DETAIL;

#[derive(Debug, Error)]
pub enum AuthenticationError {
    /// The backend refused the credentials; [reason] is meant for the user.
    #[error("{reason}")]
    Rejected {
        status: u16,
        reason: String,
    },

    #[error("authentication request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected authentication response: {0}")]
    InvalidResponse(reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiClientError),
}

impl AuthenticationError {
    /// What to tell the user: the backend's own reason for a rejection,
    /// a generic failure otherwise.
    pub fn reason(&self) -> &str {
        match self {
            AuthenticationError::Rejected { reason, .. } => reason,
            _ => DEFAULT_LOGIN_FAILURE_DETAIL,
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum CredentialsError {
    #[error("Username is required")]
    MissingUsername,

    #[error("Password is required")]
    MissingPassword,
}
