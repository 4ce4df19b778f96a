use thiserror::Error;
use crate::api::ApiClientError;

#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Rejected locally, nothing was sent.
    #[error("{message}")]
    Invalid {
        field: &'static str,
        message: &'static str,
    },

    #[error("{reason}")]
    Rejected {
        status: u16,
        reason: String,
    },

    #[error("registration request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected registration response: {0}")]
    InvalidResponse(reqwest::Error),

    #[error(transparent)]
    Api(#[from] ApiClientError),
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown gender \"{0}\"")]
pub struct GenderParseError(pub String);
