use thiserror::Error;
use crate::api::ApiClientError;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Not logged in")]
    NotAuthenticated,

    /// The backend answered with a non-success status.
    #[error("{action}")]
    Request {
        action: &'static str,
        status: u16,
    },

    #[error("{action}: {source}")]
    Transport {
        action: &'static str,
        source: reqwest::Error,
    },

    #[error("{action}: unexpected response: {source}")]
    InvalidResponse {
        action: &'static str,
        source: reqwest::Error,
    },

    #[error(transparent)]
    Api(#[from] ApiClientError),
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("unknown tour category \"{0}\"")]
pub struct TourCategoryParseError(pub String);
