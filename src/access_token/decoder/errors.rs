use josekit::JoseError;
use thiserror::Error;
use crate::role::RoleParseError;
use crate::username_string::UsernameParseError;

#[derive(Debug, Error)]
pub enum AccessTokenDecoderError {
    #[error("access token is not a compact JWS")]
    Structure,

    #[error("access token payload is not base64url: {0}")]
    Base64(#[from] base64ct::Error),

    #[error("invalid access token payload: {0}")]
    PayloadParse(#[from] serde_json::Error),

    #[error("invalid access token claims: {0}")]
    Claims(#[from] JoseError),

    #[error(transparent)]
    InvalidRole(#[from] RoleParseError),

    #[error("invalid subject: {0}")]
    InvalidSubject(#[from] UsernameParseError),

    #[error("{claim} claim is out of range")]
    TimestampOutOfRange {
        claim: &'static str,
    },

    #[error("missing {part} in the payload")]
    PayloadMissing {
        part: &'static str,
    },
}
