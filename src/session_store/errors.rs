use thiserror::Error;
use crate::authenticator::AuthenticationError;
use crate::credential_store::CredentialStoreError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error("failed to persist the session: {0}")]
    Persistence(#[from] CredentialStoreError),
}
