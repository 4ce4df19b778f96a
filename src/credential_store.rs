mod internal;
mod errors;

use async_trait::async_trait;

pub use errors::CredentialStoreError;
pub use internal::{CredentialStoreImpl, ProductionCredentialStore};
pub use internal::credential::StoredCredential;

/// Named credential slots that survive restarts, with cookie-like expiry:
/// an expired credential reads as absent.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(
        &self,
        name: &str,
    ) -> Result<Option<String>, CredentialStoreError>;

    /// Store [credential], replacing any credential with the same name.
    async fn set(
        &self,
        credential: StoredCredential,
    ) -> Result<(), CredentialStoreError>;

    /// Returns whether anything was removed.
    async fn remove(
        &self,
        name: &str,
    ) -> Result<bool, CredentialStoreError>;
}
