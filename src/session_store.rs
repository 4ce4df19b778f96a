//! Who is logged in, as far as this client knows.
//!
//! A single [SessionStore] is built at startup and shared by handle with
//! everything that needs the current identity. It is the only writer of
//! both the in-memory session and the persisted access token.

mod errors;
mod internal;
mod policy;
mod session;

use async_trait::async_trait;
use crate::authenticator::Credentials;
use crate::role::Role;

pub use errors::SessionError;
pub use internal::{ProductionSessionStore, SessionStoreImpl};
pub use policy::{MalformedTokenPolicy, SessionPolicy};
pub use session::Session;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted token, if any. Only the first call has an
    /// effect; it always ends the loading phase.
    async fn restore(&self);

    /// Exchange [credentials] for a token and make it the current session.
    ///
    /// Returns the role carried by the new token, or `None` when the token
    /// could not be decoded. On error the session is left as it was.
    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Role>, SessionError>;

    /// Forget the current session and its persisted token. No network call.
    async fn logout(&self) -> Result<(), SessionError>;

    /// Snapshot of the current session.
    async fn session(&self) -> Session;

    /// Resolves once [Self::restore] has completed.
    async fn wait_ready(&self);
}
