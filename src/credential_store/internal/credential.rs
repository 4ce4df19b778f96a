use time::OffsetDateTime;
use crate::lib_constants::{DEFAULT_CREDENTIAL_PATH, TOKEN_CREDENTIAL_NAME};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoredCredential {
    pub name: String,
    pub value: String,
    pub path: String,
    /// `None` keeps the credential until it is removed.
    pub expires_at: Option<OffsetDateTime>,
}

impl StoredCredential {
    /// The access token slot, scoped to the whole application.
    pub fn access_token(
        token: impl Into<String>,
        expires_at: Option<OffsetDateTime>,
    ) -> Self {
        StoredCredential {
            name: TOKEN_CREDENTIAL_NAME.to_owned(),
            value: token.into(),
            path: DEFAULT_CREDENTIAL_PATH.to_owned(),
            expires_at,
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
