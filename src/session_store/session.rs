use std::fmt::{Debug, Formatter};
use time::OffsetDateTime;
use crate::access_token::AccessTokenData;
use crate::role::Role;
use crate::username_string::UsernameString;

#[derive(Clone, Default, Eq, PartialEq)]
pub struct Session {
    token: Option<String>,
    identity: Option<AccessTokenData>,
    loading: bool,
}

impl Session {
    pub(crate) fn new(
        token: Option<String>,
        identity: Option<AccessTokenData>,
        loading: bool,
    ) -> Self {
        Session {
            token,
            identity,
            loading,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn identity(&self) -> Option<&AccessTokenData> {
        self.identity.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn subject(&self) -> Option<&UsernameString> {
        self.identity.as_ref().map(|i| &i.subject)
    }

    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|i| i.role)
    }

    pub fn expires_at(&self) -> Option<OffsetDateTime> {
        self.identity.as_ref().map(|i| i.expires_at)
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at().is_some_and(|expires_at| expires_at <= now)
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("identity", &self.identity)
            .field("loading", &self.loading)
            .finish()
    }
}
