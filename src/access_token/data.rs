use time::OffsetDateTime;
use crate::role::Role;
use crate::username_string::UsernameString;

/// Claims exactly as found in the token payload, each one optional.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccessTokenClaims {
    pub subject: Option<String>,
    pub role: Option<Role>,
    pub issued_at: Option<OffsetDateTime>,
    pub expires_at: Option<OffsetDateTime>,
    pub issuer: Option<String>,
}

/// Identity carried by a token. Subject, role and expiry are either all
/// known or the token is not usable at all.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessTokenData {
    pub subject: UsernameString,
    pub role: Role,
    pub expires_at: OffsetDateTime,
    pub issued_at: Option<OffsetDateTime>,
    pub issuer: Option<String>,
}
