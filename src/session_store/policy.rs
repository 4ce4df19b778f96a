use serde::{Deserialize, Serialize};

/// What to do with a token whose claims cannot be read.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedTokenPolicy {
    /// Keep the raw token, in memory and in storage, with no identity.
    #[default]
    Retain,
    /// Drop the token and remove it from storage.
    Discard,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SessionPolicy {
    #[serde(default)]
    pub malformed_token: MalformedTokenPolicy,

    /// Log out lazily once the token's expiry has passed.
    #[serde(default)]
    pub enforce_expiry: bool,
}
