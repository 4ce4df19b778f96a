use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::credential_store::internal::credential::StoredCredential;

#[derive(Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct CredentialsData {
    #[serde(default, rename = "credential")]
    pub credentials: Vec<CredentialData>,
}

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct CredentialData {
    pub name: String,

    pub value: String,

    pub path: String,

    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none",
    )]
    pub expires_at: Option<OffsetDateTime>,
}

impl From<CredentialData> for StoredCredential {
    fn from(value: CredentialData) -> Self {
        StoredCredential {
            name: value.name,
            value: value.value,
            path: value.path,
            expires_at: value.expires_at,
        }
    }
}

impl From<StoredCredential> for CredentialData {
    fn from(value: StoredCredential) -> Self {
        CredentialData {
            name: value.name,
            value: value.value,
            path: value.path,
            expires_at: value.expires_at,
        }
    }
}
