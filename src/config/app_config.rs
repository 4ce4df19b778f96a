use std::path::PathBuf;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::bin_constants::{DEFAULT_API_URL, DEFAULT_CREDENTIAL_FILE};
use crate::session_store::{MalformedTokenPolicy, SessionPolicy};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default = "app_config_default_api_url")]
    pub api_url: String,

    #[serde(default = "app_config_default_credential_file")]
    pub credential_file: PathBuf,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    #[serde(default)]
    pub malformed_token_policy: MalformedTokenPolicy,

    #[serde(default)]
    pub enforce_expiry: bool,
}

impl AppConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy {
            malformed_token: self.malformed_token_policy,
            enforce_expiry: self.enforce_expiry,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_url: app_config_default_api_url(),
            credential_file: app_config_default_credential_file(),
            request_timeout_secs: None,
            malformed_token_policy: MalformedTokenPolicy::default(),
            enforce_expiry: false,
        }
    }
}

pub fn app_config_default_api_url() -> String {
    DEFAULT_API_URL.to_owned()
}

pub fn app_config_default_credential_file() -> PathBuf {
    DEFAULT_CREDENTIAL_FILE.into()
}
