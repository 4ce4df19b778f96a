use async_trait::async_trait;
use log::{debug, info};
use reqwest::Method;
use crate::api::{failure_detail, ApiClient};
use crate::lib_constants::{AUTHENTICATE_ENDPOINT, DEFAULT_LOGIN_FAILURE_DETAIL};

mod errors;
mod model;

pub use errors::{AuthenticationError, CredentialsError};
pub use model::{AuthenticationRequest, AuthenticationResponse, Credentials};

/// Exchanges credentials for a signed access token.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticationResponse, AuthenticationError>;
}

pub type ProductionAuthenticator = HttpAuthenticator;

pub struct HttpAuthenticator {
    api: ApiClient,
}

impl HttpAuthenticator {
    pub fn new(api: ApiClient) -> Self {
        HttpAuthenticator { api }
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticationResponse, AuthenticationError> {
        debug!("authenticating user \"{}\"", credentials.username());
        let response = self.api
            .request(Method::POST, AUTHENTICATE_ENDPOINT)?
            .json(&AuthenticationRequest::from(credentials))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let reason = failure_detail(response, DEFAULT_LOGIN_FAILURE_DETAIL).await;
            info!(
                "authentication of \"{}\" rejected with HTTP {status}: {reason}",
                credentials.username(),
            );
            return Err(
                AuthenticationError::Rejected {
                    status: status.as_u16(),
                    reason,
                }
            );
        }
        response.json::<AuthenticationResponse>()
            .await
            .map_err(AuthenticationError::InvalidResponse)
    }
}
