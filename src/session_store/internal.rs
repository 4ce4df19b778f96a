use std::path::Path;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use tokio::sync::{watch, RwLock};
use crate::access_token::{AccessTokenData, AccessTokenDecoder};
use crate::api::ApiClient;
use crate::authenticator::{Authenticator, Credentials, ProductionAuthenticator};
use crate::clock::{Clock, SystemClock};
use crate::credential_store::{CredentialStore, ProductionCredentialStore, StoredCredential};
use crate::lib_constants::TOKEN_CREDENTIAL_NAME;
use crate::role::Role;
use crate::session_store::{MalformedTokenPolicy, Session, SessionError, SessionPolicy, SessionStore};


struct MarkReadyOnDrop<'a>(&'a watch::Sender<bool>);

impl Drop for MarkReadyOnDrop<'_> {
    fn drop(&mut self) {
        self.0.send_replace(true);
    }
}

#[derive(Default)]
struct SessionState {
    token: Option<String>,
    identity: Option<AccessTokenData>,
}

pub struct SessionStoreImpl<A: Authenticator, S: CredentialStore, C: Clock> {
    authenticator: A,
    credential_store: S,
    clock: C,
    decoder: AccessTokenDecoder,
    policy: SessionPolicy,
    state: RwLock<SessionState>,
    ready: watch::Sender<bool>,
}

impl<A: Authenticator, S: CredentialStore, C: Clock> SessionStoreImpl<A, S, C> {
    pub fn new(
        authenticator: A,
        credential_store: S,
        clock: C,
        policy: SessionPolicy,
    ) -> Self {
        let (ready, _) = watch::channel(false);
        SessionStoreImpl {
            authenticator,
            credential_store,
            clock,
            decoder: AccessTokenDecoder::new(),
            policy,
            state: RwLock::new(SessionState::default()),
            ready,
        }
    }

    async fn snapshot(&self) -> Session {
        let loading = !*self.ready.borrow();
        let state = self.state.read().await;
        Session::new(state.token.clone(), state.identity.clone(), loading)
    }

    async fn clear_expired(&self) {
        let mut state = self.state.write().await;
        let now = self.clock.now();
        // re-checked under the lock: a login may have replaced the expired session
        let Some(identity) = state.identity.as_ref().filter(|identity| identity.expires_at <= now) else {
            debug!("expired session was already replaced");
            return;
        };
        info!("session of \"{}\" has expired", identity.subject);
        *state = SessionState::default();
        if let Err(e) = self.credential_store.remove(TOKEN_CREDENTIAL_NAME).await {
            error!("failed to clear expired session: {e}");
        }
    }

    async fn restored_state(&self, token: String) -> SessionState {
        match self.decoder.decode_token(&token) {
            Ok(identity) => {
                info!(
                    "restored session of \"{}\" as {}, expires at {}",
                    identity.subject,
                    identity.role,
                    identity.expires_at,
                );
                SessionState {
                    token: Some(token),
                    identity: Some(identity),
                }
            },
            Err(e) => {
                warn!("persisted access token is unreadable: {e}");
                match self.policy.malformed_token {
                    MalformedTokenPolicy::Retain => SessionState {
                        token: Some(token),
                        identity: None,
                    },
                    MalformedTokenPolicy::Discard => {
                        if let Err(e) = self.credential_store.remove(TOKEN_CREDENTIAL_NAME).await {
                            error!("failed to remove unreadable access token: {e}");
                        }
                        SessionState::default()
                    },
                }
            },
        }
    }
}

#[async_trait]
impl<A: Authenticator, S: CredentialStore, C: Clock> SessionStore for SessionStoreImpl<A, S, C> {
    async fn restore(&self) {
        if *self.ready.borrow() {
            debug!("session already restored");
            return;
        }
        let mut state = self.state.write().await;
        // another restore may have finished while this one waited for the lock
        if *self.ready.borrow() {
            debug!("session already restored");
            return;
        }
        // the loading phase ends however this call exits, unwinding included
        let _ready = MarkReadyOnDrop(&self.ready);
        let token = match self.credential_store.get(TOKEN_CREDENTIAL_NAME).await {
            Ok(token) => token,
            Err(e) => {
                error!("failed to read persisted access token: {e}");
                None
            },
        };
        match token {
            Some(token) => *state = self.restored_state(token).await,
            None => debug!("no persisted access token"),
        }
        drop(state);
    }

    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<Role>, SessionError> {
        let response = self.authenticator.authenticate(credentials).await?;
        let token = response.token;
        let (new_state, persisted) = match self.decoder.decode_token(&token) {
            Ok(identity) => {
                let credential = StoredCredential::access_token(
                    token.clone(),
                    Some(identity.expires_at),
                );
                (
                    SessionState {
                        token: Some(token),
                        identity: Some(identity),
                    },
                    Some(credential),
                )
            },
            Err(e) => {
                warn!("access token issued to \"{}\" is unreadable: {e}", credentials.username());
                match self.policy.malformed_token {
                    MalformedTokenPolicy::Retain => (
                        SessionState {
                            token: Some(token.clone()),
                            identity: None,
                        },
                        Some(StoredCredential::access_token(token, None)),
                    ),
                    MalformedTokenPolicy::Discard => (SessionState::default(), None),
                }
            },
        };

        let mut state = self.state.write().await;
        match persisted {
            Some(credential) => self.credential_store.set(credential).await?,
            None => {
                self.credential_store.remove(TOKEN_CREDENTIAL_NAME).await?;
            },
        }
        let role = new_state.identity.as_ref().map(|identity| identity.role);
        *state = new_state;
        match role {
            Some(role) => info!("logged in \"{}\" as {role}", credentials.username()),
            None => info!("logged in \"{}\" with an unknown role", credentials.username()),
        }
        Ok(role)
    }

    async fn logout(&self) -> Result<(), SessionError> {
        let mut state = self.state.write().await;
        match state.identity.as_ref() {
            Some(identity) => info!("logging out \"{}\"", identity.subject),
            None if state.token.is_some() => info!("logging out"),
            None => debug!("logging out with no session"),
        }
        *state = SessionState::default();
        self.credential_store.remove(TOKEN_CREDENTIAL_NAME).await?;
        Ok(())
    }

    async fn session(&self) -> Session {
        let session = self.snapshot().await;
        if !self.policy.enforce_expiry || !session.is_expired(self.clock.now()) {
            return session;
        }
        self.clear_expired().await;
        self.snapshot().await
    }

    async fn wait_ready(&self) {
        let mut ready = self.ready.subscribe();
        // the sender lives as long as self
        let _ = ready.wait_for(|ready| *ready).await;
    }
}

pub type ProductionSessionStore = SessionStoreImpl<ProductionAuthenticator, ProductionCredentialStore, SystemClock>;

impl ProductionSessionStore {
    pub fn production(
        api: ApiClient,
        credential_file: impl AsRef<Path>,
        policy: SessionPolicy,
    ) -> Self {
        SessionStoreImpl::new(
            ProductionAuthenticator::new(api),
            ProductionCredentialStore::new(credential_file),
            SystemClock,
            policy,
        )
    }
}
