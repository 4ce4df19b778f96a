use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use async_trait::async_trait;
use time::OffsetDateTime;
use crate::authenticator::{AuthenticationError, AuthenticationResponse, Authenticator, Credentials};
use crate::clock::Clock;
use crate::credential_store::{CredentialStore, CredentialStoreError, StoredCredential};

#[derive(Default)]
pub struct TestAuthenticator {
    replies: Mutex<VecDeque<Result<AuthenticationResponse, AuthenticationError>>>,
    calls: AtomicUsize,
}

impl TestAuthenticator {
    pub fn issuing(self, token: impl Into<String>) -> Self {
        self.reply(Ok(
            AuthenticationResponse {
                firstname: "Test".to_owned(),
                lastname: "User".to_owned(),
                token: token.into(),
            }
        ))
    }

    pub fn rejecting(self, reason: &str) -> Self {
        self.reply(Err(
            AuthenticationError::Rejected {
                status: 401,
                reason: reason.to_owned(),
            }
        ))
    }

    fn reply(self, reply: Result<AuthenticationResponse, AuthenticationError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for TestAuthenticator {
    async fn authenticate(
        &self,
        _credentials: &Credentials,
    ) -> Result<AuthenticationResponse, AuthenticationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.replies.lock().unwrap()
            .pop_front()
            .expect("unexpected authentication")
    }
}

#[derive(Default)]
pub struct TestCredentialStore {
    credentials: Mutex<HashMap<String, StoredCredential>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    panic_on_reads: AtomicBool,
}

impl TestCredentialStore {
    pub fn holding(credential: StoredCredential) -> Self {
        let store = TestCredentialStore::default();
        store.credentials.lock().unwrap().insert(credential.name.clone(), credential);
        store
    }

    pub fn stored(&self, name: &str) -> Option<StoredCredential> {
        self.credentials.lock().unwrap().get(name).cloned()
    }

    pub fn put(&self, credential: StoredCredential) {
        self.credentials.lock().unwrap().insert(credential.name.clone(), credential);
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn panic_on_reads(&self) {
        self.panic_on_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), CredentialStoreError> {
        if flag.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "test failure").into());
        }
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for TestCredentialStore {
    async fn get(
        &self,
        name: &str,
    ) -> Result<Option<String>, CredentialStoreError> {
        if self.panic_on_reads.load(Ordering::SeqCst) {
            panic!("credential read blew up");
        }
        self.check(&self.fail_reads)?;
        Ok(self.stored(name).map(|credential| credential.value))
    }

    async fn set(
        &self,
        credential: StoredCredential,
    ) -> Result<(), CredentialStoreError> {
        self.check(&self.fail_writes)?;
        self.put(credential);
        Ok(())
    }

    async fn remove(
        &self,
        name: &str,
    ) -> Result<bool, CredentialStoreError> {
        self.check(&self.fail_writes)?;
        Ok(self.credentials.lock().unwrap().remove(name).is_some())
    }
}

pub struct TestClock(Mutex<OffsetDateTime>);

impl TestClock {
    pub fn at(now: OffsetDateTime) -> Self {
        TestClock(Mutex::new(now))
    }

    pub fn set(&self, now: OffsetDateTime) {
        *self.0.lock().unwrap() = now;
    }
}

impl Clock for TestClock {
    fn now(&self) -> OffsetDateTime {
        *self.0.lock().unwrap()
    }
}
