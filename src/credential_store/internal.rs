use std::path::Path;
use async_trait::async_trait;
use log::{debug, info, trace, warn};
use tokio::sync::Mutex;
use crate::credential_store::internal::credential::StoredCredential;
use crate::credential_store::internal::data::{CredentialData, CredentialsData};
use crate::credential_store::internal::io_trait::{CredentialStoreIo, ProductionCredentialStoreIo};
use crate::credential_store::{CredentialStore, CredentialStoreError};

mod data;
pub mod credential;
mod io_trait;

#[allow(private_bounds)]
pub struct CredentialStoreImpl<Io: CredentialStoreIo> {
    io: Io,
    // serializes read-modify-write cycles on the credential file
    write_lock: Mutex<()>,
}

#[allow(private_bounds)]
impl<Io: CredentialStoreIo> CredentialStoreImpl<Io> {
    fn with_io(io: Io) -> Self {
        CredentialStoreImpl {
            io,
            write_lock: Mutex::new(()),
        }
    }

    async fn rewrite(
        &self,
        update: impl FnOnce(&mut Vec<CredentialData>) -> bool + Send,
    ) -> Result<bool, CredentialStoreError> {
        let _guard = self.write_lock.lock().await;
        let (mut data, replacing) = match self.io.read_credential_file().await {
            Ok(data) => (data, false),
            Err(CredentialStoreError::Parsing(e)) => {
                warn!("replacing unreadable credential file: {e}");
                (CredentialsData::default(), true)
            },
            Err(e) => return Err(e),
        };
        let now = self.io.get_time();
        let before = data.credentials.len();
        data.credentials.retain(|credential| {
            !credential.expires_at.is_some_and(|expires_at| expires_at <= now)
        });
        let purged = before != data.credentials.len();
        if purged {
            debug!("purging {} expired credentials", before - data.credentials.len());
        }
        let changed = update(&mut data.credentials);
        if changed || purged || replacing {
            trace!("writing credential file");
            self.io.write_credential_file(&data).await?;
        }
        Ok(changed)
    }
}

#[async_trait]
impl<Io: CredentialStoreIo> CredentialStore for CredentialStoreImpl<Io> {
    async fn get(
        &self,
        name: &str,
    ) -> Result<Option<String>, CredentialStoreError> {
        let data = self.io.read_credential_file().await?;
        let now = self.io.get_time();
        Ok(
            data.credentials
                .into_iter()
                .find(|credential| credential.name == name)
                .map(StoredCredential::from)
                .filter(|credential| {
                    let is_expired = credential.is_expired(now);
                    if is_expired {
                        debug!("stored credential \"{name}\" has expired");
                    }
                    !is_expired
                })
                .map(|credential| credential.value)
        )
    }

    async fn set(
        &self,
        credential: StoredCredential,
    ) -> Result<(), CredentialStoreError> {
        info!(
            "storing credential \"{}\", expires at {}",
            credential.name,
            credential.expires_at
                .map(|t| t.to_string())
                .unwrap_or_else(|| "removal".to_owned()),
        );
        self.rewrite(move |credentials| {
            credentials.retain(|c| c.name != credential.name);
            credentials.push(credential.into());
            true
        }).await?;
        Ok(())
    }

    async fn remove(
        &self,
        name: &str,
    ) -> Result<bool, CredentialStoreError> {
        let removed = self.rewrite(|credentials| {
            let before = credentials.len();
            credentials.retain(|c| c.name != name);
            before != credentials.len()
        }).await?;
        if removed {
            info!("removed credential \"{name}\"");
        }
        Ok(removed)
    }
}

pub type ProductionCredentialStore = CredentialStoreImpl<ProductionCredentialStoreIo>;

impl ProductionCredentialStore {
    pub fn new(credential_file: impl AsRef<Path>) -> Self {
        CredentialStoreImpl::with_io(
            ProductionCredentialStoreIo::new(credential_file),
        )
    }
}
