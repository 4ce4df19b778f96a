use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use log::trace;
use time::OffsetDateTime;
use tokio::fs;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use crate::credential_store::internal::data::CredentialsData;
use crate::credential_store::CredentialStoreError;

#[async_trait]
pub(super) trait CredentialStoreIo: Send + Sync {
    async fn read_credential_file(
        &self,
    ) -> Result<CredentialsData, CredentialStoreError>;

    async fn write_credential_file(
        &self,
        credentials_data: &CredentialsData,
    ) -> Result<(), CredentialStoreError>;

    fn get_time(&self) -> OffsetDateTime;
}

pub struct ProductionCredentialStoreIo {
    credential_file: PathBuf,
}

impl ProductionCredentialStoreIo {
    pub fn new(credential_file: impl AsRef<Path>) -> Self {
        ProductionCredentialStoreIo {
            credential_file: credential_file.as_ref().to_path_buf(),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut file_name = self.credential_file
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.credential_file.with_file_name(file_name)
    }
}

#[async_trait]
impl CredentialStoreIo for ProductionCredentialStoreIo {
    async fn read_credential_file(
        &self,
    ) -> Result<CredentialsData, CredentialStoreError> {
        match fs::read_to_string(&self.credential_file).await {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                trace!(
                    "no credential file at {}",
                    self.credential_file.display(),
                );
                Ok(CredentialsData::default())
            },
            Err(e) => Err(e.into()),
        }
    }

    async fn write_credential_file(
        &self,
        credentials_data: &CredentialsData,
    ) -> Result<(), CredentialStoreError> {
        let contents = toml::to_string(credentials_data)?;
        if let Some(parent) = self.credential_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let tmp_path = self.tmp_path();
        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)] options.mode(0o600);
        let mut tmp_file = options.open(&tmp_path).await?;
        tmp_file.write_all(contents.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);
        fs::rename(&tmp_path, &self.credential_file).await?;
        Ok(())
    }

    fn get_time(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
