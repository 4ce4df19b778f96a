use std::io::Error as IoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error("invalid credential file contents: {0}")]
    Parsing(#[from] toml::de::Error),

    #[error("serializing the credentials failed: {0}")]
    Serialization(#[from] toml::ser::Error),
}
