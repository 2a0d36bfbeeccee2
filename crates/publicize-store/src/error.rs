use publicize_format::PostId;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unknown post: {0}")]
    UnknownPost(PostId),
    #[error("invalid store document: {0}")]
    InvalidDocument(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for publicize_runtime::Error {
    fn from(err: StoreError) -> Self {
        publicize_runtime::Error::storage(err)
    }
}
