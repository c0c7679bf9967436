use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv in {}: {message}", path.display())]
    Csv { path: PathBuf, message: String },
    #[error("malformed json in {}: {message}", path.display())]
    Json { path: PathBuf, message: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("store error: {0}")]
    Store(String),
    #[error("config error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CatalogError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
