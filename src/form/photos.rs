use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhotoError {
    #[error("photo unavailable: {0}")]
    Unavailable(String),

    #[error("photo read failed")]
    Io(#[from] std::io::Error),
}

/// One item picked by the user; yields its image bytes asynchronously.
#[async_trait]
pub trait PhotoSource: Send + Sync + 'static {
    async fn load_blob(&self) -> Result<Vec<u8>, PhotoError>;
}

/// Already-available bytes, e.g. a photo captured in-process.
#[async_trait]
impl PhotoSource for Vec<u8> {
    async fn load_blob(&self) -> Result<Vec<u8>, PhotoError> {
        Ok(self.clone())
    }
}

/// An image file on disk.
#[async_trait]
impl PhotoSource for std::path::PathBuf {
    async fn load_blob(&self) -> Result<Vec<u8>, PhotoError> {
        Ok(tokio::fs::read(self).await?)
    }
}
