//! Binary blob storage for issuer images.

use thiserror::Error;
use time::OffsetDateTime;

use crate::common_models::issuer::ImageId;

pub mod in_memory;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait ImageStorage: Send + Sync {
    async fn store(
        &self,
        content: Vec<u8>,
        content_type: String,
    ) -> Result<ImageId, ImageStorageError>;

    async fn get_by_id(&self, id: &ImageId) -> Result<Option<StoredImage>, ImageStorageError>;
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StoredImage {
    pub id: ImageId,
    pub content_type: String,
    pub content: Vec<u8>,
    pub created_on: OffsetDateTime,
}

#[derive(Clone, Error, Debug)]
pub enum ImageStorageError {
    #[error("Store error: `{0}`")]
    Store(String),
    #[error("Get error: `{0}`")]
    Get(String),
}
