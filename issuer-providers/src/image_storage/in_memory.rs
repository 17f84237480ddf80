use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    common_models::issuer::ImageId,
    image_storage::{ImageStorage, ImageStorageError, StoredImage},
};

#[derive(Default)]
pub struct InMemoryImageStorage {
    images: Arc<Mutex<HashMap<ImageId, StoredImage>>>,
}

impl InMemoryImageStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageStorage for InMemoryImageStorage {
    async fn store(
        &self,
        content: Vec<u8>,
        content_type: String,
    ) -> Result<ImageId, ImageStorageError> {
        let mut images = self.images.lock().await;

        let id = ImageId::from(Uuid::new_v4());
        images.insert(
            id,
            StoredImage {
                id,
                content_type,
                content,
                created_on: OffsetDateTime::now_utc(),
            },
        );

        Ok(id)
    }

    async fn get_by_id(&self, id: &ImageId) -> Result<Option<StoredImage>, ImageStorageError> {
        let images = self.images.lock().await;

        Ok(images.get(id).cloned())
    }
}
