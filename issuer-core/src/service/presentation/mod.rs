//! Broker for stored credential presentations.
//!
//! Unlike share requests, presentations are not audience-bound; retrieval
//! checks only that the record exists and has not expired.

use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use issuer_providers::{
    common_models::presentation::{Presentation, PresentationId},
    storage::PresentationStorage,
};

use crate::service::error::{PresentationServiceError, ValidationError};

pub struct PresentationService {
    storage: Arc<dyn PresentationStorage>,
    default_ttl: u64,
}

impl PresentationService {
    pub fn new(storage: Arc<dyn PresentationStorage>, default_ttl: u64) -> Self {
        Self {
            storage,
            default_ttl,
        }
    }

    /// Stores a JSON array of credential tokens under a fresh id.
    pub async fn save_presentation(
        &self,
        jwts: &str,
    ) -> Result<Presentation, PresentationServiceError> {
        if jwts.is_empty() {
            return Err(ValidationError::MissingJwt.into());
        }

        let parsed: Vec<String> =
            serde_json::from_str(jwts).map_err(|_| PresentationServiceError::Create)?;

        self.storage
            .create(Presentation {
                id: PresentationId::from(Uuid::new_v4()),
                jwts: parsed,
                expire_on: OffsetDateTime::now_utc() + Duration::seconds(self.default_ttl as i64),
                created_on: OffsetDateTime::now_utc(),
            })
            .await
            .map_err(|_| PresentationServiceError::Create)
    }

    pub async fn get_presentation(
        &self,
        id: &str,
    ) -> Result<Presentation, PresentationServiceError> {
        if id.is_empty() {
            return Err(ValidationError::MissingId.into());
        }

        let Ok(id) = Uuid::parse_str(id) else {
            return Err(PresentationServiceError::NotFound);
        };

        let presentation = self
            .storage
            .get_by_id(&PresentationId::from(id))
            .await
            .map_err(|_| PresentationServiceError::Get)?
            .ok_or(PresentationServiceError::NotFound)?;

        if presentation.expire_on < OffsetDateTime::now_utc() {
            return Err(PresentationServiceError::Expired);
        }

        Ok(presentation)
    }
}
