//! Broker for audience-bound credential share requests.
//!
//! Creation trusts the stored token's own `aud`/`iss` claims at face value;
//! retrieval re-derives `iss` from a second, independently supplied token
//! and only releases the stored token to the audience it was addressed to.
//! That double indirection is the entire authorization model.

use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use issuer_providers::{
    common_models::share_request::{ShareRequest, ShareRequestId},
    storage::ShareRequestStorage,
    token::extract_payload,
};

use crate::service::error::{ShareRequestServiceError, ValidationError};

pub struct ShareRequestService {
    storage: Arc<dyn ShareRequestStorage>,
    default_ttl: u64,
}

impl ShareRequestService {
    pub fn new(storage: Arc<dyn ShareRequestStorage>, default_ttl: u64) -> Self {
        Self {
            storage,
            default_ttl,
        }
    }

    /// Stores a credential bundle exactly as received; the token is never
    /// re-signed. Signature verification is the caller's responsibility
    /// upstream.
    pub async fn save_share_request(
        &self,
        jwt: &str,
    ) -> Result<ShareRequest, ShareRequestServiceError> {
        if jwt.is_empty() {
            return Err(ValidationError::MissingJwt.into());
        }

        let payload = extract_payload(jwt).map_err(|_| ShareRequestServiceError::Create)?;
        let expire_on = payload.expires_at.unwrap_or_else(|| {
            OffsetDateTime::now_utc() + Duration::seconds(self.default_ttl as i64)
        });

        self.storage
            .create(ShareRequest {
                id: ShareRequestId::from(Uuid::new_v4()),
                aud: payload.audience,
                iss: payload.issuer,
                jwt: jwt.to_owned(),
                expire_on,
                created_on: OffsetDateTime::now_utc(),
            })
            .await
            .map_err(|_| ShareRequestServiceError::Create)
    }

    /// Returns the stored token unmodified when the requesting token's `iss`
    /// matches the stored `aud`. Expiry is checked before the audience.
    pub async fn get_share_request_by_id(
        &self,
        id: &str,
        user_jwt: &str,
    ) -> Result<String, ShareRequestServiceError> {
        if id.is_empty() {
            return Err(ValidationError::MissingId.into());
        }
        if user_jwt.is_empty() {
            return Err(ValidationError::MissingUserJwt.into());
        }

        let Ok(id) = Uuid::parse_str(id) else {
            return Err(ShareRequestServiceError::NotFound);
        };

        let request = self
            .storage
            .get_by_id(&ShareRequestId::from(id))
            .await
            .map_err(|_| ShareRequestServiceError::Get)?
            .ok_or(ShareRequestServiceError::NotFound)?;

        if request.expire_on < OffsetDateTime::now_utc() {
            return Err(ShareRequestServiceError::Expired);
        }

        let payload = extract_payload(user_jwt).map_err(|_| ShareRequestServiceError::Get)?;
        if payload.issuer.is_none() || payload.issuer != request.aud {
            return Err(ShareRequestServiceError::UserNotValid);
        }

        Ok(request.jwt)
    }
}
