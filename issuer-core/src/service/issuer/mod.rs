//! Issuer lifecycle over the delegation provider and the document store.
//!
//! An issuer moves through `Absent -> Active -> (Refreshed)* -> Deleted`.
//! Creation and refresh are two-step: the on-chain delegation and the record
//! write share no transaction, so the accepted transaction hash is logged
//! between the steps for out-of-band reconciliation.

use std::sync::Arc;

use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use issuer_providers::{
    chain::provider::DelegationProvider,
    common_models::{
        delegate_transaction::{DelegateTransaction, DelegateTransactionId},
        did::DidValue,
        issuer::{ImageId, Issuer, IssuerId},
    },
    image_storage::ImageStorage,
    storage::{
        DelegateTransactionStorage, IssuerListQuery, IssuerStorage, IssuerUpdate, StorageError,
    },
};

use crate::service::error::{IssuerServiceError, ValidationError};

pub struct IssuerService {
    delegation_provider: Arc<dyn DelegationProvider>,
    issuer_storage: Arc<dyn IssuerStorage>,
    transaction_storage: Arc<dyn DelegateTransactionStorage>,
    image_storage: Arc<dyn ImageStorage>,
    client: reqwest::Client,
    delegate_duration: Option<u64>,
    max_image_size: usize,
}

/// Authorization request appended to the delegate-transaction audit log.
#[derive(Debug, Clone)]
pub struct DelegateTransactionRequest {
    pub did: DidValue,
    pub name: Option<String>,
    pub callback_url: String,
    pub token: String,
    pub action: String,
    pub description: Option<String>,
}

impl IssuerService {
    pub fn new(
        delegation_provider: Arc<dyn DelegationProvider>,
        issuer_storage: Arc<dyn IssuerStorage>,
        transaction_storage: Arc<dyn DelegateTransactionStorage>,
        image_storage: Arc<dyn ImageStorage>,
        delegate_duration: Option<u64>,
        max_image_size: usize,
    ) -> Self {
        Self {
            delegation_provider,
            issuer_storage,
            transaction_storage,
            image_storage,
            client: reqwest::Client::new(),
            delegate_duration,
            max_image_size,
        }
    }

    pub async fn add_issuer(
        &self,
        did: &DidValue,
        name: &str,
        description: &str,
    ) -> Result<Issuer, IssuerServiceError> {
        if did.is_empty() {
            return Err(ValidationError::MissingDid.into());
        }
        if name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        if description.is_empty() {
            return Err(ValidationError::MissingDescription.into());
        }

        // any existing record rejects creation, soft-deleted ones included
        if self.issuer_storage.get_by_did(did).await?.is_some() {
            return Err(IssuerServiceError::DidExists);
        }

        let receipt = self.delegation_provider.add_delegate(did).await?;
        tracing::info!(
            did = %did,
            transaction_hash = %receipt.transaction_hash,
            "delegate transaction accepted"
        );

        let issuer = Issuer {
            id: IssuerId::from(Uuid::new_v4()),
            did: did.to_owned(),
            name: name.to_owned(),
            description: description.to_owned(),
            image_id: None,
            block_hash: receipt.transaction_hash,
            deleted: false,
            expire_on: self.delegation_expiry(),
            created_on: OffsetDateTime::now_utc(),
            modified_on: None,
        };

        self.issuer_storage
            .create(issuer)
            .await
            .map_err(|error| match error {
                StorageError::DuplicateKey(_) => IssuerServiceError::DidExists,
                other => other.into(),
            })
    }

    pub async fn edit_data(
        &self,
        did: &DidValue,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Issuer, IssuerServiceError> {
        if did.is_empty() {
            return Err(ValidationError::MissingDid.into());
        }

        let issuer = self
            .issuer_storage
            .get_by_did(did)
            .await?
            .ok_or(IssuerServiceError::DidNotExists)?;

        Ok(self
            .issuer_storage
            .update(IssuerUpdate {
                name,
                description,
                ..IssuerUpdate::new(issuer.id)
            })
            .await?)
    }

    /// Obtains a fresh delegation for an active issuer and persists the new
    /// transaction hash and expiry together. Never resurrects a deleted
    /// issuer.
    pub async fn refresh(&self, did: &DidValue) -> Result<Issuer, IssuerServiceError> {
        if did.is_empty() {
            return Err(ValidationError::MissingDid.into());
        }

        let issuer = match self.issuer_storage.get_by_did(did).await? {
            Some(issuer) if !issuer.deleted => issuer,
            _ => return Err(IssuerServiceError::DidNotExists),
        };

        let receipt = self.delegation_provider.add_delegate(did).await?;
        tracing::info!(
            did = %did,
            transaction_hash = %receipt.transaction_hash,
            "delegate transaction accepted"
        );

        Ok(self
            .issuer_storage
            .update(IssuerUpdate {
                block_hash: Some(receipt.transaction_hash),
                expire_on: Some(self.delegation_expiry()),
                ..IssuerUpdate::new(issuer.id)
            })
            .await?)
    }

    /// Soft-deletes the issuer; records are never physically removed.
    pub async fn delete(&self, did: &DidValue) -> Result<Issuer, IssuerServiceError> {
        if did.is_empty() {
            return Err(ValidationError::MissingDid.into());
        }

        let issuer = self
            .issuer_storage
            .get_by_did(did)
            .await?
            .ok_or(IssuerServiceError::DidNotExists)?;

        Ok(self
            .issuer_storage
            .update(IssuerUpdate {
                deleted: Some(true),
                ..IssuerUpdate::new(issuer.id)
            })
            .await?)
    }

    /// Checks the issuer's current on-chain authority.
    pub async fn verify_issuer(&self, did: &DidValue) -> Result<(), IssuerServiceError> {
        if did.is_empty() {
            return Err(ValidationError::MissingDid.into());
        }

        if !self.delegation_provider.valid_delegate(did).await? {
            return Err(IssuerServiceError::IssuerInvalid);
        }

        Ok(())
    }

    pub async fn save_image(
        &self,
        did: &DidValue,
        content_type: &str,
        path: &str,
    ) -> Result<ImageId, IssuerServiceError> {
        if did.is_empty() {
            return Err(ValidationError::MissingDid.into());
        }
        if content_type.is_empty() {
            return Err(ValidationError::MissingContentType.into());
        }
        if path.is_empty() {
            return Err(ValidationError::MissingPath.into());
        }

        let issuer = self
            .issuer_storage
            .get_by_did(did)
            .await
            .map_err(|error| {
                tracing::warn!(%error, "issuer lookup failed while saving image");
                IssuerServiceError::ImageCreate
            })?
            .ok_or(IssuerServiceError::DidNotExists)?;

        let content = tokio::fs::read(path)
            .await
            .map_err(|_| IssuerServiceError::ImageCreate)?;
        if content.len() > self.max_image_size {
            return Err(IssuerServiceError::ImageCreate);
        }

        let image_id = self
            .image_storage
            .store(content, content_type.to_owned())
            .await
            .map_err(|_| IssuerServiceError::ImageCreate)?;

        self.issuer_storage
            .update(IssuerUpdate {
                image_id: Some(image_id),
                ..IssuerUpdate::new(issuer.id)
            })
            .await
            .map_err(|_| IssuerServiceError::ImageCreate)?;

        Ok(image_id)
    }

    pub async fn get_all(&self, limit: u32, page: u32) -> Result<Vec<Issuer>, IssuerServiceError> {
        Ok(self
            .issuer_storage
            .list(IssuerListQuery { limit, page })
            .await?)
    }

    pub async fn get_issuer_by_did(
        &self,
        did: &DidValue,
    ) -> Result<Option<Issuer>, IssuerServiceError> {
        if did.is_empty() {
            return Err(ValidationError::MissingDid.into());
        }

        Ok(self.issuer_storage.get_by_did(did).await?)
    }

    /// Sends the outcome of an authorization request back to its origin.
    pub async fn callback(
        &self,
        url: &str,
        did: &DidValue,
        token: &str,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value, IssuerServiceError> {
        if did.is_empty() {
            return Err(ValidationError::MissingDid.into());
        }
        if url.is_empty() {
            return Err(ValidationError::MissingUrl.into());
        }
        if token.is_empty() {
            return Err(ValidationError::MissingToken.into());
        }
        if data.is_null() {
            return Err(ValidationError::MissingData.into());
        }

        let response = self
            .client
            .put(format!("{url}/{did}"))
            .header(reqwest::header::AUTHORIZATION, token)
            .json(data)
            .send()
            .await
            .map_err(|error| IssuerServiceError::Callback(error.to_string()))?;

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|error| IssuerServiceError::Callback(error.to_string()))?;

        if body.get("status").and_then(|status| status.as_str()) == Some("error") {
            return Err(IssuerServiceError::Callback(body.to_string()));
        }

        Ok(body)
    }

    pub async fn create_delegate_transaction(
        &self,
        request: DelegateTransactionRequest,
    ) -> Result<DelegateTransaction, IssuerServiceError> {
        if request.did.is_empty() {
            return Err(ValidationError::MissingDid.into());
        }
        if request.callback_url.is_empty() {
            return Err(ValidationError::MissingCallback.into());
        }
        if request.token.is_empty() {
            return Err(ValidationError::MissingToken.into());
        }
        if request.action.is_empty() {
            return Err(ValidationError::MissingAction.into());
        }

        Ok(self
            .transaction_storage
            .create(DelegateTransaction {
                id: DelegateTransactionId::from(Uuid::new_v4()),
                did: request.did,
                name: request.name,
                callback_url: request.callback_url,
                token: request.token,
                action: request.action,
                description: request.description,
                created_on: OffsetDateTime::now_utc(),
            })
            .await?)
    }

    fn delegation_expiry(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        match self.delegate_duration {
            Some(seconds) => now + Duration::seconds(seconds as i64),
            None => now,
        }
    }
}

#[cfg(test)]
mod test;
