use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use crate::{
    common_models::{
        delegate_transaction::{DelegateTransaction, DelegateTransactionId},
        did::DidValue,
        issuer::{Issuer, IssuerId},
        presentation::{Presentation, PresentationId},
        share_request::{ShareRequest, ShareRequestId},
    },
    storage::{
        DelegateTransactionStorage, IssuerListQuery, IssuerStorage, IssuerUpdate,
        PresentationStorage, ShareRequestStorage, StorageError,
    },
};

#[derive(Default)]
pub struct InMemoryIssuerStorage {
    records: Arc<Mutex<HashMap<IssuerId, Issuer>>>,
}

impl InMemoryIssuerStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IssuerStorage for InMemoryIssuerStorage {
    async fn create(&self, issuer: Issuer) -> Result<Issuer, StorageError> {
        let mut records = self.records.lock().await;

        // unique index on the DID, counting soft-deleted records
        if records.values().any(|existing| existing.did == issuer.did) {
            return Err(StorageError::DuplicateKey(issuer.did.to_string()));
        }

        records.insert(issuer.id, issuer.to_owned());
        Ok(issuer)
    }

    async fn get_by_did(&self, did: &DidValue) -> Result<Option<Issuer>, StorageError> {
        let records = self.records.lock().await;

        Ok(records.values().find(|issuer| &issuer.did == did).cloned())
    }

    async fn update(&self, update: IssuerUpdate) -> Result<Issuer, StorageError> {
        let mut records = self.records.lock().await;

        let record = records
            .get_mut(&update.id)
            .ok_or_else(|| StorageError::NotFound(update.id.to_string()))?;

        if let Some(name) = update.name {
            record.name = name;
        }
        if let Some(description) = update.description {
            record.description = description;
        }
        if let Some(block_hash) = update.block_hash {
            record.block_hash = block_hash;
        }
        if let Some(expire_on) = update.expire_on {
            record.expire_on = expire_on;
        }
        if let Some(image_id) = update.image_id {
            record.image_id = Some(image_id);
        }
        if let Some(deleted) = update.deleted {
            record.deleted = deleted;
        }
        record.modified_on = Some(OffsetDateTime::now_utc());

        Ok(record.to_owned())
    }

    async fn list(&self, query: IssuerListQuery) -> Result<Vec<Issuer>, StorageError> {
        let records = self.records.lock().await;

        let mut issuers: Vec<Issuer> = records
            .values()
            .filter(|issuer| !issuer.deleted)
            .cloned()
            .collect();
        issuers.sort_by(|left, right| left.name.cmp(&right.name));

        let skip = if query.page > 0 {
            (query.page as usize - 1) * query.limit as usize
        } else {
            0
        };

        let remaining = issuers.into_iter().skip(skip);
        Ok(if query.limit > 0 {
            remaining.take(query.limit as usize).collect()
        } else {
            remaining.collect()
        })
    }
}

#[derive(Default)]
pub struct InMemoryShareRequestStorage {
    records: Arc<Mutex<HashMap<ShareRequestId, ShareRequest>>>,
}

impl InMemoryShareRequestStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShareRequestStorage for InMemoryShareRequestStorage {
    async fn create(&self, request: ShareRequest) -> Result<ShareRequest, StorageError> {
        let mut records = self.records.lock().await;

        records.insert(request.id, request.to_owned());
        Ok(request)
    }

    async fn get_by_id(&self, id: &ShareRequestId) -> Result<Option<ShareRequest>, StorageError> {
        let records = self.records.lock().await;

        Ok(records.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPresentationStorage {
    records: Arc<Mutex<HashMap<PresentationId, Presentation>>>,
}

impl InMemoryPresentationStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresentationStorage for InMemoryPresentationStorage {
    async fn create(&self, presentation: Presentation) -> Result<Presentation, StorageError> {
        let mut records = self.records.lock().await;

        records.insert(presentation.id, presentation.to_owned());
        Ok(presentation)
    }

    async fn get_by_id(&self, id: &PresentationId) -> Result<Option<Presentation>, StorageError> {
        let records = self.records.lock().await;

        Ok(records.get(id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryDelegateTransactionStorage {
    records: Arc<Mutex<HashMap<DelegateTransactionId, DelegateTransaction>>>,
}

impl InMemoryDelegateTransactionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DelegateTransactionStorage for InMemoryDelegateTransactionStorage {
    async fn create(
        &self,
        transaction: DelegateTransaction,
    ) -> Result<DelegateTransaction, StorageError> {
        let mut records = self.records.lock().await;

        records.insert(transaction.id, transaction.to_owned());
        Ok(transaction)
    }
}
