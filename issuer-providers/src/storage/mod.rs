//! Document storage for the issuer, share-request, presentation and
//! delegate-transaction records.
//!
//! The traits model a document store with unique-key lookup; the in-memory
//! implementations back tests and single-process deployments.

use thiserror::Error;
use time::OffsetDateTime;

use crate::common_models::{
    delegate_transaction::DelegateTransaction,
    did::DidValue,
    issuer::{ImageId, Issuer, IssuerId},
    presentation::{Presentation, PresentationId},
    share_request::{ShareRequest, ShareRequestId},
};

pub mod in_memory;

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait IssuerStorage: Send + Sync {
    /// Fails with [`StorageError::DuplicateKey`] when a record for the same
    /// DID already exists, deleted or not.
    async fn create(&self, issuer: Issuer) -> Result<Issuer, StorageError>;

    async fn get_by_did(&self, did: &DidValue) -> Result<Option<Issuer>, StorageError>;

    async fn update(&self, update: IssuerUpdate) -> Result<Issuer, StorageError>;

    /// Non-deleted records sorted by name ascending. `page` is 1-indexed;
    /// zero skips nothing. `limit` zero means unlimited.
    async fn list(&self, query: IssuerListQuery) -> Result<Vec<Issuer>, StorageError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait ShareRequestStorage: Send + Sync {
    async fn create(&self, request: ShareRequest) -> Result<ShareRequest, StorageError>;

    async fn get_by_id(&self, id: &ShareRequestId) -> Result<Option<ShareRequest>, StorageError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait PresentationStorage: Send + Sync {
    async fn create(&self, presentation: Presentation) -> Result<Presentation, StorageError>;

    async fn get_by_id(&self, id: &PresentationId) -> Result<Option<Presentation>, StorageError>;
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait DelegateTransactionStorage: Send + Sync {
    async fn create(
        &self,
        transaction: DelegateTransaction,
    ) -> Result<DelegateTransaction, StorageError>;
}

/// Partial update of an issuer record; `None` fields stay untouched.
#[derive(Debug, Clone)]
pub struct IssuerUpdate {
    pub id: IssuerId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub block_hash: Option<String>,
    pub expire_on: Option<OffsetDateTime>,
    pub image_id: Option<ImageId>,
    pub deleted: Option<bool>,
}

impl IssuerUpdate {
    pub fn new(id: IssuerId) -> Self {
        Self {
            id,
            name: None,
            description: None,
            block_hash: None,
            expire_on: None,
            image_id: None,
            deleted: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IssuerListQuery {
    pub limit: u32,
    pub page: u32,
}

#[derive(Clone, Error, Debug)]
pub enum StorageError {
    #[error("Duplicate key: `{0}`")]
    DuplicateKey(String),
    #[error("Record not found: `{0}`")]
    NotFound(String),
    #[error("Create error: `{0}`")]
    Create(String),
    #[error("Get error: `{0}`")]
    Get(String),
    #[error("Update error: `{0}`")]
    Update(String),
}
