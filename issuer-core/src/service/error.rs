use issuer_providers::{chain::error::DelegationProviderError, storage::StorageError};
use thiserror::Error;

/// Missing-argument errors, raised synchronously before any I/O. Each
/// operation checks its required fields in a fixed declared order.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Missing did")]
    MissingDid,
    #[error("Missing name")]
    MissingName,
    #[error("Missing description")]
    MissingDescription,
    #[error("Missing jwt")]
    MissingJwt,
    #[error("Missing id")]
    MissingId,
    #[error("Missing user jwt")]
    MissingUserJwt,
    #[error("Missing callback url")]
    MissingCallback,
    #[error("Missing action")]
    MissingAction,
    #[error("Missing token")]
    MissingToken,
    #[error("Missing url")]
    MissingUrl,
    #[error("Missing data")]
    MissingData,
    #[error("Missing content type")]
    MissingContentType,
    #[error("Missing path")]
    MissingPath,
}

#[derive(Debug, Error)]
pub enum IssuerServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Issuer DID already exists")]
    DidExists,
    #[error("Issuer DID does not exist")]
    DidNotExists,
    #[error("Issuer has no valid delegation")]
    IssuerInvalid,
    /// Image failures collapse to this single variant; the root cause is
    /// logged, never surfaced.
    #[error("Could not create image")]
    ImageCreate,
    #[error("Callback request failed: `{0}`")]
    Callback(String),
    #[error(transparent)]
    Delegation(#[from] DelegationProviderError),
    #[error("Storage error: `{0}`")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Error)]
pub enum ShareRequestServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Share request not found")]
    NotFound,
    #[error("Share request expired")]
    Expired,
    #[error("User is not the intended audience")]
    UserNotValid,
    /// Decode and persist failures collapse to this single variant.
    #[error("Could not create share request")]
    Create,
    #[error("Could not get share request")]
    Get,
}

#[derive(Debug, Error)]
pub enum PresentationServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Presentation not found")]
    NotFound,
    #[error("Presentation expired")]
    Expired,
    #[error("Could not create presentation")]
    Create,
    #[error("Could not get presentation")]
    Get,
}
