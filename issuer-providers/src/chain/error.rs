//! Enumerates errors related to chain adapters and the delegation provider.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainAdapterError {
    #[error("Invalid issuer DID: `{0}`")]
    InvalidArgument(String),
    #[error("Network error: `{0}`")]
    Network(String),
    #[error("Contract call rejected: `{0}`")]
    ChainRejected(String),
}

#[derive(Debug, Error)]
pub enum DelegationProviderError {
    #[error("Missing issuer DID")]
    MissingIssuerDid,
    #[error("Missing chain adapter: `{0}`")]
    MissingAdapter(String),
    #[error(transparent)]
    ChainAdapter(#[from] ChainAdapterError),
}
