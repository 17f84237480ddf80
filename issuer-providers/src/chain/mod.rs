//! Tools for delegate operations against DID registry contracts.
//!
//! An issuer DID is granted signing authority by delegating to a configured
//! address on the DID registry of one or more blockchain networks. Each
//! network is wrapped by a [`ChainAdapter`]; the
//! [`provider::DelegationProvider`] fans calls out to the adapter matching
//! the DID.

use async_trait::async_trait;

use crate::{
    chain::{error::ChainAdapterError, model::DelegateReceipt},
    common_models::did::DidValue,
};

pub mod error;
pub mod imp;
pub mod model;
pub mod provider;

/// Performs delegate operations on one blockchain network.
///
/// On-chain mutation is irreversible and latency-bound by the network;
/// success means "transaction accepted by the node", not finality.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Submits a transaction granting the configured delegate signing rights
    /// on behalf of `issuer_did` for the configured type and duration.
    async fn add_delegate(
        &self,
        issuer_did: &DidValue,
    ) -> Result<DelegateReceipt, ChainAdapterError>;

    /// Read-only check of whether the configured delegate currently holds
    /// authority for `issuer_did`. Returns `false`, not an error, when no
    /// delegation exists or it expired.
    async fn valid_delegate(&self, issuer_did: &DidValue) -> Result<bool, ChainAdapterError>;

    /// Submits a transaction removing delegate authority. Revoking an
    /// already-revoked delegate succeeds.
    async fn revoke_delegate(
        &self,
        issuer_did: &DidValue,
    ) -> Result<DelegateReceipt, ChainAdapterError>;
}
