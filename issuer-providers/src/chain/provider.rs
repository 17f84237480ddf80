//! Delegation provider.

use std::sync::Arc;

use crate::{
    chain::{error::DelegationProviderError, model::DelegateReceipt, ChainAdapter},
    common_models::did::DidValue,
};

/// Network-agnostic delegate operations over a registry of chain adapters.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait DelegationProvider: Send + Sync {
    fn get_adapter(&self, network: &str) -> Option<Arc<dyn ChainAdapter>>;

    async fn add_delegate(
        &self,
        issuer_did: &DidValue,
    ) -> Result<DelegateReceipt, DelegationProviderError>;

    async fn valid_delegate(&self, issuer_did: &DidValue)
        -> Result<bool, DelegationProviderError>;

    async fn revoke_delegate(
        &self,
        issuer_did: &DidValue,
    ) -> Result<DelegateReceipt, DelegationProviderError>;
}
