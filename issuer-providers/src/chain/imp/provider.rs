use std::{collections::HashMap, sync::Arc};

use crate::{
    chain::{
        error::DelegationProviderError, model::DelegateReceipt, provider::DelegationProvider,
        ChainAdapter,
    },
    common_models::did::DidValue,
};

/// Registry of chain adapters keyed by network name.
///
/// DIDs carrying a network tag route to the matching adapter; untagged DIDs
/// write through the default network and validate with OR across every
/// configured network.
pub struct DelegationProviderImpl {
    adapters: HashMap<String, Arc<dyn ChainAdapter>>,
    default_network: String,
}

impl DelegationProviderImpl {
    pub fn new(adapters: HashMap<String, Arc<dyn ChainAdapter>>, default_network: String) -> Self {
        Self {
            adapters,
            default_network,
        }
    }

    fn route(&self, issuer_did: &DidValue) -> Result<Arc<dyn ChainAdapter>, DelegationProviderError> {
        let network = issuer_did
            .network_tag()
            .unwrap_or(self.default_network.as_str());

        self.adapters
            .get(network)
            .cloned()
            .ok_or_else(|| DelegationProviderError::MissingAdapter(network.to_owned()))
    }
}

#[async_trait::async_trait]
impl DelegationProvider for DelegationProviderImpl {
    fn get_adapter(&self, network: &str) -> Option<Arc<dyn ChainAdapter>> {
        self.adapters.get(network).cloned()
    }

    async fn add_delegate(
        &self,
        issuer_did: &DidValue,
    ) -> Result<DelegateReceipt, DelegationProviderError> {
        if issuer_did.is_empty() {
            return Err(DelegationProviderError::MissingIssuerDid);
        }

        let adapter = self.route(issuer_did)?;
        Ok(adapter.add_delegate(issuer_did).await?)
    }

    async fn valid_delegate(
        &self,
        issuer_did: &DidValue,
    ) -> Result<bool, DelegationProviderError> {
        if issuer_did.is_empty() {
            return Err(DelegationProviderError::MissingIssuerDid);
        }

        if let Some(network) = issuer_did.network_tag() {
            let adapter = self
                .adapters
                .get(network)
                .cloned()
                .ok_or_else(|| DelegationProviderError::MissingAdapter(network.to_owned()))?;
            return Ok(adapter.valid_delegate(issuer_did).await?);
        }

        if self.adapters.is_empty() {
            return Err(DelegationProviderError::MissingAdapter(
                self.default_network.to_owned(),
            ));
        }

        // A delegation on any configured network confirms validity; an
        // unreachable network is tolerated as long as one answers.
        let mut first_error = None;
        let mut answered = false;
        for (network, adapter) in &self.adapters {
            match adapter.valid_delegate(issuer_did).await {
                Ok(true) => return Ok(true),
                Ok(false) => answered = true,
                Err(error) => {
                    tracing::warn!(network = %network, %error, "delegate validity check failed");
                    if first_error.is_none() {
                        first_error = Some(error);
                    }
                }
            }
        }

        match (answered, first_error) {
            (false, Some(error)) => Err(error.into()),
            _ => Ok(false),
        }
    }

    async fn revoke_delegate(
        &self,
        issuer_did: &DidValue,
    ) -> Result<DelegateReceipt, DelegationProviderError> {
        if issuer_did.is_empty() {
            return Err(DelegationProviderError::MissingIssuerDid);
        }

        let adapter = self.route(issuer_did)?;
        Ok(adapter.revoke_delegate(issuer_did).await?)
    }
}
