//! Core library for issuing DID-based issuer credentials and brokering
//! credential shares.
//!
//! The library coordinates an off-chain issuer record with on-chain
//! delegations on one or more blockchain networks, and stores short-lived
//! references to credential bundles that a holder presents via a compact id.
//!
//! ## Repository structure
//!
//! The library consists of two crates:
//!
//! * **Providers**
//!   * Chain adapters and the delegation provider
//!   * Document storage
//!   * Image storage
//!   * Token payload extraction
//! * **Core**
//!   * Services
//!
//! The **Providers** are modular implementations of the individual concerns
//! and can be used directly. The **Core** is a service layer orchestrating
//! the providers; services return provider types.
//!
//! ## Getting started
//!
//! ```ignore rust
//! /// `None` initializes the core with the default configuration
//! let core = IssuerCore::new(None).unwrap();
//! ```
//!
//! Then start using the services, e.g.:
//! ```ignore rust
//! let issuer = core
//!     .issuer_service
//!     .add_issuer(&did, "name", "description")
//!     .await?;
//! ```

use std::error::Error;
use std::{collections::HashMap, default::Default, sync::Arc};

use issuer_providers::{
    chain::{
        imp::{
            ethr_registry::{EthrRegistryAdapter, Params as EthrRegistryParams},
            provider::DelegationProviderImpl,
        },
        provider::DelegationProvider,
        ChainAdapter,
    },
    image_storage::in_memory::InMemoryImageStorage,
    storage::in_memory::{
        InMemoryDelegateTransactionStorage, InMemoryIssuerStorage, InMemoryPresentationStorage,
        InMemoryShareRequestStorage,
    },
};

use config::CoreConfig;
use service::{
    issuer::IssuerService, presentation::PresentationService,
    share_request::ShareRequestService,
};

pub mod config;
pub mod model;
pub mod service;

pub struct IssuerCore {
    pub delegation_provider: Arc<dyn DelegationProvider>,
    pub issuer_service: IssuerService,
    pub share_request_service: ShareRequestService,
    pub presentation_service: PresentationService,
}

impl Default for IssuerCore {
    fn default() -> Self {
        Self::new(None).unwrap()
    }
}

impl IssuerCore {
    pub fn new(config: Option<CoreConfig>) -> Result<Self, Box<dyn Error>> {
        let config = config.unwrap_or(CoreConfig {
            ..Default::default()
        });

        // initialize chain adapters and the delegation provider
        let mut adapters: HashMap<String, Arc<dyn ChainAdapter>> = HashMap::new();
        for network in &config.delegation_config.networks {
            let adapter = EthrRegistryAdapter::new(EthrRegistryParams {
                rpc_url: network.rpc_url.to_owned(),
                registry_address: network.registry_address.to_owned(),
                delegate_address: network.delegate_address.to_owned(),
                private_key: network.private_key.to_owned(),
                delegate_type: network.delegate_type.to_owned(),
                delegate_validity: network.delegate_validity,
                gas_price: network.gas_price,
            })?;
            adapters.insert(network.name.to_owned(), Arc::new(adapter) as _);
        }
        let delegation_provider = Arc::new(DelegationProviderImpl::new(
            adapters,
            config.delegation_config.default_network.to_owned(),
        ));

        // initialize storage
        let issuer_storage = Arc::new(InMemoryIssuerStorage::new());
        let transaction_storage = Arc::new(InMemoryDelegateTransactionStorage::new());
        let share_request_storage = Arc::new(InMemoryShareRequestStorage::new());
        let presentation_storage = Arc::new(InMemoryPresentationStorage::new());
        let image_storage = Arc::new(InMemoryImageStorage::new());

        let issuer_service = IssuerService::new(
            delegation_provider.clone(),
            issuer_storage,
            transaction_storage,
            image_storage,
            config.delegation_config.delegate_duration,
            config.image_config.max_image_size,
        );

        let share_request_service = ShareRequestService::new(
            share_request_storage,
            config.share_request_config.default_ttl,
        );

        let presentation_service = PresentationService::new(
            presentation_storage,
            config.presentation_config.default_ttl,
        );

        Ok(Self {
            delegation_provider,
            issuer_service,
            share_request_service,
            presentation_service,
        })
    }
}
