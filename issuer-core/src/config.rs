use crate::model::NetworkType;

pub struct CoreConfig {
    pub delegation_config: DelegationConfig,
    pub share_request_config: ShareRequestConfig,
    pub presentation_config: PresentationConfig,
    pub image_config: ImageConfig,
}

pub struct DelegationConfig {
    pub networks: Vec<NetworkConfig>,
    /// Network used for untagged DIDs.
    pub default_network: String,
    /// Seconds an issuer record stays valid after delegation; `None` applies
    /// no expiry offset.
    pub delegate_duration: Option<u64>,
}

pub struct NetworkConfig {
    pub name: String,
    pub rpc_url: String,
    pub registry_address: String,
    pub delegate_address: String,
    pub private_key: String,
    pub delegate_type: String,
    /// Seconds the on-chain delegation stays valid.
    pub delegate_validity: u64,
    /// Fixed gas price in wei; gas-free networks pin this to zero.
    pub gas_price: Option<u64>,
}

pub struct ShareRequestConfig {
    /// Fallback TTL in seconds when the stored token carries no `exp` claim.
    pub default_ttl: u64,
}

pub struct PresentationConfig {
    pub default_ttl: u64,
}

pub struct ImageConfig {
    /// Largest accepted image, in bytes.
    pub max_image_size: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            delegation_config: DelegationConfig {
                networks: vec![],
                default_network: NetworkType::Rsk.to_string(),
                delegate_duration: None,
            },
            share_request_config: ShareRequestConfig { default_ttl: 3_600 },
            presentation_config: PresentationConfig { default_ttl: 600 },
            image_config: ImageConfig {
                max_image_size: 3_000_000,
            },
        }
    }
}
