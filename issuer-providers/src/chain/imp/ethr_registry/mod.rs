//! ERC-1056 (`did:ethr`) registry adapter.

use std::str::FromStr;

use async_trait::async_trait;
use web3::{
    contract::{Contract, Error as ContractError, Options},
    signing::SecretKey,
    transports::Http,
    types::{Address, Log, TransactionReceipt, H256, U256, U64},
    Web3,
};

use crate::{
    chain::{error::ChainAdapterError, model::DelegateReceipt, ChainAdapter},
    common_models::did::DidValue,
};

pub const DELEGATE_CHANGED_EVENT: &str = "DIDDelegateChanged";

const DELEGATE_CHANGED_SIGNATURE: &str =
    "DIDDelegateChanged(address,bytes32,address,uint256,uint256)";

#[derive(Debug, Clone)]
pub struct Params {
    pub rpc_url: String,
    pub registry_address: String,
    pub delegate_address: String,
    /// Hex-encoded secp256k1 key signing the delegate transactions.
    pub private_key: String,
    pub delegate_type: String,
    /// Seconds an on-chain delegation stays valid.
    pub delegate_validity: u64,
    /// Fixed gas price in wei; gas-free networks pin this to zero.
    pub gas_price: Option<u64>,
}

pub struct EthrRegistryAdapter {
    contract: Contract<Http>,
    delegate: Address,
    delegate_type: H256,
    validity: U256,
    gas_price: Option<U256>,
    key: SecretKey,
}

impl EthrRegistryAdapter {
    pub fn new(params: Params) -> Result<Self, ChainAdapterError> {
        let transport = Http::new(&params.rpc_url)
            .map_err(|e| ChainAdapterError::Network(e.to_string()))?;
        let web3 = Web3::new(transport);

        let registry = parse_address(&params.registry_address)?;
        let contract = Contract::from_json(web3.eth(), registry, include_bytes!("registry.json"))
            .map_err(|e| ChainAdapterError::InvalidArgument(e.to_string()))?;

        let key_bytes = hex::decode(params.private_key.trim_start_matches("0x"))
            .map_err(|e| ChainAdapterError::InvalidArgument(e.to_string()))?;
        let key = SecretKey::from_slice(&key_bytes)
            .map_err(|e| ChainAdapterError::InvalidArgument(e.to_string()))?;

        Ok(Self {
            contract,
            delegate: parse_address(&params.delegate_address)?,
            delegate_type: delegate_type_bytes(&params.delegate_type)?,
            validity: U256::from(params.delegate_validity),
            gas_price: params.gas_price.map(U256::from),
            key,
        })
    }

    fn transaction_options(&self) -> Options {
        Options {
            gas_price: self.gas_price,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ChainAdapter for EthrRegistryAdapter {
    async fn add_delegate(
        &self,
        issuer_did: &DidValue,
    ) -> Result<DelegateReceipt, ChainAdapterError> {
        let identity = parse_identity(issuer_did)?;

        let receipt = self
            .contract
            .signed_call_with_confirmations(
                "addDelegate",
                (identity, self.delegate_type, self.delegate, self.validity),
                self.transaction_options(),
                1,
                &self.key,
            )
            .await
            .map_err(map_transaction_error)?;

        into_delegate_receipt(receipt)
    }

    async fn valid_delegate(&self, issuer_did: &DidValue) -> Result<bool, ChainAdapterError> {
        let identity = parse_identity(issuer_did)?;

        self.contract
            .query(
                "validDelegate",
                (identity, self.delegate_type, self.delegate),
                None,
                Options::default(),
                None,
            )
            .await
            .map_err(map_query_error)
    }

    async fn revoke_delegate(
        &self,
        issuer_did: &DidValue,
    ) -> Result<DelegateReceipt, ChainAdapterError> {
        let identity = parse_identity(issuer_did)?;

        let receipt = self
            .contract
            .signed_call_with_confirmations(
                "revokeDelegate",
                (identity, self.delegate_type, self.delegate),
                self.transaction_options(),
                1,
                &self.key,
            )
            .await
            .map_err(map_transaction_error)?;

        into_delegate_receipt(receipt)
    }
}

/// Extracts the identity address from a `did:ethr[:<network>]:0x…` value.
pub(crate) fn parse_identity(issuer_did: &DidValue) -> Result<Address, ChainAdapterError> {
    let value = issuer_did.as_str();
    let rest = value
        .strip_prefix("did:ethr:")
        .ok_or_else(|| ChainAdapterError::InvalidArgument(value.to_owned()))?;

    let address = rest.rsplit(':').next().unwrap_or(rest);

    let digits = address
        .strip_prefix("0x")
        .ok_or_else(|| ChainAdapterError::InvalidArgument(value.to_owned()))?;

    if digits.len() != 40 {
        return Err(ChainAdapterError::InvalidArgument(value.to_owned()));
    }

    Address::from_str(digits).map_err(|_| ChainAdapterError::InvalidArgument(value.to_owned()))
}

fn parse_address(value: &str) -> Result<Address, ChainAdapterError> {
    Address::from_str(value.trim_start_matches("0x"))
        .map_err(|_| ChainAdapterError::InvalidArgument(value.to_owned()))
}

pub(crate) fn delegate_type_bytes(value: &str) -> Result<H256, ChainAdapterError> {
    if value.is_empty() || value.len() > 32 {
        return Err(ChainAdapterError::InvalidArgument(value.to_owned()));
    }

    let mut bytes = [0u8; 32];
    bytes[..value.len()].copy_from_slice(value.as_bytes());
    Ok(H256(bytes))
}

fn delegate_changed_topic() -> H256 {
    H256(web3::signing::keccak256(
        DELEGATE_CHANGED_SIGNATURE.as_bytes(),
    ))
}

pub(crate) fn decode_event_names(logs: &[Log]) -> Vec<String> {
    let topic = delegate_changed_topic();
    logs.iter()
        .filter(|log| log.topics.first() == Some(&topic))
        .map(|_| DELEGATE_CHANGED_EVENT.to_owned())
        .collect()
}

fn into_delegate_receipt(receipt: TransactionReceipt) -> Result<DelegateReceipt, ChainAdapterError> {
    if receipt.status == Some(U64::zero()) {
        return Err(ChainAdapterError::ChainRejected(format!(
            "transaction `{:#x}` reverted",
            receipt.transaction_hash
        )));
    }

    Ok(DelegateReceipt {
        transaction_hash: format!("{:#x}", receipt.transaction_hash),
        events: decode_event_names(&receipt.logs),
    })
}

fn map_transaction_error(error: web3::Error) -> ChainAdapterError {
    match error {
        web3::Error::Rpc(rpc) => ChainAdapterError::ChainRejected(rpc.to_string()),
        other => ChainAdapterError::Network(other.to_string()),
    }
}

fn map_query_error(error: ContractError) -> ChainAdapterError {
    match error {
        ContractError::Api(web3::Error::Rpc(rpc)) => ChainAdapterError::ChainRejected(rpc.to_string()),
        other => ChainAdapterError::Network(other.to_string()),
    }
}

#[cfg(test)]
mod test;
