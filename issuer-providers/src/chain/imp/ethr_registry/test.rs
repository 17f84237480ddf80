use super::{delegate_type_bytes, parse_identity, EthrRegistryAdapter, Params};
use crate::{chain::error::ChainAdapterError, common_models::did::DidValue};

fn test_params() -> Params {
    Params {
        rpc_url: "http://localhost:8545".to_string(),
        registry_address: "0xdca7ef03e98e0dc2b855be647c39abe984fcf21b".to_string(),
        delegate_address: "0x45df85e29ed6512f02e2b5c2d296a1d9d2bb7a4e".to_string(),
        private_key: "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
            .to_string(),
        delegate_type: "veriKey".to_string(),
        delegate_validity: 31_536_000,
        gas_price: None,
    }
}

#[test]
fn test_parse_identity_untagged_did() {
    let did = DidValue::from("did:ethr:0x45df85e29ed6512f02e2b5c2d296a1d9d2bb7a4e");
    parse_identity(&did).unwrap();
}

#[test]
fn test_parse_identity_network_tagged_did() {
    let untagged = DidValue::from("did:ethr:0x45df85e29ed6512f02e2b5c2d296a1d9d2bb7a4e");
    let tagged = DidValue::from("did:ethr:lacchain:0x45df85e29ed6512f02e2b5c2d296a1d9d2bb7a4e");

    assert_eq!(
        parse_identity(&untagged).unwrap(),
        parse_identity(&tagged).unwrap()
    );
}

#[test]
fn test_parse_identity_rejects_foreign_method() {
    let did = DidValue::from("did:web:example.com");
    assert!(matches!(
        parse_identity(&did),
        Err(ChainAdapterError::InvalidArgument(_))
    ));
}

#[test]
fn test_parse_identity_rejects_short_address() {
    let did = DidValue::from("did:ethr:0x45df85e2");
    assert!(matches!(
        parse_identity(&did),
        Err(ChainAdapterError::InvalidArgument(_))
    ));
}

#[test]
fn test_parse_identity_rejects_missing_hex_prefix() {
    let did = DidValue::from("did:ethr:45df85e29ed6512f02e2b5c2d296a1d9d2bb7a4e");
    assert!(matches!(
        parse_identity(&did),
        Err(ChainAdapterError::InvalidArgument(_))
    ));
}

#[test]
fn test_delegate_type_fits_bytes32() {
    let hash = delegate_type_bytes("veriKey").unwrap();
    assert_eq!(&hash.0[..7], b"veriKey".as_slice());
    assert!(hash.0[7..].iter().all(|byte| *byte == 0));
}

#[test]
fn test_delegate_type_rejects_oversized_value() {
    let value = "x".repeat(33);
    assert!(matches!(
        delegate_type_bytes(&value),
        Err(ChainAdapterError::InvalidArgument(_))
    ));
}

#[test]
fn test_new_builds_adapter_from_params() {
    EthrRegistryAdapter::new(test_params()).unwrap();
}

#[test]
fn test_new_rejects_malformed_key() {
    let params = Params {
        private_key: "not-a-key".to_string(),
        ..test_params()
    };

    assert!(matches!(
        EthrRegistryAdapter::new(params),
        Err(ChainAdapterError::InvalidArgument(_))
    ));
}

#[test]
fn test_new_rejects_malformed_registry_address() {
    let params = Params {
        registry_address: "0x1234".to_string(),
        ..test_params()
    };

    assert!(matches!(
        EthrRegistryAdapter::new(params),
        Err(ChainAdapterError::InvalidArgument(_))
    ));
}
