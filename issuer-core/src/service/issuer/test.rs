use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use issuer_providers::{
    chain::{model::DelegateReceipt, provider::MockDelegationProvider},
    common_models::did::DidValue,
    image_storage::in_memory::InMemoryImageStorage,
    storage::{
        in_memory::{InMemoryDelegateTransactionStorage, InMemoryIssuerStorage},
        MockIssuerStorage, StorageError,
    },
};

use crate::service::{
    error::{IssuerServiceError, ValidationError},
    issuer::{DelegateTransactionRequest, IssuerService},
};

const DID: &str = "did:ethr:0x45df85e29ed6512f02e2b5c2d296a1d9d2bb7a4e";

fn receipt(hash: &str) -> DelegateReceipt {
    DelegateReceipt {
        transaction_hash: hash.to_string(),
        events: vec!["DIDDelegateChanged".to_string()],
    }
}

fn service(provider: MockDelegationProvider) -> IssuerService {
    service_with_image_limit(provider, 3_000_000)
}

fn service_with_image_limit(
    provider: MockDelegationProvider,
    max_image_size: usize,
) -> IssuerService {
    IssuerService::new(
        Arc::new(provider),
        Arc::new(InMemoryIssuerStorage::new()),
        Arc::new(InMemoryDelegateTransactionStorage::new()),
        Arc::new(InMemoryImageStorage::new()),
        Some(31_536_000),
        max_image_size,
    )
}

fn transaction_request() -> DelegateTransactionRequest {
    DelegateTransactionRequest {
        did: DidValue::from(DID),
        name: Some("issuer".to_string()),
        callback_url: "https://callback.example".to_string(),
        token: "token".to_string(),
        action: "verify".to_string(),
        description: None,
    }
}

#[tokio::test]
async fn test_add_issuer_rejects_missing_arguments_before_any_call() {
    // no provider expectations: a chain call would panic
    let service = service(MockDelegationProvider::new());

    assert!(matches!(
        service.add_issuer(&DidValue::from(""), "name", "description").await,
        Err(IssuerServiceError::Validation(ValidationError::MissingDid))
    ));
    assert!(matches!(
        service.add_issuer(&DidValue::from(DID), "", "description").await,
        Err(IssuerServiceError::Validation(ValidationError::MissingName))
    ));
    assert!(matches!(
        service.add_issuer(&DidValue::from(DID), "name", "").await,
        Err(IssuerServiceError::Validation(
            ValidationError::MissingDescription
        ))
    ));
}

#[tokio::test]
async fn test_add_issuer_delegates_and_persists() {
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_add_delegate()
        .once()
        .returning(|_| Ok(receipt("0xabc")));

    let service = service(provider);
    let did = DidValue::from(DID);

    let created = service
        .add_issuer(&did, "Registry of Deeds", "issuing authority")
        .await
        .unwrap();

    assert_eq!(created.did, did);
    assert_eq!(created.name, "Registry of Deeds");
    assert_eq!(created.description, "issuing authority");
    assert_eq!(created.block_hash, "0xabc");
    assert!(!created.deleted);
    assert!(created.expire_on > created.created_on);

    let fetched = service.get_issuer_by_did(&did).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_add_issuer_rejects_existing_did() {
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_add_delegate()
        .once()
        .returning(|_| Ok(receipt("0xabc")));

    let service = service(provider);
    let did = DidValue::from(DID);

    service.add_issuer(&did, "name", "description").await.unwrap();
    let result = service.add_issuer(&did, "name", "description").await;

    assert!(matches!(result, Err(IssuerServiceError::DidExists)));
    assert_eq!(service.get_all(10, 1).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_add_issuer_race_resolved_by_unique_index() {
    // a concurrent create slipped in between the existence check and the
    // write; the storage unique index reports it as a duplicate key
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_add_delegate()
        .once()
        .returning(|_| Ok(receipt("0xabc")));

    let mut storage = MockIssuerStorage::new();
    storage.expect_get_by_did().returning(|_| Ok(None));
    storage
        .expect_create()
        .returning(|issuer| Err(StorageError::DuplicateKey(issuer.did.to_string())));

    let service = IssuerService::new(
        Arc::new(provider),
        Arc::new(storage),
        Arc::new(InMemoryDelegateTransactionStorage::new()),
        Arc::new(InMemoryImageStorage::new()),
        Some(31_536_000),
        3_000_000,
    );

    let result = service
        .add_issuer(&DidValue::from(DID), "name", "description")
        .await;

    assert!(matches!(result, Err(IssuerServiceError::DidExists)));
}

#[tokio::test]
async fn test_refresh_updates_block_hash_and_expiry() {
    let calls = AtomicUsize::new(0);
    let mut provider = MockDelegationProvider::new();
    provider.expect_add_delegate().times(2).returning(move |_| {
        let call = calls.fetch_add(1, Ordering::SeqCst);
        Ok(receipt(if call == 0 { "0xaaa" } else { "0xbbb" }))
    });

    let service = service(provider);
    let did = DidValue::from(DID);

    let created = service.add_issuer(&did, "name", "description").await.unwrap();
    let refreshed = service.refresh(&did).await.unwrap();

    assert_eq!(refreshed.block_hash, "0xbbb");
    assert_ne!(refreshed.block_hash, created.block_hash);
    assert!(refreshed.expire_on >= created.expire_on);
    assert_eq!(refreshed.name, created.name);
    assert_eq!(refreshed.description, created.description);
}

#[tokio::test]
async fn test_refresh_rejects_unknown_did() {
    let service = service(MockDelegationProvider::new());

    let result = service.refresh(&DidValue::from(DID)).await;

    assert!(matches!(result, Err(IssuerServiceError::DidNotExists)));
}

#[tokio::test]
async fn test_refresh_never_resurrects_deleted_issuer() {
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_add_delegate()
        .once()
        .returning(|_| Ok(receipt("0xabc")));

    let service = service(provider);
    let did = DidValue::from(DID);

    service.add_issuer(&did, "name", "description").await.unwrap();
    service.delete(&did).await.unwrap();

    let result = service.refresh(&did).await;

    assert!(matches!(result, Err(IssuerServiceError::DidNotExists)));
}

#[tokio::test]
async fn test_edit_data_updates_name_only() {
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_add_delegate()
        .once()
        .returning(|_| Ok(receipt("0xabc")));

    let service = service(provider);
    let did = DidValue::from(DID);

    service.add_issuer(&did, "name", "description").await.unwrap();
    let updated = service
        .edit_data(&did, Some("renamed".to_string()), None)
        .await
        .unwrap();

    assert_eq!(updated.name, "renamed");
    assert_eq!(updated.description, "description");
    assert!(updated.modified_on.is_some());
}

#[tokio::test]
async fn test_edit_data_rejects_unknown_did() {
    let service = service(MockDelegationProvider::new());

    let result = service
        .edit_data(&DidValue::from(DID), Some("renamed".to_string()), None)
        .await;

    assert!(matches!(result, Err(IssuerServiceError::DidNotExists)));
}

#[tokio::test]
async fn test_delete_soft_deletes_and_hides_from_listing() {
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_add_delegate()
        .once()
        .returning(|_| Ok(receipt("0xabc")));

    let service = service(provider);
    let did = DidValue::from(DID);

    service.add_issuer(&did, "name", "description").await.unwrap();
    let deleted = service.delete(&did).await.unwrap();

    assert!(deleted.deleted);
    assert!(service.get_all(10, 1).await.unwrap().is_empty());
    // the record itself survives
    let fetched = service.get_issuer_by_did(&did).await.unwrap().unwrap();
    assert!(fetched.deleted);
}

#[tokio::test]
async fn test_verify_issuer_checks_delegation() {
    let mut provider = MockDelegationProvider::new();
    provider.expect_valid_delegate().once().returning(|_| Ok(true));

    let service = service(provider);

    service.verify_issuer(&DidValue::from(DID)).await.unwrap();
}

#[tokio::test]
async fn test_verify_issuer_rejects_invalid_delegation() {
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_valid_delegate()
        .once()
        .returning(|_| Ok(false));

    let service = service(provider);

    let result = service.verify_issuer(&DidValue::from(DID)).await;

    assert!(matches!(result, Err(IssuerServiceError::IssuerInvalid)));
}

#[tokio::test]
async fn test_save_image_stores_blob_and_links_issuer() {
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_add_delegate()
        .once()
        .returning(|_| Ok(receipt("0xabc")));

    let service = service(provider);
    let did = DidValue::from(DID);
    service.add_issuer(&did, "name", "description").await.unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"png bytes").unwrap();

    let image_id = service
        .save_image(&did, "image/png", file.path().to_str().unwrap())
        .await
        .unwrap();

    let fetched = service.get_issuer_by_did(&did).await.unwrap().unwrap();
    assert_eq!(fetched.image_id, Some(image_id));
}

#[tokio::test]
async fn test_save_image_rejects_missing_arguments() {
    let service = service(MockDelegationProvider::new());
    let did = DidValue::from(DID);

    assert!(matches!(
        service.save_image(&DidValue::from(""), "image/png", "/tmp/a").await,
        Err(IssuerServiceError::Validation(ValidationError::MissingDid))
    ));
    assert!(matches!(
        service.save_image(&did, "", "/tmp/a").await,
        Err(IssuerServiceError::Validation(
            ValidationError::MissingContentType
        ))
    ));
    assert!(matches!(
        service.save_image(&did, "image/png", "").await,
        Err(IssuerServiceError::Validation(ValidationError::MissingPath))
    ));
}

#[tokio::test]
async fn test_save_image_rejects_unknown_did() {
    let service = service(MockDelegationProvider::new());

    let result = service
        .save_image(&DidValue::from(DID), "image/png", "/tmp/a")
        .await;

    assert!(matches!(result, Err(IssuerServiceError::DidNotExists)));
}

#[tokio::test]
async fn test_save_image_collapses_internal_failures() {
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_add_delegate()
        .once()
        .returning(|_| Ok(receipt("0xabc")));

    let service = service(provider);
    let did = DidValue::from(DID);
    service.add_issuer(&did, "name", "description").await.unwrap();

    let result = service
        .save_image(&did, "image/png", "/nonexistent/image.png")
        .await;

    assert!(matches!(result, Err(IssuerServiceError::ImageCreate)));
}

#[tokio::test]
async fn test_save_image_collapses_oversized_content() {
    let mut provider = MockDelegationProvider::new();
    provider
        .expect_add_delegate()
        .once()
        .returning(|_| Ok(receipt("0xabc")));

    let service = service_with_image_limit(provider, 4);
    let did = DidValue::from(DID);
    service.add_issuer(&did, "name", "description").await.unwrap();

    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"more than four bytes").unwrap();

    let result = service
        .save_image(&did, "image/png", file.path().to_str().unwrap())
        .await;

    assert!(matches!(result, Err(IssuerServiceError::ImageCreate)));
}

#[tokio::test]
async fn test_callback_puts_data_to_origin() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/issuers/{DID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = service(MockDelegationProvider::new());

    let response = service
        .callback(
            &format!("{}/issuers", server.uri()),
            &DidValue::from(DID),
            "token",
            &json!({ "status": "approved" }),
        )
        .await
        .unwrap();

    assert_eq!(response["status"], "success");
}

#[tokio::test]
async fn test_callback_fails_on_error_status_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "error" })))
        .mount(&server)
        .await;

    let service = service(MockDelegationProvider::new());

    let result = service
        .callback(
            &server.uri(),
            &DidValue::from(DID),
            "token",
            &json!({ "status": "approved" }),
        )
        .await;

    assert!(matches!(result, Err(IssuerServiceError::Callback(_))));
}

#[tokio::test]
async fn test_callback_rejects_missing_arguments() {
    let service = service(MockDelegationProvider::new());
    let did = DidValue::from(DID);
    let data = json!({ "status": "approved" });

    assert!(matches!(
        service.callback("http://x", &DidValue::from(""), "token", &data).await,
        Err(IssuerServiceError::Validation(ValidationError::MissingDid))
    ));
    assert!(matches!(
        service.callback("", &did, "token", &data).await,
        Err(IssuerServiceError::Validation(ValidationError::MissingUrl))
    ));
    assert!(matches!(
        service.callback("http://x", &did, "", &data).await,
        Err(IssuerServiceError::Validation(ValidationError::MissingToken))
    ));
    assert!(matches!(
        service
            .callback("http://x", &did, "token", &serde_json::Value::Null)
            .await,
        Err(IssuerServiceError::Validation(ValidationError::MissingData))
    ));
}

#[tokio::test]
async fn test_create_delegate_transaction_appends_record() {
    let service = service(MockDelegationProvider::new());

    let transaction = service
        .create_delegate_transaction(transaction_request())
        .await
        .unwrap();

    assert_eq!(transaction.did, DidValue::from(DID));
    assert_eq!(transaction.action, "verify");
}

#[tokio::test]
async fn test_create_delegate_transaction_rejects_missing_arguments() {
    let service = service(MockDelegationProvider::new());

    let missing_did = DelegateTransactionRequest {
        did: DidValue::from(""),
        ..transaction_request()
    };
    assert!(matches!(
        service.create_delegate_transaction(missing_did).await,
        Err(IssuerServiceError::Validation(ValidationError::MissingDid))
    ));

    let missing_callback = DelegateTransactionRequest {
        callback_url: "".to_string(),
        ..transaction_request()
    };
    assert!(matches!(
        service.create_delegate_transaction(missing_callback).await,
        Err(IssuerServiceError::Validation(
            ValidationError::MissingCallback
        ))
    ));

    let missing_token = DelegateTransactionRequest {
        token: "".to_string(),
        ..transaction_request()
    };
    assert!(matches!(
        service.create_delegate_transaction(missing_token).await,
        Err(IssuerServiceError::Validation(ValidationError::MissingToken))
    ));

    let missing_action = DelegateTransactionRequest {
        action: "".to_string(),
        ..transaction_request()
    };
    assert!(matches!(
        service.create_delegate_transaction(missing_action).await,
        Err(IssuerServiceError::Validation(
            ValidationError::MissingAction
        ))
    ));
}
