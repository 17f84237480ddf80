pub mod delegate_transaction;
pub mod did;
pub mod issuer;
pub mod presentation;
pub mod share_request;
