pub mod error;
pub mod issuer;
pub mod presentation;
pub mod share_request;
