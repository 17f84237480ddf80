use time::OffsetDateTime;
use uuid::Uuid;

use crate::common_models::did::DidValue;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct DelegateTransactionId(Uuid);

impl std::fmt::Display for DelegateTransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for DelegateTransactionId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Append-only audit record of a requested delegate authorization.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DelegateTransaction {
    pub id: DelegateTransactionId,
    pub did: DidValue,
    pub name: Option<String>,
    pub callback_url: String,
    pub token: String,
    pub action: String,
    pub description: Option<String>,
    pub created_on: OffsetDateTime,
}
