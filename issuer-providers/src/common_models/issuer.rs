use time::OffsetDateTime;
use uuid::Uuid;

use crate::common_models::did::DidValue;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct IssuerId(Uuid);

impl std::fmt::Display for IssuerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for IssuerId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ImageId(Uuid);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ImageId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Off-chain record of a DID granted credential-issuance authority through
/// an on-chain delegation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Issuer {
    pub id: IssuerId,
    pub did: DidValue,
    pub name: String,
    pub description: String,
    pub image_id: Option<ImageId>,
    /// Transaction hash of the latest successful delegation.
    pub block_hash: String,
    pub deleted: bool,
    pub expire_on: OffsetDateTime,
    pub created_on: OffsetDateTime,
    pub modified_on: Option<OffsetDateTime>,
}
