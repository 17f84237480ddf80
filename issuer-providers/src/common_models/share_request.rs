use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ShareRequestId(Uuid);

impl std::fmt::Display for ShareRequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for ShareRequestId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Stored, audience-bound reference to a credential bundle, retrievable by
/// the intended audience before expiry.
///
/// `aud` and `iss` are copied verbatim from the stored token's payload at
/// creation time; the token itself is never re-signed or rewritten.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ShareRequest {
    pub id: ShareRequestId,
    pub aud: Option<String>,
    pub iss: Option<String>,
    pub jwt: String,
    pub expire_on: OffsetDateTime,
    pub created_on: OffsetDateTime,
}
