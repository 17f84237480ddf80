use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct PresentationId(Uuid);

impl std::fmt::Display for PresentationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for PresentationId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Stored bundle of credential tokens shared as one presentation.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Presentation {
    pub id: PresentationId,
    pub jwts: Vec<String>,
    pub expire_on: OffsetDateTime,
    pub created_on: OffsetDateTime,
}
