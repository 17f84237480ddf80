use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct DidValue(String);

impl std::fmt::Display for DidValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<String> for DidValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DidValue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<DidValue> for String {
    fn from(value: DidValue) -> Self {
        value.0
    }
}

impl DidValue {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Network tag of a `did:ethr` value, e.g. `lacchain` in
    /// `did:ethr:lacchain:0x…`. `None` for untagged values.
    pub fn network_tag(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("did:ethr:")?;
        let (tag, remainder) = rest.split_once(':')?;
        if remainder.contains(':') {
            return None;
        }
        Some(tag)
    }
}
