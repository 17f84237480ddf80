/// Receipt of a delegate-contract transaction accepted by a node.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DelegateReceipt {
    pub transaction_hash: String,
    /// Names of registry events decoded from the receipt logs.
    pub events: Vec<String>,
}

impl DelegateReceipt {
    pub fn has_event(&self, name: &str) -> bool {
        self.events.iter().any(|event| event == name)
    }
}
