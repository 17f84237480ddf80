use strum_macros::{Display, EnumString};

/// Blockchain networks with a configured DID registry.
#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, PartialOrd, Ord)]
pub enum NetworkType {
    #[strum(serialize = "rsk")]
    Rsk,
    #[strum(serialize = "lacchain")]
    Lacchain,
    #[strum(serialize = "bfa")]
    Bfa,
}
