use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;
use crate::felt::FieldElement;

/// Network identifier, hashed into every transaction hash as an ASCII short string.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChainId {
    Mainnet,
    Testnet,
    Sepolia,
    Other(String),
}

impl ChainId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mainnet => "SN_MAIN",
            Self::Testnet => "SN_GOERLI",
            Self::Sepolia => "SN_SEPOLIA",
            Self::Other(name) => name,
        }
    }

    /// Converts the chain id into a felt.
    pub fn to_felt(&self) -> Result<FieldElement, RangeError> {
        FieldElement::from_short_string(self.as_str())
    }

    /// Builds a chain id from a felt.
    /// The felt is read as ASCII bytes. Leading zeroes are skipped.
    pub fn from_felt(felt: FieldElement) -> Self {
        let chain_id_bytes: Vec<_> = felt.to_bytes_be().into_iter().skip_while(|byte| *byte == 0u8).collect();
        let chain_id_str = String::from_utf8_lossy(&chain_id_bytes);
        Self::from(chain_id_str.into_owned())
    }
}

impl From<String> for ChainId {
    fn from(name: String) -> Self {
        match name.as_str() {
            "SN_MAIN" => Self::Mainnet,
            "SN_GOERLI" => Self::Testnet,
            "SN_SEPOLIA" => Self::Sepolia,
            _ => Self::Other(name),
        }
    }
}

impl From<ChainId> for String {
    fn from(chain_id: ChainId) -> Self {
        chain_id.as_str().to_string()
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
