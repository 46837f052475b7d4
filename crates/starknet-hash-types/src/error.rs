#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid field element literal {literal:?}: {reason}")]
    InvalidLiteral { literal: String, reason: String },

    #[error("Field element literal {0} is not below the field modulus")]
    OutOfRange(String),

    #[error("Negative literal {0} is not a field element")]
    Negative(String),

    #[error("Short string {0:?} does not fit in a field element (max 31 ASCII characters)")]
    ShortStringTooLong(String),
}

impl RangeError {
    pub(crate) fn invalid(literal: &str, reason: impl ToString) -> Self {
        Self::InvalidLiteral { literal: literal.to_string(), reason: reason.to_string() }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid bytecode at index {index}: {source}")]
    InvalidBytecode { index: usize, source: RangeError },

    #[error("Invalid builtin {name:?} at index {index}: {source}")]
    InvalidBuiltin { index: usize, name: String, source: RangeError },
}
