//! Error types surfaced by equipset operations

use thiserror::Error;

/// Why an equipset was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    /// Following the cycle chain revisits the set being edited
    CyclicReference {
        /// Target name that closes the loop
        via: String,
    },
    /// A cycle set lists its own name
    SelfReference,
    /// Name is empty or only whitespace
    EmptyName,
    /// Normal set carries more actions than allowed
    TooManyActions {
        /// Number of actions supplied
        count: usize,
        /// Configured maximum
        max: usize,
    },
    /// Potion set asks to consume zero items per press
    ZeroQuantity,
    /// Operation needs a cycle set
    NotCycleSet,
}

impl std::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CyclicReference { via } => write!(f, "cyclic reference through '{}'", via),
            Self::SelfReference => write!(f, "cycle set references itself"),
            Self::EmptyName => write!(f, "name is empty"),
            Self::TooManyActions { count, max } => {
                write!(f, "{} actions exceed the maximum of {}", count, max)
            }
            Self::ZeroQuantity => write!(f, "consume quantity must be at least 1"),
            Self::NotCycleSet => write!(f, "not a cycle set"),
        }
    }
}

/// Equipset errors
#[derive(Debug, Error)]
pub enum EquipsetError {
    /// Lookup by id or name failed
    #[error("Equipset not found: {0}")]
    NotFound(String),
    /// Variant fields are malformed or a cycle reference loops
    #[error("Invalid equipset '{name}': {reason}")]
    InvalidEquipset {
        /// Name of the rejected equipset
        name: String,
        /// What was wrong with it
        reason: InvalidReason,
    },
    /// A document could not be read or written
    #[error("IO failure: {0}")]
    IoFailure(#[from] std::io::Error),
    /// A record inside a document could not be decoded
    #[error("Malformed record #{index}: {reason}")]
    MalformedRecord {
        /// Position of the record in the document
        index: usize,
        /// Decoder message
        reason: String,
    },
}

impl EquipsetError {
    /// Shorthand for an invalid equipset error
    pub fn invalid(name: impl Into<String>, reason: InvalidReason) -> Self {
        Self::InvalidEquipset {
            name: name.into(),
            reason,
        }
    }

    /// Check if this is a cycle error
    pub fn is_cyclic(&self) -> bool {
        matches!(
            self,
            Self::InvalidEquipset {
                reason: InvalidReason::CyclicReference { .. } | InvalidReason::SelfReference,
                ..
            }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EquipsetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EquipsetError::invalid(
            "Swap",
            InvalidReason::CyclicReference { via: "Melee".into() },
        );
        assert_eq!(
            err.to_string(),
            "Invalid equipset 'Swap': cyclic reference through 'Melee'"
        );
        assert!(err.is_cyclic());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EquipsetError = io.into();
        assert!(matches!(err, EquipsetError::IoFailure(_)));
        assert!(!err.is_cyclic());
    }
}
