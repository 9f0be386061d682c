//! Persistence errors

use hotset_core::EquipsetError;
use std::io;
use thiserror::Error;

/// Document-level persistence errors
#[derive(Debug, Error)]
pub enum PersistError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Document is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Document is JSON but not the expected shape
    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl From<PersistError> for EquipsetError {
    fn from(e: PersistError) -> Self {
        match e {
            PersistError::Io(e) => EquipsetError::IoFailure(e),
            PersistError::Json(e) => EquipsetError::IoFailure(e.into()),
            PersistError::Malformed(msg) => {
                EquipsetError::IoFailure(io::Error::new(io::ErrorKind::InvalidData, msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_equipset_error() {
        let err: EquipsetError = PersistError::Malformed("not an object".into()).into();
        match err {
            EquipsetError::IoFailure(io) => assert_eq!(io.kind(), io::ErrorKind::InvalidData),
            other => panic!("unexpected error: {other}"),
        }
    }
}
