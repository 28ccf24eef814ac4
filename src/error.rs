//! Error types shared by the file utilities and `ConfigBox`

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The YAML document held no value at all (empty, comments only, or `null`)
    #[error("yaml file is empty: {}", path.display())]
    EmptyConfig { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Binary(#[from] bincode::Error),

    /// Binary header did not carry our magic bytes or carried another format version
    #[error("incompatible binary file {}: {reason}", path.display())]
    IncompatibleFormat { path: PathBuf, reason: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("key not found: {0}")]
    MissingKey(String),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }

    pub(crate) fn type_mismatch(expected: &'static str, value: &serde_json::Value) -> Self {
        Error::TypeMismatch {
            expected,
            found: value_kind(value),
        }
    }
}

/// Short name of a JSON value's kind, used in mismatch messages
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let err: Error = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(err.is_not_found());

        let err: Error = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
        assert!(!err.is_not_found());

        assert!(!Error::MissingKey("a".to_string()).is_not_found());
    }

    #[test]
    fn test_io_message_is_untouched() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let err: Error = io.into();
        assert_eq!(err.to_string(), "disk on fire");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = Error::type_mismatch("mapping", &serde_json::json!([1, 2]));
        assert_eq!(err.to_string(), "type mismatch: expected mapping, found sequence");
    }
}
