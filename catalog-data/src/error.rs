use catalog_core::HttpError;

/// Errors that can occur in the data layer.
#[derive(Debug)]
pub enum DataError {
    NotFound(String),
    /// A string that is not a well-formed [`ObjectId`](crate::ObjectId).
    InvalidId(String),
    /// A write rejected by schema constraints or a uniqueness rule.
    Constraint(String),
    /// The store has been closed.
    Unavailable(String),
    Serialization(serde_json::Error),
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::NotFound(msg) => write!(f, "Not found: {msg}"),
            DataError::InvalidId(id) => write!(f, "Invalid identifier: {id:?}"),
            DataError::Constraint(msg) => write!(f, "Constraint violation: {msg}"),
            DataError::Unavailable(msg) => write!(f, "Store unavailable: {msg}"),
            DataError::Serialization(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::Serialization(err)
    }
}

impl From<DataError> for HttpError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(msg) => HttpError::NotFound(msg),
            e @ (DataError::InvalidId(_) | DataError::Constraint(_)) => {
                HttpError::BadRequest(e.to_string())
            }
            e @ (DataError::Unavailable(_) | DataError::Serialization(_)) => {
                HttpError::Internal(e.to_string())
            }
        }
    }
}
