use std::fmt;

/// Result type for setsync-index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the storage layer
#[derive(Debug)]
pub enum Error {
    /// Database operation failed
    Database(rusqlite::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// On-disk schema version does not match this build; never operate on a
    /// mismatched schema
    SchemaMismatch { found: i32, expected: i32 },

    /// Stored data could not be interpreted (e.g. unknown muscle-group label)
    Data(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Database(err) => write!(f, "Database error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::SchemaMismatch { found, expected } => write!(
                f,
                "Database schema version mismatch: found {}, expected {}. \
                 Move the database file aside or use a matching setsync build; \
                 refusing to run against a mismatched schema.",
                found, expected
            ),
            Error::Data(msg) => write!(f, "Data error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Database(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::SchemaMismatch { .. } | Error::Data(_) => None,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_mismatch_message_names_both_versions() {
        let err = Error::SchemaMismatch {
            found: 7,
            expected: 1,
        };
        let msg = err.to_string();

        assert!(msg.contains("found 7"));
        assert!(msg.contains("expected 1"));
        assert!(msg.contains("refusing"));
    }

    #[test]
    fn database_error_message() {
        let sqlite_err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(1),
            Some("UNIQUE constraint failed".to_string()),
        );
        let err = Error::Database(sqlite_err);

        assert!(err.to_string().starts_with("Database error:"));
    }
}
