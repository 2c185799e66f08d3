use std::fmt;

/// Result type for setsync-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Storage layer error
    Index(setsync_index::Error),

    /// CSV import failed
    Import(String),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Tracker delivery failed; per-row, callers log and continue
    Delivery(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Index(err) => write!(f, "Storage error: {}", err),
            Error::Import(msg) => write!(f, "Import error: {}", msg),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Delivery(msg) => write!(f, "Delivery error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Index(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Import(_) | Error::Config(_) | Error::Delivery(_) => None,
        }
    }
}

impl From<setsync_index::Error> for Error {
    fn from(err: setsync_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Import(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Delivery(err.to_string())
    }
}
