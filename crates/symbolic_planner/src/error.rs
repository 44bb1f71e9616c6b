//! Error types for the planner.

/// A specialized `Result` type for planner operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The primary error enum for all operations within the `symbolic_planner` crate.
///
/// Not finding a plan is not an error; `id_search` reports it as `Ok(None)`.
#[derive(Debug)]
pub enum Error {
    /// An error related to the planner's configuration.
    Config(String),
    /// A structural error raised by the inference engine.
    Logic(symbolic_logic::Error),
    /// An action could not be applied to a state.
    Action(String),
    /// Reading a configuration or rule file failed.
    Io(std::io::Error),
    /// An unexpected internal error.
    Internal(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Config(s) => write!(f, "Configuration error: {}", s),
            Error::Logic(e) => write!(f, "Logic error: {}", e),
            Error::Action(s) => write!(f, "Action error: {}", s),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Internal(s) => write!(f, "Internal error: {}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Logic(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<symbolic_logic::Error> for Error {
    fn from(e: symbolic_logic::Error) -> Self {
        Error::Logic(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(e.to_string())
    }
}
