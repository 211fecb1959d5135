// src/error.rs

//! Error types for the drover CLI

use thiserror::Error;

/// Errors raised while authorizing and dispatching an action
#[derive(Error, Debug)]
pub enum Error {
    /// The action token matched no canonical name or alias
    #[error("'{0}' is not a drover action. Run 'drover help' for a list of actions.")]
    UnknownAction(String),

    /// A privileged action was attempted without elevation
    #[error("You must be root to run '{0}'")]
    Permission(String),

    /// The local management agent binary is absent or not executable
    #[error("The management agent '{0}' is missing or not executable")]
    MissingDependency(String),

    /// Missing targets, invalid expiration value, or unattributable admin
    #[error("{0}")]
    Argument(String),

    /// The depot server connection could not be established
    #[error("Cannot connect to the depot server: {0}")]
    Connection(String),

    /// An agent operation failed after dispatch
    #[error("Agent operation failed: {0}")]
    Agent(String),

    /// Bad configuration file
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable kind label used by the diagnostic log
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownAction(_) => "UnknownAction",
            Error::Permission(_) => "PermissionError",
            Error::MissingDependency(_) => "MissingDependency",
            Error::Argument(_) => "ArgumentError",
            Error::Connection(_) => "ConnectionError",
            Error::Agent(_) => "AgentError",
            Error::Config(_) => "ConfigError",
            Error::Io(_) => "IoError",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
