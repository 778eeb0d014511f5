//! Error types for the FMU proxy broker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Runtime not found: {0}")]
    RuntimeNotFound(String),

    #[error("Unsupported runtime version: {0}")]
    UnsupportedRuntimeVersion(String),

    #[error("Missing identifier: {0}")]
    MissingIdentifier(String),

    #[error("Missing FMU path: {0}")]
    MissingFmuPath(String),

    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Port unavailable: {0}")]
    PortUnavailable(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProxyError>;
