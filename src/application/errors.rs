//! Application layer errors
//!
//! No error here is fatal to the process; the worst outcome is serving
//! from a stale or empty in-memory state until the next successful
//! mutation.

use thiserror::Error;

/// Umbrella error at the service boundary
#[derive(Error, Debug)]
pub enum ToggleError {
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Registry mutation errors - recoverable, reported to the operator/user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Trigger {trigger_id} is already bound on anchor {anchor_id} in scope {scope_id}")]
    Duplicate {
        scope_id: String,
        anchor_id: String,
        trigger_id: String,
    },

    #[error("No binding for trigger {trigger_id} on anchor {anchor_id}")]
    NotFound {
        anchor_id: String,
        trigger_id: String,
    },
}

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt state: {0}")]
    Corrupt(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Effect-application failures from the platform collaborator.
/// Surfaced verbatim to the end user, never retried by the core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Effect not found: {0}")]
    EffectNotFound(String),

    #[error("External error: {0}")]
    External(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
