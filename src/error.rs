//! Error types for cast-onboard.

/// Top-level error type for the onboarding flows.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Flow/stage-machine errors.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Cannot transition from {from} to {to}: {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
    },

    #[error("No manual transition available from stage {stage}")]
    NoManualTransition { stage: String },

    #[error("Stage {stage} is terminal")]
    Terminal { stage: String },

    #[error("Invalid sidebar navigation: {0}")]
    InvalidNav(String),
}

/// Wallet-related errors.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Wallet provider closed")]
    ProviderClosed,
}

/// Profile directory errors.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Directory request failed: {0}")]
    Request(String),

    #[error("Directory returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid directory response: {0}")]
    InvalidResponse(String),
}

/// On-chain id registry errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Registry read failed: {0}")]
    Read(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
