//! Error types for the CryptoNote SPV client.

use thiserror::Error;

/// Main error type for the SPV client.
#[derive(Debug, Error)]
pub enum SpvError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Network-related errors.
///
/// Every variant is recoverable from the engine's point of view: a failed
/// request is skipped for that poll interval and retried on the next one.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Timeout occurred")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid node URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_decode() {
            NetworkError::MalformedResponse(err.to_string())
        } else if err.is_connect() {
            NetworkError::ConnectionFailed(err.to_string())
        } else {
            NetworkError::Request(err.to_string())
        }
    }
}

/// Synchronization-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// `start()` was called while the engine is already running.
    #[error("Sync already running")]
    AlreadyRunning,

    /// The latest checkpoint was requested before any checkpoint exists.
    /// This is a sequencing error: the first checkpoint is established
    /// during `start()`, before either poll loop is scheduled.
    #[error("Checkpoint ledger is empty")]
    EmptyLedger,

    /// Invalid state in the sync process (e.g. out-of-order block heights).
    #[error("Invalid sync state: {0}")]
    InvalidState(String),
}

/// Errors from the cryptographic primitive adapters.
///
/// During scanning these are surfaced per-output as a skip decision, never
/// aborting the surrounding block.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid key length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Invalid curve point: {0}")]
    InvalidPoint(String),

    #[error("Invalid hex encoding: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Type alias for Result with SpvError.
pub type Result<T> = std::result::Result<T, SpvError>;

/// Type alias for network operation results.
pub type NetworkResult<T> = std::result::Result<T, NetworkError>;

/// Type alias for sync operation results.
pub type SyncResult<T> = std::result::Result<T, SyncError>;

/// Type alias for crypto operation results.
pub type CryptoResult<T> = std::result::Result<T, CryptoError>;
