use thiserror::Error;

/// Failures reported by the remote anchor store.
///
/// A failed mutation leaves the remote state unknown; callers refetch.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("anchor {0} not found")]
    AnchorNotFound(String),

    #[error("device {0} not found")]
    DeviceNotFound(String),
}

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session storage failed: {0}")]
    Storage(String),

    #[error("session data corrupt: {0}")]
    Corrupt(String),

    #[error("session restart failed: {0}")]
    Restart(String),
}
