//! High-level error types

use envsensor_transport::Error as TransportError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Frame error: {0}")]
    Frame(#[from] envsensor_core::FrameError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Type error: {0}")]
    Types(#[from] envsensor_types::Error),

    #[error("Session not open")]
    NotOpen,

    #[error("No response within {millis} ms")]
    Timeout { millis: u64 },

    #[error("Unexpected response from device: {0}")]
    UnexpectedResponse(String),
}

impl Error {
    /// True when the session is still usable and the call may be retried
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Frame(_)) || self.is_timeout()
    }

    /// True for a response timeout or a transport read timeout
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Timeout { .. } | Error::Transport(TransportError::ReadTimeout)
        )
    }
}
