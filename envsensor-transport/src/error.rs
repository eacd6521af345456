//! Transport errors

use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Port not open")]
    NotOpen,
    
    #[error("Port already open")]
    AlreadyOpen,
    
    #[error("Read timeout")]
    ReadTimeout,
    
    #[error("Port closed by device")]
    ConnectionClosed,
    
    #[error("No sensor found with USB id {vid:04X}:{pid:04X}")]
    DeviceNotFound {
        vid: u16,
        pid: u16,
    },
    
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
    
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    
    #[error("Blocking I/O task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}
