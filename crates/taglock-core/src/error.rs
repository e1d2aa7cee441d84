use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Protocol errors surfaced across crate boundaries
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    #[error("Invalid reader address: {0} (must be 0-254)")]
    InvalidReaderAddress(u8),

    // Pipeline errors
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Tag event channel closed")]
    ChannelClosed,

    // Hardware errors
    #[error("Hardware operation failed: {0}")]
    Hardware(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing configuration key: {0}")]
    MissingConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
