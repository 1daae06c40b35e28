use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    #[error("Timed out waiting for a server response")]
    Timeout,

    #[error("Connection closed before a complete response arrived")]
    ConnectionClosed,

    #[error("Framing error: {0}")]
    Framing(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Decode error: status text is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
