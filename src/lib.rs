//! Server status core for the StratCraft launcher: a minimal Minecraft
//! Server List Ping client. One call opens a fresh TCP connection, performs
//! the handshake/status-request exchange and resolves exactly once with the
//! server's JSON status document or a classified error.

pub mod error;
pub mod netutil;
pub mod packet;
pub mod ping;
pub mod probe;
pub mod status;
pub mod varint;

pub use error::{Error, Result};
pub use ping::{ping, ServerPinger, DEFAULT_PROTOCOL_VERSION, DEFAULT_TIMEOUT};
pub use probe::{ServerReport, StatusProber, DEFAULT_SERVER_PORT};
pub use status::{PlayerSample, ServerStatus, StatusPlayers, StatusVersion};
