use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time;

use crate::packet;
use crate::status::ServerStatus;
use crate::varint::read_var_int;
use crate::{Error, Result};

/// Protocol version the handshake claims to speak. The status exchange works
/// regardless of what the server actually runs, it just echoes compatibility
/// info back in the response.
pub const DEFAULT_PROTOCOL_VERSION: u32 = 767;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

const STATUS_RESPONSE_ID: u32 = 0x00;

/// One-shot server list ping client.
///
/// Every call to [`ServerPinger::ping`] opens its own connection with its own
/// receive buffer and settles exactly once: with a decoded status document or
/// with one classified [`Error`]. Nothing is retried or cached here; fallback
/// policy across hosts lives in [`crate::probe`].
#[derive(Debug, Clone)]
pub struct ServerPinger {
    protocol_version: u32,
    timeout: Duration,
}

impl Default for ServerPinger {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerPinger {
    pub fn new() -> Self {
        Self {
            protocol_version: DEFAULT_PROTOCOL_VERSION,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_protocol_version(mut self, protocol_version: u32) -> Self {
        self.protocol_version = protocol_version;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Performs one handshake/status-request exchange against `host:port`.
    ///
    /// The whole exchange, connect included, runs under the configured
    /// timeout. The socket is dropped on every exit path.
    pub async fn ping(&self, host: &str, port: u16) -> Result<ServerStatus> {
        log::debug!("Pinging {}:{}", host, port);
        match time::timeout(self.timeout, self.exchange(host, port)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                log::debug!("Ping to {}:{} timed out after {:?}", host, port, self.timeout);
                Err(Error::Timeout)
            }
        }
    }

    async fn exchange(&self, host: &str, port: u16) -> Result<ServerStatus> {
        let mut stream = TcpStream::connect((host, port)).await?;

        // The server answers only after the status request, so both packets
        // go out back to back.
        stream
            .write_all(&packet::handshake(self.protocol_version, host, port))
            .await?;
        stream.write_all(&packet::status_request()).await?;

        let mut buffer: Vec<u8> = Vec::with_capacity(1024);
        loop {
            let read = stream.read_buf(&mut buffer).await?;
            if read == 0 {
                log::debug!(
                    "Server {}:{} closed the connection with {} buffered bytes",
                    host,
                    port,
                    buffer.len()
                );
                return Err(Error::ConnectionClosed);
            }

            // TCP gives no message boundaries: a chunk may hold a fraction
            // of a packet or several packets, so drain complete frames in a
            // loop after every append.
            while let Some(frame) = packet::try_extract_one(&buffer)? {
                buffer.drain(..frame.consumed);
                if let Some(status) = parse_status_payload(&frame.payload)? {
                    log::debug!(
                        "Server {}:{} reports {}/{} players",
                        host,
                        port,
                        status.players_online(),
                        status.players_max()
                    );
                    return Ok(status);
                }
                log::trace!("Skipping packet with unexpected id from {}:{}", host, port);
            }
        }
    }
}

/// Convenience wrapper matching the launcher-facing contract: one ping with
/// an explicit timeout, default protocol version.
pub async fn ping(host: &str, port: u16, timeout: Duration) -> Result<ServerStatus> {
    ServerPinger::new().with_timeout(timeout).ping(host, port).await
}

/// Decodes one complete packet payload. `Ok(None)` means the packet carried
/// some other message id and the caller should keep waiting for the real
/// status response.
fn parse_status_payload(payload: &[u8]) -> Result<Option<ServerStatus>> {
    let id = read_var_int(payload, 0)?
        .ok_or_else(|| Error::Framing("packet payload ended inside the message id".into()))?;
    if id.value != STATUS_RESPONSE_ID {
        return Ok(None);
    }

    let len = read_var_int(payload, id.size)?
        .ok_or_else(|| Error::Framing("packet payload ended inside the string length".into()))?;
    let start = id.size + len.size;
    let text = payload
        .get(start..start + len.value as usize)
        .ok_or_else(|| {
            Error::Framing(format!(
                "status string of {} bytes does not fit the {} byte payload",
                len.value,
                payload.len()
            ))
        })?;

    let status = serde_json::from_str(std::str::from_utf8(text)?)?;
    Ok(Some(status))
}
