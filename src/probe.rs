use std::net::Ipv4Addr;

use serde::Serialize;

use crate::netutil;
use crate::ping::ServerPinger;
use crate::status::ServerStatus;

pub const DEFAULT_SERVER_PORT: u16 = 25565;

/// Launcher-facing summary of a status probe, shaped for the "online/offline
/// plus player counts" widget. `host` is always the configured public host;
/// `local_address` names the fallback that actually answered, if any.
#[derive(Debug, Clone, Serialize)]
pub struct ServerReport {
    pub online: bool,
    pub host: String,
    pub port: u16,
    pub local_address: Option<String>,
    pub players_online: u32,
    pub players_max: u32,
}

/// Probes the configured public host first, then local fallbacks.
///
/// Each attempt is an independent [`ServerPinger::ping`] call; the prober
/// itself never reuses a connection. Unlike a naive "first failure kills the
/// loop", every fallback candidate gets its own attempt.
#[derive(Debug, Clone)]
pub struct StatusProber {
    host: String,
    port: u16,
    pinger: ServerPinger,
}

impl StatusProber {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            pinger: ServerPinger::new(),
        }
    }

    pub fn with_pinger(mut self, pinger: ServerPinger) -> Self {
        self.pinger = pinger;
        self
    }

    pub async fn probe(&self) -> ServerReport {
        match self.pinger.ping(&self.host, self.port).await {
            Ok(status) => return self.online_report(&status, None),
            Err(err) => log::debug!("Public host {} unreachable: {}", self.host, err),
        }

        let mut candidates = vec![Ipv4Addr::LOCALHOST.to_string()];
        candidates.extend(netutil::local_candidate_ips().iter().map(|ip| ip.to_string()));

        for candidate in candidates {
            match self.pinger.ping(&candidate, self.port).await {
                Ok(status) => return self.online_report(&status, Some(candidate)),
                Err(err) => log::debug!("Fallback {} unreachable: {}", candidate, err),
            }
        }

        log::info!("Server {}:{} appears offline", self.host, self.port);
        ServerReport {
            online: false,
            host: self.host.clone(),
            port: self.port,
            local_address: None,
            players_online: 0,
            players_max: 0,
        }
    }

    fn online_report(&self, status: &ServerStatus, local_address: Option<String>) -> ServerReport {
        ServerReport {
            online: true,
            host: self.host.clone(),
            port: self.port,
            local_address,
            players_online: status.players_online(),
            players_max: status.players_max(),
        }
    }
}
