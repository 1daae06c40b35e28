use std::net::Ipv4Addr;
use std::path::Path;

/// Private IPv4 addresses of this machine, used as ping fallbacks when the
/// public hostname is unreachable (the game server may be running on the
/// local network or on this very box behind NAT).
pub fn local_candidate_ips() -> Vec<Ipv4Addr> {
    let mut ips = Vec::new();
    for interface in default_net::get_interfaces() {
        for net in interface.ipv4 {
            let addr = net.addr;
            if addr.is_loopback() || !addr.is_private() {
                continue;
            }
            if !ips.contains(&addr) {
                ips.push(addr);
            }
        }
    }
    log::debug!("Local fallback candidates: {:?}", ips);
    ips
}

/// Reads the `server-port` key out of a `server.properties` file. Returns
/// `None` on any problem; callers fall back to the default port.
pub fn read_server_port(path: &Path) -> Option<u16> {
    let raw = std::fs::read_to_string(path).ok()?;
    parse_server_port(&raw)
}

fn parse_server_port(raw: &str) -> Option<u16> {
    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim() == "server-port" {
            if let Ok(port) = value.trim().parse() {
                return Some(port);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_port() {
        let raw = "#Minecraft server properties\n\
                   #Sat Aug 30 12:00:00 UTC 2025\n\
                   enable-jmx-monitoring=false\n\
                   server-port=25599\n\
                   motd=A StratCraft server\n";
        assert_eq!(parse_server_port(raw), Some(25599));
    }

    #[test]
    fn test_parse_server_port_missing_or_garbage() {
        assert_eq!(parse_server_port(""), None);
        assert_eq!(parse_server_port("motd=hello"), None);
        assert_eq!(parse_server_port("server-port=notanumber"), None);
        assert_eq!(parse_server_port("server-port=99999"), None);
    }

    #[test]
    fn test_parse_server_port_handles_crlf_and_spaces() {
        assert_eq!(parse_server_port("server-port = 25565\r\nmotd=x\r\n"), Some(25565));
    }
}
