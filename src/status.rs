use serde::{Deserialize, Serialize};

/// Status document returned by a server list ping.
///
/// Servers are inconsistent about which fields they fill in, so everything
/// is optional and unknown fields are ignored. The launcher only needs the
/// player counts; the rest is carried along for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerStatus {
    #[serde(default)]
    pub version: Option<StatusVersion>,
    #[serde(default)]
    pub players: Option<StatusPlayers>,
    /// Either a plain string or a chat component object, depending on the
    /// server, so it stays an untyped value.
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusVersion {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub protocol: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusPlayers {
    #[serde(default)]
    pub online: u32,
    #[serde(default)]
    pub max: u32,
    #[serde(default)]
    pub sample: Vec<PlayerSample>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerSample {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
}

impl ServerStatus {
    pub fn players_online(&self) -> u32 {
        self.players.as_ref().map(|p| p.online).unwrap_or(0)
    }

    pub fn players_max(&self) -> u32 {
        self.players.as_ref().map(|p| p.max).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "version": {"name": "1.21", "protocol": 767},
            "players": {"online": 3, "max": 20, "sample": [{"name": "steve", "id": "abc"}]},
            "description": {"text": "A StratCraft server"},
            "favicon": "data:image/png;base64,xyz"
        }"#;
        let status: ServerStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.players_online(), 3);
        assert_eq!(status.players_max(), 20);
        assert_eq!(status.version.unwrap().protocol, 767);
        assert_eq!(status.players.unwrap().sample.len(), 1);
    }

    #[test]
    fn test_missing_players_is_tolerated() {
        let status: ServerStatus = serde_json::from_str(r#"{"description": "hi"}"#).unwrap();
        assert!(status.players.is_none());
        assert_eq!(status.players_online(), 0);
        assert_eq!(status.players_max(), 0);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let status: ServerStatus =
            serde_json::from_str(r#"{"enforcesSecureChat": true, "players": {"online": 1, "max": 8}}"#)
                .unwrap();
        assert_eq!(status.players_online(), 1);
    }
}
