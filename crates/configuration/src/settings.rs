use crate::error::ConfigError;
use core_types::Entrant;
use serde::Deserialize;
use std::collections::HashSet;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub league: LeagueSettings,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// The mini-league being tracked: a display name plus the fixed entrant
/// roster.
///
/// Roster order matters: it is the column order of every derived table and
/// therefore the tie-break order of every statistic.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueSettings {
    /// Display name of the mini-league.
    pub name: String,
    /// The tracked FPL entries, in column order.
    pub entrants: Vec<Entrant>,
}

/// Settings for the FPL API fetch boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the public FPL API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout applied to every fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Bind address for the dashboard API server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_base_url() -> String {
    "https://fantasy.premierleague.com/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Checks the roster invariants the aggregation relies on: at least one
    /// entrant, and no duplicate ids or display names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.league.entrants.is_empty() {
            return Err(ConfigError::Validation(
                "league.entrants must list at least one entrant".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        for entrant in &self.league.entrants {
            if !ids.insert(entrant.id) {
                return Err(ConfigError::Validation(format!(
                    "duplicate entrant id: {}",
                    entrant.id
                )));
            }
            if !names.insert(entrant.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate entrant name: {}",
                    entrant.name
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_full_config_parses() {
        let config = parse(
            r#"
            [league]
            name = "We Hate City"
            entrants = [
                { id = 7326724, name = "Sam" },
                { id = 7292048, name = "Pierre" },
            ]

            [api]
            base_url = "http://localhost:8080/api"
            timeout_secs = 5

            [server]
            host = "127.0.0.1"
            port = 4000
            "#,
        );

        assert_eq!(config.league.name, "We Hate City");
        assert_eq!(config.league.entrants.len(), 2);
        assert_eq!(config.league.entrants[0].name, "Sam");
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 4000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_and_server_sections_are_optional() {
        let config = parse(
            r#"
            [league]
            name = "Solo"
            entrants = [{ id = 1, name = "Sam" }]
            "#,
        );

        assert_eq!(config.api.base_url, "https://fantasy.premierleague.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_validate_rejects_empty_roster() {
        let config = parse(
            r#"
            [league]
            name = "Empty"
            entrants = []
            "#,
        );

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("at least one")
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let config = parse(
            r#"
            [league]
            name = "Dupes"
            entrants = [
                { id = 1, name = "Sam" },
                { id = 1, name = "Pierre" },
            ]
            "#,
        );

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("duplicate entrant id")
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let config = parse(
            r#"
            [league]
            name = "Dupes"
            entrants = [
                { id = 1, name = "Sam" },
                { id = 2, name = "Sam" },
            ]
            "#,
        );

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(msg)) if msg.contains("duplicate entrant name")
        ));
    }
}
