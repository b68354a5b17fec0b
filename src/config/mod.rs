//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::calculate::{AliasError, AliasTable, MapNames};
use crate::storage::{self, StorageConfig, StorageError, DEFAULT_SCORE_PATTERN};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid alias table: {0}")]
    Alias(#[from] AliasError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Where score files come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Glob for score files in the data directory
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Lobby page URLs; when set, only their score files are loaded
    #[serde(default)]
    pub lobby_urls: Vec<String>,
}

fn default_pattern() -> String {
    DEFAULT_SCORE_PATTERN.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pattern: default_pattern(),
            lobby_urls: Vec::new(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Team analyzed by default
    #[serde(default = "default_team_name")]
    pub team_name: String,

    #[serde(default)]
    pub sources: SourceConfig,

    /// Canonical player name → every name it has played under
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,

    /// Map code → display name, merged over the built-in names
    #[serde(default)]
    pub map_names: BTreeMap<String, String>,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_team_name() -> String {
    "SUPERNOVA".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            team_name: default_team_name(),
            sources: SourceConfig::default(),
            aliases: BTreeMap::new(),
            map_names: BTreeMap::new(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.team_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Team name must not be empty".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        for url in &self.sources.lobby_urls {
            storage::score_filename_for_lobby(url)
                .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        }

        self.alias_table()?;
        Ok(())
    }

    /// Build the player alias table.
    pub fn alias_table(&self) -> Result<AliasTable, AliasError> {
        AliasTable::from_entries(
            self.aliases
                .iter()
                .map(|(canonical, names)| (canonical.as_str(), names.iter().map(String::as_str))),
        )
    }

    /// Built-in map names with the configured overrides applied.
    pub fn map_names(&self) -> MapNames {
        MapNames::with_overrides(
            self.map_names
                .iter()
                .map(|(code, name)| (code.as_str(), name.as_str())),
        )
    }

    pub fn storage(&self) -> StorageConfig {
        StorageConfig::new(self.data_dir.clone())
    }

    /// Score files to load: derived from lobby URLs, or discovered.
    pub fn score_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        storage::resolve_score_files(
            &self.storage(),
            &self.sources.pattern,
            &self.sources.lobby_urls,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
data_dir = "/srv/lobbies"
team_name = "SUPERNOVA"

[sources]
lobby_urls = [
    "https://eternalesports.club/lobbies/3/19882b",
    "https://eternalesports.club/lobbies/4/a91cce",
]

[aliases]
"SN NINEimpulse" = ["SN NINEimpulse", "SN BusDriver", "BusDriver"]
"SN Kazakh" = ["SN Kazakh"]

[map_names]
mp_rr_custom = "Custom Arena"

[server]
port = 9000
"#;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.team_name, "SUPERNOVA");
        assert_eq!(config.sources.pattern, "lobbies_*_scores.json");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_parse_sample() {
        let config: AppConfig = toml::from_str(SAMPLE).unwrap();
        config.validate().unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/lobbies"));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");

        let aliases = config.alias_table().unwrap();
        assert_eq!(aliases.canonicalize("BusDriver"), "SN NINEimpulse");
        assert_eq!(config.map_names().display_name("mp_rr_custom"), "Custom Arena");
        assert_eq!(config.map_names().display_name("mp_rr_district_mu1"), "District");
    }

    #[test]
    fn test_score_files_from_lobby_urls() {
        let config: AppConfig = toml::from_str(SAMPLE).unwrap();
        let files = config.score_files().unwrap();

        assert_eq!(
            files,
            vec![
                PathBuf::from("/srv/lobbies/lobbies_3_19882b_scores.json"),
                PathBuf::from("/srv/lobbies/lobbies_4_a91cce_scores.json"),
            ]
        );
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_team() {
        let mut config = AppConfig::default();
        config.team_name = "  ".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_validation_bad_lobby_url() {
        let mut config = AppConfig::default();
        config.sources.lobby_urls = vec!["https://example.com/teams/1".to_string()];

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_conflicting_alias() {
        let mut config = AppConfig::default();
        config
            .aliases
            .insert("A".to_string(), vec!["shared".to_string()]);
        config
            .aliases
            .insert("B".to_string(), vec!["shared".to_string()]);

        assert!(matches!(config.validate(), Err(ConfigError::Alias(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let result = AppConfig::from_file(&tmp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("lobby-stats.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.aliases.len(), 2);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.team_name, parsed.team_name);
    }
}
