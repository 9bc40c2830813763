use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_PATH: &str = "data/neighborhood_data.tsv.gz";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    /// Street table, plain or gzip-compressed TSV
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load the config file if one was given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Replace the port of the listen address, keeping the host.
    pub fn with_port(mut self, port: u16) -> Self {
        let host = self
            .server
            .listen
            .rsplit_once(':')
            .map_or(self.server.listen.as_str(), |(host, _)| host);
        self.server.listen = format!("{}:{}", host, port);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::load_or_default(None).unwrap();
        assert_eq!(config.data.path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.server.listen, DEFAULT_LISTEN);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\npath = \"/srv/streets.tsv\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.data.path, PathBuf::from("/srv/streets.tsv"));
        assert_eq!(config.server.listen, DEFAULT_LISTEN);
    }

    #[test]
    fn test_bad_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nlisten = 8080").unwrap();
        assert!(Config::load_from_file(file.path()).is_err());
        assert!(Config::load_from_file("/nonexistent/neighborhood.toml").is_err());
    }

    #[test]
    fn test_with_port() {
        let config = Config::default().with_port(9000);
        assert_eq!(config.server.listen, "0.0.0.0:9000");

        let mut config = Config::default();
        config.server.listen = "localhost".to_string();
        assert_eq!(config.with_port(9000).server.listen, "localhost:9000");
    }
}
