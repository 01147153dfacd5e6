use log::warn;
use serde_derive::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub busy_timeout_secs: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        RuntimeConfig {
            database_url: "sqlite://stickers.db".to_string(),
            max_connections: 5,
            busy_timeout_secs: 20,
        }
    }

    /// Loads the config file, falling back to defaults when it is missing
    /// or cannot be parsed
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    "Something went wrong reading the runtime config file {}, {:?}",
                    path.display(),
                    e
                );
                return RuntimeConfig::new();
            }
        };
        match toml::from_str(&contents) {
            Ok(c) => c,
            Err(e) => {
                warn!(
                    "Something went wrong parsing the runtime config file {}, {:?}",
                    path.display(),
                    e
                );
                RuntimeConfig::new()
            }
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}
