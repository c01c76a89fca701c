//! Server configuration: a TOML file with environment overrides.
//!
//! ```text
//! host = "0.0.0.0"
//! port = 8000
//! data_dir = "/var/lib/salesdojo"
//!
//! [tokens]
//! "f3a9..." = "alice"
//! "0c47..." = "bob"
//!
//! [training]
//! customer_model = "gpt-4o-mini"
//! ```

use salesdojo_application::TrainingConfig;
use salesdojo_core::error::Result;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "SALESDOJO_CONFIG";

/// Config file consulted when the environment names none.
pub const DEFAULT_CONFIG_FILE: &str = "salesdojo.toml";

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Full server configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Data directory; `~/.salesdojo` when unset.
    pub data_dir: Option<PathBuf>,
    /// Session token to username table.
    pub tokens: HashMap<String, String>,
    /// Dialogue orchestrator tunables.
    pub training: TrainingConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: None,
            tokens: HashMap::new(),
            training: TrainingConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads the configuration: the file named by `SALESDOJO_CONFIG`, else
    /// `salesdojo.toml` in the working directory, else compiled-in defaults.
    /// `SALESDOJO_HOST`, `SALESDOJO_PORT` and `SALESDOJO_DATA_DIR` override
    /// the file.
    ///
    /// # Errors
    ///
    /// Returns an error when the named file cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(host) = env::var("SALESDOJO_HOST") {
            config.host = host;
        }
        if let Ok(port) = env::var("SALESDOJO_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            } else {
                tracing::warn!("ignoring unparsable SALESDOJO_PORT: {}", port);
            }
        }
        if let Ok(dir) = env::var("SALESDOJO_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }

        Ok(config)
    }

    /// Parses a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// The data directory, defaulting to `~/.salesdojo`.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(salesdojo_infrastructure::paths::default_data_dir)
    }

    /// The socket address string to bind.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
