/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Environment variables consulted after the `ROSTER_` ones, for deployments
/// that only set the conventional names.
const PORT_VAR: &str = "PORT";
const DATABASE_URL_VAR: &str = "DATABASE_URL";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

/// Response behaviour of the user endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Answer lookups of unknown IDs with 404 instead of 500
    #[serde(default)]
    pub distinct_not_found: bool,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `config.toml` from the working directory when `path` is `None`
    /// and that file exists; an explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_from(path, None)
    }

    /// Load configuration, taking environment variables from `env` instead of
    /// the process environment when it is given
    pub fn load_from(path: Option<&Path>, env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (ROSTER_SERVER__PORT, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("ROSTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env.clone()),
        );

        // An empty PORT or DATABASE_URL counts as unset
        let lookup = |key: &str| {
            match &env {
                Some(map) => map.get(key).cloned(),
                None => std::env::var(key).ok(),
            }
            .filter(|value| !value.is_empty())
        };

        settings = settings
            .set_override_option("server.port", lookup(PORT_VAR))
            .and_then(|s| s.set_override_option("storage.database_url", lookup(DATABASE_URL_VAR)))
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set ROSTER_STORAGE__DATABASE_URL)".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ServerError::Config("Port must be non-zero".to_string()));
        }

        self.server_addr().map(|_| ())
    }

    /// Socket address the listener binds to
    pub fn server_addr(&self) -> Result<SocketAddr> {
        let host: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ServerError::Config(format!("Invalid host: {}", self.server.host)))?;

        Ok(SocketAddr::from((host, self.server.port)))
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://roster.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            api: ApiSettings::default(),
        }
    }
}
