use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

const DEFAULT_CONFIG_FILE: &str = "todo.toml";

/// Server configuration managed by Figment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server listen address.
    /// Env: `LISTEN_ADDR`. Default: `127.0.0.1`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// Env: `LISTEN_PORT`. Default: `8000`.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// SQLite database URL. `sqlite::memory:` keeps everything in process.
    /// Env: `DATABASE_URL`. Default: `sqlite://todos.db`.
    #[serde(default)]
    pub database_url: String,

    /// Log level for the tracing subscriber; `RUST_LOG` takes precedence.
    /// Env: `LOGLEVEL`. Default: `info`.
    #[serde(default)]
    pub loglevel: String,

    /// Browser origins allowed to call the API. Empty allows none, `"*"` allows any.
    /// Env: `CORS_ALLOWED_ORIGINS`, e.g. `["http://localhost:3000"]`.
    #[serde(default)]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            listen_port: default_listen_port(),
            database_url: "sqlite://todos.db".to_string(),
            loglevel: "info".to_string(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Defaults, then `todo.toml` if present, then environment variables.
    /// Uses raw env mapping, so field names map to env vars in UPPER_SNAKE_CASE.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };
        figment.merge(Env::raw())
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.listen_addr, self.listen_port))
    }
}

fn default_listen_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_listen_port() -> u16 {
    8000
}
