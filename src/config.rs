//! Runtime configuration pulled from the process environment.
//!
//! `.env` is loaded by the binary before [`Config::load`] runs, so both sources
//! look identical here. Database keys share the `DB_` prefix; the log level is
//! read from `LOGLEVEL`.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::Deserialize;
use sqlx::mysql::{MySqlConnectOptions, MySqlSslMode};
use std::fmt;

pub const DEFAULT_PORT: u16 = 19640;
pub const DEFAULT_DATABASE: &str = "defaultdb";
pub const DEFAULT_LOGLEVEL: &str = "info";

/// Environment keys an operator has to provide, with checklist placeholders.
pub const REQUIRED_KEYS: [(&str, &str); 5] = [
    ("DB_HOST", "your-host"),
    ("DB_PORT", "your-port"),
    ("DB_USER", "your-user"),
    ("DB_PASSWORD", "your-password"),
    ("DB_NAME", "your-database"),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub loglevel: String,
    pub database: DbConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: DEFAULT_LOGLEVEL.to_string(),
            database: DbConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        let loglevel = raw_layer(Figment::new(), "", &["loglevel"])
            .extract_inner::<String>("loglevel")
            .unwrap_or_else(|_| DEFAULT_LOGLEVEL.to_string());
        Ok(Self {
            loglevel,
            database: DbConfig::from_env_prefixed("DB_")?,
        })
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: String,
    /// Require TLS; hosted MySQL offerings usually refuse plaintext.
    pub ssl: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            user: None,
            password: None,
            name: DEFAULT_DATABASE.to_string(),
            ssl: false,
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<hidden>"))
            .field("name", &self.name)
            .field("ssl", &self.ssl)
            .finish()
    }
}

impl DbConfig {
    /// Extract from `<prefix>HOST`, `<prefix>PORT`, etc. Missing keys keep
    /// their [`Default`] values.
    pub fn from_env_prefixed(prefix: &str) -> Result<Self, figment::Error> {
        let typed = Figment::new().merge(Env::prefixed(prefix).only(&["port", "ssl"]));
        raw_layer(typed, prefix, &["host", "user", "password", "name"]).extract()
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut opts = MySqlConnectOptions::new()
            .port(self.port)
            .database(&self.name)
            .charset("utf8mb4")
            .ssl_mode(if self.ssl {
                MySqlSslMode::Required
            } else {
                MySqlSslMode::Preferred
            });
        if let Some(host) = self.host.as_deref() {
            opts = opts.host(host);
        }
        if let Some(user) = self.user.as_deref() {
            opts = opts.username(user);
        }
        if let Some(password) = self.password.as_deref() {
            opts = opts.password(password);
        }
        opts
    }

    pub fn host_display(&self) -> &str {
        self.host.as_deref().unwrap_or("<unset>")
    }
}

// `Env` parses values into typed figment values (`007` -> 7, `[a]` -> array),
// so credentials and names are layered in as the exact env text.
fn raw_layer(figment: Figment, prefix: &str, keys: &[&str]) -> Figment {
    keys.iter().fold(figment, |figment, key| {
        let var = format!("{prefix}{}", key.to_ascii_uppercase());
        match dotenvy::var(&var) {
            Ok(value) => figment.merge(Serialized::default(key, value)),
            Err(_) => figment,
        }
    })
}
