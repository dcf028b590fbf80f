// Configuration module entry point
// Layers defaults, the optional config file, and environment variables

mod types;

use std::net::SocketAddr;

pub use types::{Config, LoggingConfig, ServerConfig};

/// Port used when neither `PORT` nor the config file sets one.
const DEFAULT_PORT: u16 = 4000;

impl Config {
    /// Load configuration from the default "config" file (config.toml)
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// Precedence, lowest to highest: built-in defaults, the config file,
    /// `SERVER_*` environment variables, and finally `PORT`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?;

        if let Some(port) = port_from_env(std::env::var("PORT").ok()) {
            builder = builder.set_override("server.port", i64::from(port))?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Parse the `PORT` environment value.
///
/// Values that are absent or not a valid port number fall through to the
/// remaining configuration sources.
fn port_from_env(value: Option<String>) -> Option<u16> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_from_env_parses_valid_values() {
        assert_eq!(port_from_env(Some("5000".to_string())), Some(5000));
        assert_eq!(port_from_env(Some(" 8080 ".to_string())), Some(8080));
    }

    #[test]
    fn port_from_env_rejects_invalid_values() {
        assert_eq!(port_from_env(None), None);
        assert_eq!(port_from_env(Some(String::new())), None);
        assert_eq!(port_from_env(Some("abc".to_string())), None);
        assert_eq!(port_from_env(Some("70000".to_string())), None);
        assert_eq!(port_from_env(Some("-1".to_string())), None);
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let cfg = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 4000,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
        };
        assert_eq!(cfg.socket_addr().unwrap().port(), 4000);
        assert!(cfg.socket_addr().unwrap().is_ipv4());
    }

    #[test]
    fn socket_addr_rejects_bad_host() {
        let cfg = Config {
            server: ServerConfig {
                host: "not a host".to_string(),
                port: 4000,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
        };
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn defaults_apply_without_config_file() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        if std::env::var("PORT").is_err() {
            assert_eq!(cfg.server.port, DEFAULT_PORT);
        }
    }
}
