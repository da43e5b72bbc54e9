use serde::{Deserialize, Serialize};

/// Default port, matching the port the editor page expects in development.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Runtime configuration for the livepad server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Address to bind to.
    pub host: String,

    /// Port to listen on.
    pub port: u16,

    /// Whether to emit JSON logs.
    pub json_logs: bool,

    /// Verbosity level (0 = INFO, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            json_logs: false,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Create a config listening on the given host and port.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON log output.
    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    /// `host:port` string suitable for binding.
    ///
    /// `localhost` is mapped to the IPv4 loopback and bare IPv6 hosts are
    /// bracketed, so the result parses as a socket address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        let host = if self.host == "localhost" {
            DEFAULT_HOST
        } else {
            self.host.as_str()
        };
        if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_localhost_maps_to_loopback() {
        let config = Config::new("localhost", 8080);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        assert_eq!(Config::new("::1", 3000).bind_addr(), "[::1]:3000");
        assert_eq!(Config::new("[::]", 3000).bind_addr(), "[::]:3000");
    }

    #[test]
    fn test_builder() {
        let config = Config::new("0.0.0.0", 80)
            .with_verbosity(2)
            .with_json_logs(true);
        assert_eq!(config.bind_addr(), "0.0.0.0:80");
        assert_eq!(config.verbosity, 2);
        assert!(config.json_logs);
    }

    #[test]
    fn test_config_roundtrips_through_json() {
        let config = Config::new("0.0.0.0", 4000);
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
