use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5179;
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_DATA_FILE: &str = "data/wishes.json";

/// Server settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub bind: String,
    /// JSON document the file store persists to.
    pub data_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl ServerConfig {
    /// `PORT`, `WISHWALL_BIND`, `WISHWALL_DATA_FILE`; unset or unparsable
    /// values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            bind: lookup("WISHWALL_BIND")
                .filter(|b| !b.trim().is_empty())
                .unwrap_or(defaults.bind),
            data_file: lookup("WISHWALL_DATA_FILE")
                .filter(|f| !f.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.bind.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
