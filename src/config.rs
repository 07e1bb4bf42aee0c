use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use tracing::level_filters::LevelFilter;

use crate::{Error, Result};

/// Options for the HTTP server.
///
/// This struct is *library-level configuration*, not CLI flags directly. Binaries map their
/// flags and environment into this type so the same settings can be constructed
/// programmatically (tests, embedding).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind to (e.g. `"0.0.0.0"`, `"::1"`).
    pub host: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Default log verbosity. `TUBESCRIPT_LOG` still overrides it at startup.
    pub log_level: LevelFilter,

    /// Origins allowed by CORS. A `"*"` entry allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 5001,
            log_level: LevelFilter::INFO,
            cors_origins: vec!["*".to_owned()],
        }
    }
}

impl ServerConfig {
    /// Socket address built from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.trim().parse().map_err(|_| {
            Error::invalid_input(format!("invalid bind host '{}'", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Whether CORS should allow any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o.trim() == "*")
    }
}

/// Options for caption providers that talk to a remote service.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Preferred caption languages, most preferred first (e.g. `["en", "en-US"]`).
    pub languages: Vec<String>,

    /// Upper bound for each outbound HTTP request.
    pub request_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_owned()],
            request_timeout: Duration::from_secs(30),
        }
    }
}
