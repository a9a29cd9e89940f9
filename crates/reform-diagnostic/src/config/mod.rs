use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Script endpoint receiving order-sheet submissions.
pub const DEFAULT_LEAD_ENDPOINT_URL: &str = "https://script.google.com/macros/s/AKfycbwgISonFRUrzolEjnBkoRbzvCNbKiYco17Vn8Um7U-r5IDL7ko-N8GHcoddk-aW2I1MAA/exec";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the diagnostic service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub lead: LeadConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let lead = LeadConfig::new(
            env::var("LEAD_ENDPOINT_URL")
                .unwrap_or_else(|_| DEFAULT_LEAD_ENDPOINT_URL.to_string()),
        )?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                ansi: environment == AppEnvironment::Development,
                include_targets: environment != AppEnvironment::Production,
            },
            lead,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing output controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub ansi: bool,
    pub include_targets: bool,
}

/// Where validated leads are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadConfig {
    pub endpoint_url: String,
}

impl LeadConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint_url = endpoint_url.into().trim().to_string();
        if !(endpoint_url.starts_with("https://") || endpoint_url.starts_with("http://")) {
            return Err(ConfigError::InvalidLeadEndpoint(endpoint_url));
        }

        Ok(Self { endpoint_url })
    }
}

impl Default for LeadConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_LEAD_ENDPOINT_URL.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLeadEndpoint(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLeadEndpoint(value) => {
                write!(f, "LEAD_ENDPOINT_URL must be an http(s) URL, found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidLeadEndpoint(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
