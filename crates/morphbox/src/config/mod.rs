use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::explorer::{
    GeneratorConfig, DEFAULT_PLACEHOLDER_PROBABILITY, DEFAULT_SAMPLE_CAP, MAX_SAMPLE_CAP,
};

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

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub explorer: ExplorerConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            explorer: ExplorerConfig::from_env()?,
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Sampling defaults applied to every generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub sample_cap: usize,
    pub default_probability: f64,
    pub allow_duplicates: bool,
    pub seed: Option<u64>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            sample_cap: DEFAULT_SAMPLE_CAP,
            default_probability: DEFAULT_PLACEHOLDER_PROBABILITY,
            allow_duplicates: true,
            seed: None,
        }
    }
}

impl ExplorerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let sample_cap = match env::var("APP_SAMPLE_CAP") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(cap) if (1..=MAX_SAMPLE_CAP).contains(&cap) => cap,
                _ => return Err(ConfigError::InvalidSampleCap),
            },
            Err(_) => defaults.sample_cap,
        };

        let default_probability = match env::var("APP_DEFAULT_PROBABILITY") {
            Ok(raw) => match raw.trim().parse::<f64>() {
                Ok(p) if (0.0..=1.0).contains(&p) => p,
                _ => return Err(ConfigError::InvalidProbability),
            },
            Err(_) => defaults.default_probability,
        };

        let allow_duplicates = match env::var("APP_ALLOW_DUPLICATES") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag("APP_ALLOW_DUPLICATES"))?,
            Err(_) => defaults.allow_duplicates,
        };

        let seed = match env::var("APP_SEED") {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed)?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            sample_cap,
            default_probability,
            allow_duplicates,
            seed,
        })
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            sample_cap: self.sample_cap,
            default_probability: self.default_probability,
            allow_duplicates: self.allow_duplicates,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSampleCap,
    InvalidProbability,
    InvalidFlag(&'static str),
    InvalidSeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSampleCap => {
                write!(f, "APP_SAMPLE_CAP must be between 1 and {MAX_SAMPLE_CAP}")
            }
            ConfigError::InvalidProbability => {
                write!(f, "APP_DEFAULT_PROBABILITY must be a number between 0 and 1")
            }
            ConfigError::InvalidFlag(name) => write!(f, "{name} must be true or false"),
            ConfigError::InvalidSeed => write!(f, "APP_SEED must be a valid u64"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSampleCap
            | ConfigError::InvalidProbability
            | ConfigError::InvalidFlag(_)
            | ConfigError::InvalidSeed => None,
        }
    }
}
