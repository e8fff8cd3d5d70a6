use crate::analysis::EstimateAssumptions;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub scoring: ScoringConfig,
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
            scoring: ScoringConfig::from_env()?,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where ledgers and threshold overrides live, plus the assumptions used to
/// estimate ROIC and WACC when a ledger lacks them.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub ledger_dir: PathBuf,
    pub thresholds_path: Option<PathBuf>,
    pub assumptions: EstimateAssumptions,
}

impl ScoringConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let ledger_dir = env::var("SCORING_LEDGER_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/ledgers"));
        let thresholds_path = env::var("SCORING_THRESHOLDS_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let defaults = EstimateAssumptions::default();
        let assumptions = EstimateAssumptions {
            tax_rate: rate_from_env("SCORING_TAX_RATE", defaults.tax_rate)?,
            cost_of_equity: rate_from_env("SCORING_COST_OF_EQUITY", defaults.cost_of_equity)?,
            default_cost_of_debt: rate_from_env(
                "SCORING_COST_OF_DEBT",
                defaults.default_cost_of_debt,
            )?,
        };

        Ok(Self {
            ledger_dir,
            thresholds_path,
            assumptions,
        })
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ledger_dir: PathBuf::from("data/ledgers"),
            thresholds_path: None,
            assumptions: EstimateAssumptions::default(),
        }
    }
}

fn rate_from_env(var: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() && (0.0..1.0).contains(&rate) => Ok(rate),
        _ => Err(ConfigError::InvalidRate { var, value: raw }),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRate { var: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRate { var, value } => {
                write!(f, "{var} must be a fraction in [0, 1), got '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidRate { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
