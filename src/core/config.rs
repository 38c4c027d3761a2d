/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | data/smakowalo.db | SQLite database file |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | EnvFilter directive |
/// | LOG_DIR | (unset) | Enable daily-rolling file logs when set |
/// | CURRENCY | zł | Currency label used in customer messages |
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Path to the SQLite database file
    pub database_path: String,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Log level filter
    pub log_level: String,
    /// Optional directory for rolling file logs
    pub log_dir: Option<String>,
    /// Currency label for customer-facing messages
    pub currency: String,
}

/// The slice of configuration the discount evaluator needs.
///
/// Passed in at construction so the pricing code never reads ambient
/// process state.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    pub currency: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/smakowalo.db".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "zł".into()),
        }
    }

    /// Pricing slice of this configuration
    pub fn pricing(&self) -> PricingConfig {
        PricingConfig {
            currency: self.currency.clone(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
