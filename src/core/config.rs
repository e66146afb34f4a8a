use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub lending: LendingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,
}

/// Eligibility thresholds and pricing applied to every application and loan
#[derive(Debug, Clone, Deserialize)]
pub struct LendingConfig {
    #[serde(default = "default_min_age")]
    pub min_age: i32,
    #[serde(default = "default_min_monthly_salary")]
    pub min_monthly_salary: f64,
    #[serde(default = "default_purchase_power_multiplier")]
    pub purchase_power_multiplier: f64,
    #[serde(default = "default_interest_rate")]
    pub interest_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_wal_path")]
    pub wal_path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            min_age: default_min_age(),
            min_monthly_salary: default_min_monthly_salary(),
            purchase_power_multiplier: default_purchase_power_multiplier(),
            interest_rate: default_interest_rate(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            wal_path: default_wal_path(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

fn default_token_ttl() -> i64 {
    3600 // 1 hour
}

fn default_min_age() -> i32 {
    20
}

fn default_min_monthly_salary() -> f64 {
    25_000.0
}

fn default_purchase_power_multiplier() -> f64 {
    2.0
}

fn default_interest_rate() -> f64 {
    0.08
}

fn default_wal_path() -> PathBuf {
    PathBuf::from("lending.wal")
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.auth.jwt_secret.is_empty() {
            bail!("jwt_secret must not be empty");
        }

        if self.auth.token_ttl_seconds <= 0 {
            bail!("token_ttl_seconds must be greater than 0");
        }

        if self.lending.min_age < 0 {
            bail!("min_age must be non-negative");
        }

        if !self.lending.min_monthly_salary.is_finite() || self.lending.min_monthly_salary < 0.0 {
            bail!("min_monthly_salary must be a non-negative number");
        }

        if !self.lending.purchase_power_multiplier.is_finite()
            || self.lending.purchase_power_multiplier <= 0.0
        {
            bail!("purchase_power_multiplier must be greater than 0");
        }

        if !self.lending.interest_rate.is_finite() || self.lending.interest_rate < 0.0 {
            bail!("interest_rate must be a non-negative number");
        }

        if self.storage.wal_path.as_os_str().is_empty() {
            bail!("wal_path must not be empty");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [server]
        port = 3000

        [auth]
        jwt_secret = "test-secret"
    "#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml(MINIMAL).expect("Failed to load config");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.auth.token_ttl_seconds, 3600);
        assert_eq!(config.lending.min_age, 20);
        assert_eq!(config.lending.min_monthly_salary, 25_000.0);
        assert_eq!(config.lending.purchase_power_multiplier, 2.0);
        assert_eq!(config.lending.interest_rate, 0.08);
        assert_eq!(config.storage.wal_path, PathBuf::from("lending.wal"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_example_config_loads() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.example.toml");
        let config = Config::from_file(&path).expect("Failed to load config");

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.lending.interest_rate, 0.08);
    }

    #[test]
    fn test_lending_overrides() {
        let toml = format!(
            "{}\n[lending]\nmin_age = 18\nmin_monthly_salary = 1000\ninterest_rate = 0.1\n",
            MINIMAL
        );
        let config = Config::from_toml(&toml).unwrap();

        assert_eq!(config.lending.min_age, 18);
        assert_eq!(config.lending.min_monthly_salary, 1000.0);
        assert_eq!(config.lending.interest_rate, 0.1);
        // Unset keys keep their defaults
        assert_eq!(config.lending.purchase_power_multiplier, 2.0);
    }

    #[test]
    fn test_missing_secret_rejected() {
        let toml = "[server]\nport = 3000\n[auth]\njwt_secret = \"\"\n";
        assert!(Config::from_toml(toml).is_err());
    }

    #[test]
    fn test_missing_auth_section_rejected() {
        assert!(Config::from_toml("[server]\nport = 3000\n").is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let toml = MINIMAL.replace("3000", "0");
        assert!(Config::from_toml(&toml).is_err());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let toml = format!("{}\n[logging]\nformat = \"xml\"\n", MINIMAL);
        assert!(Config::from_toml(&toml).is_err());
    }

    #[test]
    fn test_negative_interest_rate_rejected() {
        let toml = format!("{}\n[lending]\ninterest_rate = -0.5\n", MINIMAL);
        assert!(Config::from_toml(&toml).is_err());
    }
}
