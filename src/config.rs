//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/toll-fee/config.toml`). Every
//! section is optional; missing values fall back to the Gothenburg tariff and
//! a local server on port 8080.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Month, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::{ExemptionPolicy, FareBreakpoint, FareTable, Price, TollPolicy, VehicleType};
use crate::shared::errors::ConfigError;

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toll-fee")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub toll: TollConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`, or any `EnvFilter` directive
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Tariff section: fares, exemptions and the daily cap
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TollConfig {
    /// Must be sorted by time of day
    pub fares: Vec<FareBreakpoint>,
    pub max_daily_fare: Price,
    pub exempt_months: Vec<Month>,
    pub exempt_week_days: Vec<Weekday>,
    pub exempt_dates: Vec<NaiveDate>,
    pub exempt_vehicle_types: Vec<VehicleType>,
}

impl TollConfig {
    /// Build the immutable policy, failing on an invalid fare table.
    pub fn to_policy(&self) -> Result<Arc<TollPolicy>, ConfigError> {
        let fares = FareTable::new(self.fares.clone())?;
        let exemptions = ExemptionPolicy::new(
            self.exempt_months.iter().copied(),
            self.exempt_week_days.iter().copied(),
            self.exempt_dates.iter().copied(),
            self.exempt_vehicle_types.iter().copied(),
        );
        Ok(Arc::new(TollPolicy::new(fares, exemptions, self.max_daily_fare)))
    }
}

impl Default for TollConfig {
    fn default() -> Self {
        let fares = [
            (0, 0, 0),
            (6, 0, 9),
            (6, 30, 16),
            (7, 0, 22),
            (8, 0, 16),
            (8, 30, 9),
            (15, 0, 16),
            (15, 30, 22),
            (17, 0, 16),
            (18, 0, 9),
            (18, 30, 0),
        ]
        .into_iter()
        .map(|(hour, minute, price)| FareBreakpoint::new(hour, minute, price))
        .collect();

        // Swedish public holidays and the days before them, 2022
        let exempt_dates = [
            (1, 5),
            (1, 6),
            (4, 14),
            (4, 15),
            (4, 18),
            (5, 25),
            (5, 26),
            (6, 6),
            (6, 24),
            (11, 4),
            (12, 26),
        ]
        .into_iter()
        .filter_map(|(m, d)| NaiveDate::from_ymd_opt(2022, m, d))
        .collect();

        Self {
            fares,
            max_daily_fare: 60,
            exempt_months: vec![Month::July],
            exempt_week_days: vec![Weekday::Sat, Weekday::Sun],
            exempt_dates,
            exempt_vehicle_types: vec![
                VehicleType::Motorbike,
                VehicleType::Tractor,
                VehicleType::Emergency,
                VehicleType::Diplomat,
                VehicleType::Foreign,
                VehicleType::Military,
            ],
        }
    }
}

impl AppConfig {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.toll.to_policy().map(|_| ())
    }
}
