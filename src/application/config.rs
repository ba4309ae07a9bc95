use crate::domain::errors::ConfigError;
use crate::domain::logging::LogLevel;
use crate::domain::market_data::HISTORY_POINTS;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Settings for one stock list instance. Missing JSON fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockListConfig {
    pub page_size: usize,
    pub history_points: usize,
    pub placeholder: String,
    pub width_px: u32,
    pub row_height_px: u32,
    pub dark_theme: bool,
    pub log_level: String,
}

impl Default for StockListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            history_points: HISTORY_POINTS,
            placeholder: "Search by stocks".to_string(),
            width_px: 400,
            row_height_px: 36,
            dark_theme: true,
            log_level: "debug".to_string(),
        }
    }
}

impl StockListConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "page_size",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.history_points == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "history_points",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.row_height_px == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "row_height_px",
                reason: "must be greater than zero".to_string(),
            });
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.log_level.parse::<LogLevel>().map_err(|_| ConfigError::InvalidParameter {
            name: "log_level",
            reason: format!("unknown level '{}'", self.log_level),
        })
    }
}
