use std::env;

use crate::ajax::AjaxOptions;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub page_size: i64,
    pub total_items: i64,
    /// Unobtrusive-AJAX attributes for preview links; htmx is used when unset.
    pub ajax_options: Option<AjaxOptions>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let page_size = env::var("PAGER_PAGE_SIZE")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<i64>()
            .ok()
            .filter(|size| *size > 0)
            .ok_or(ConfigError::InvalidPageSize)?;

        let ajax_options = match env::var("PAGER_AJAX_OPTIONS") {
            Ok(raw) if !raw.trim().is_empty() => Some(serde_json::from_str(&raw)?),
            _ => None,
        };

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3010".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            page_size,
            total_items: env::var("PAGER_TOTAL_ITEMS")
                .unwrap_or_else(|_| "500".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidTotalItems)?,
            ajax_options,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value")]
    InvalidPort,
    #[error("PAGER_PAGE_SIZE must be a positive integer")]
    InvalidPageSize,
    #[error("Invalid PAGER_TOTAL_ITEMS value")]
    InvalidTotalItems,
    #[error("Invalid PAGER_AJAX_OPTIONS JSON: {0}")]
    InvalidAjaxOptions(#[from] serde_json::Error),
}
