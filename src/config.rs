use std::env;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::AppError;

const DEFAULT_LEGANTO_BASE_URL: &str = "https://api-eu.hosted.exlibrisgroup.com/almaws/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct CanvasConfig {
    pub base_url: String,
    pub api_token: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct LegantoConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Settings for one sync run over an academic year.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub accounts: Vec<String>,
    pub search_term: String,
    pub default_start: NaiveDate,
    pub default_end: NaiveDate,
    pub display_year: String,
}

#[derive(Clone, Debug)]
pub struct SyncConfig {
    pub canvas: CanvasConfig,
    pub leganto: LegantoConfig,
    pub run: RunConfig,
}

impl SyncConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        let timeout = Duration::from_secs(timeout_secs);

        let canvas = CanvasConfig {
            base_url: trim_base_url(required("CANVAS_BASE_URL")?),
            api_token: required("CANVAS_TOKEN")?,
            timeout,
        };

        let leganto = LegantoConfig {
            base_url: trim_base_url(
                env::var("LEGANTO_BASE_URL").unwrap_or_else(|_| DEFAULT_LEGANTO_BASE_URL.to_string()),
            ),
            api_key: required("LEGANTO_API_KEY")?,
            timeout,
        };

        let run = RunConfig {
            accounts: parse_accounts(&required("CANVAS_ACCOUNTS")?),
            search_term: required("SEARCH_TERM")?,
            default_start: parse_date("DEFAULT_START_DATE", &required("DEFAULT_START_DATE")?)?,
            default_end: parse_date("DEFAULT_END_DATE", &required("DEFAULT_END_DATE")?)?,
            display_year: required("DISPLAY_YEAR")?,
        };

        Ok(Self {
            canvas,
            leganto,
            run,
        })
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("{} is not set", key)))
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Splits a comma-separated account list, keeping the configured order.
pub fn parse_accounts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_date(key: &str, raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::Config(format!("{} must be YYYY-MM-DD ({}): {}", key, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accounts_keep_order_and_drop_blanks() {
        assert_eq!(parse_accounts("45, 49,,271 "), vec!["45", "49", "271"]);
        assert!(parse_accounts("").is_empty());
    }

    #[test]
    fn rejects_malformed_default_date() {
        assert!(parse_date("DEFAULT_START_DATE", "2024-08-31").is_ok());
        assert!(matches!(
            parse_date("DEFAULT_START_DATE", "31/08/2024"),
            Err(AppError::Config(_))
        ));
    }
}
