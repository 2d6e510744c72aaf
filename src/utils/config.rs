use crate::models::error::NewsError;

#[derive(Debug, Clone)]
pub struct Config {
    pub blob_rw_token: String,
    pub collect_api_token: String,
    /// When set, /cron/update-news requires a matching bearer token.
    pub cron_secret: Option<String>,
    pub port: u16,
}

impl Config {
    pub fn init() -> Result<Self, NewsError> {
        Ok(Config {
            blob_rw_token: require("BLOB_READ_WRITE_TOKEN")?,
            collect_api_token: require("COLLECT_API_TOKEN")?,
            cron_secret: std::env::var("CRON_SECRET")
                .ok()
                .filter(|secret| !secret.is_empty()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
        })
    }
}

fn require(name: &str) -> Result<String, NewsError> {
    std::env::var(name).map_err(|_| NewsError::Configuration(format!("{name} tanımlı değil.")))
}
