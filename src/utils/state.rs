use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::cache::blob::VercelBlobStore;
use crate::cache::collect::CollectApiClient;
use crate::cache::{NewsCacheRefresher, FETCH_INTERVAL_MS};
use crate::models::error::NewsError;
use crate::utils::config::Config;

pub struct AppState {
    pub config: Config,
    pub refresher: NewsCacheRefresher,
}

impl AppState {
    pub fn init() -> Result<Self, NewsError> {
        let config = Config::init()?;

        // Single shared client; finite timeout so a hung upstream cannot
        // hold an invocation open indefinitely.
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| NewsError::Configuration(format!("HTTP istemcisi kurulamadı: {err}")))?;

        let store = Arc::new(VercelBlobStore::new(
            http_client.clone(),
            config.blob_rw_token.clone(),
        ));
        let provider = Arc::new(CollectApiClient::new(
            http_client,
            config.collect_api_token.clone(),
        ));
        let refresher = NewsCacheRefresher::new(store, provider, FETCH_INTERVAL_MS);

        Ok(AppState { config, refresher })
    }
}
