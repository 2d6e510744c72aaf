use async_trait::async_trait;
use reqwest::Client;

use super::NewsProvider;
use crate::models::error::NewsError;
use crate::models::news::NewsEnvelope;

pub const COLLECT_API_URL: &str = "https://api.collectapi.com/news/getNews?country=tr&tag=general";

/// CollectAPI client for the Turkish general-news feed.
pub struct CollectApiClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl CollectApiClient {
    pub fn new(client: Client, token: String) -> Self {
        Self {
            client,
            endpoint: COLLECT_API_URL.to_string(),
            token,
        }
    }
}

#[async_trait]
impl NewsProvider for CollectApiClient {
    async fn fetch_latest(&self) -> Result<NewsEnvelope, NewsError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("content-type", "application/json")
            .header("authorization", format!("apikey {}", self.token))
            .send()
            .await
            .map_err(|err| NewsError::Upstream(format!("CollectAPI hatası: {err}")))?;

        if !response.status().is_success() {
            return Err(NewsError::Upstream(format!(
                "CollectAPI hatası: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|_| NewsError::Upstream("CollectAPI yanıtı beklenen formatta değil.".to_string()))
    }
}
