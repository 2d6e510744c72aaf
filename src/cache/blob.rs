use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::NewsStore;
use crate::models::error::NewsError;
use crate::models::news::NewsPayload;

pub const BLOB_BASE_URL: &str = "https://blob.vercel-storage.com";
pub const BLOB_FILENAME: &str = "news_cache.json";

/// Vercel Blob REST client. The store holds exactly one object under
/// `BLOB_FILENAME`; listing by prefix stands in for a point read because the
/// blob URL is not stable across overwrites.
pub struct VercelBlobStore {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Deserialize)]
struct BlobListing {
    #[serde(default)]
    blobs: Vec<BlobEntry>,
}

#[derive(Deserialize)]
struct BlobEntry {
    url: String,
}

impl VercelBlobStore {
    pub fn new(client: Client, token: String) -> Self {
        Self {
            client,
            base_url: BLOB_BASE_URL.to_string(),
            token,
        }
    }
}

#[async_trait]
impl NewsStore for VercelBlobStore {
    async fn read(&self) -> Result<Option<NewsPayload>, NewsError> {
        let list_response = self
            .client
            .get(&self.base_url)
            .query(&[("prefix", BLOB_FILENAME)])
            .bearer_auth(&self.token)
            .header("x-api-version", "7")
            .send()
            .await
            .map_err(|err| NewsError::Store(format!("Blob list hatası: {err}")))?;

        if !list_response.status().is_success() {
            return Err(NewsError::Store(format!(
                "Blob list hatası: {}",
                list_response.status()
            )));
        }

        let listing: BlobListing = list_response
            .json()
            .await
            .map_err(|err| NewsError::Store(format!("Blob list hatası: {err}")))?;

        let Some(entry) = listing.blobs.first() else {
            return Ok(None);
        };

        let blob_response = self
            .client
            .get(&entry.url)
            .send()
            .await
            .map_err(|err| NewsError::Store(format!("Blob okuma hatası: {err}")))?;

        if !blob_response.status().is_success() {
            return Err(NewsError::Store(format!(
                "Blob okuma hatası: {}",
                blob_response.status()
            )));
        }

        let payload = blob_response
            .json()
            .await
            .map_err(|err| NewsError::Store(format!("Blob okuma hatası: {err}")))?;

        Ok(Some(payload))
    }

    async fn write(&self, payload: &NewsPayload) -> Result<(), NewsError> {
        let put_response = self
            .client
            .put(format!("{}/{}", self.base_url, BLOB_FILENAME))
            .bearer_auth(&self.token)
            .header("x-api-version", "7")
            .json(payload)
            .send()
            .await
            .map_err(|err| NewsError::Store(format!("Blob yazma hatası: {err}")))?;

        if !put_response.status().is_success() {
            return Err(NewsError::Store(format!(
                "Blob yazma hatası: {}",
                put_response.status()
            )));
        }

        Ok(())
    }
}
