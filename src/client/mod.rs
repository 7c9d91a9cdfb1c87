mod builder;

use crate::error::{ClientError, Result};
pub use builder::ClientBuilder;
use rquest::Client as RquestClient;
use url::Url;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.0.0 Safari/537.36";

#[derive(Debug)]
pub struct ClientResponse {
    pub status: u16,
    pub content: String,
}

pub struct Client {
    inner: RquestClient,
    base_url: Url,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Client for one department site with browser-like headers.
    pub fn for_site(base_url: &str) -> Result<Self> {
        Client::builder()
            .base_url(base_url)
            .header("user-agent", USER_AGENT)?
            .header("accept", "text/html,application/xhtml+xml")?
            .header("accept-language", "en-US,en;q=0.7")?
            .chrome_impersonation(true)
            .build()
    }

    /// Fetches `path`, which may be relative to the base URL or absolute.
    pub async fn get(&self, path: &str) -> Result<ClientResponse> {
        let url = self.build_url(path)?;
        self.request(&url).await
    }

    pub fn build_url(&self, path: &str) -> Result<String> {
        let full_url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(format!("Invalid path: {}", e)))?;

        Ok(full_url.to_string())
    }

    async fn request(&self, url: &str) -> Result<ClientResponse> {
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let is_success = response.status().is_success();
        let content = response.text().await.map_err(|e| {
            ClientError::RequestFailed(format!("Failed to get response text: {}", e))
        })?;

        if !is_success {
            return Err(ClientError::ResponseError {
                status_code: status,
                message: format!("GET {}", url),
            }
            .into());
        }

        Ok(ClientResponse { status, content })
    }
}
