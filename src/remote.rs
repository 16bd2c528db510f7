//! Remote content-management API client.
//!
//! [`ShareService`] is the seam between the publish flow and the network:
//! the real implementation talks HTTP, tests substitute scripted doubles.
//! Each operation completes exactly once; `upload_post_with_media` resolves
//! as soon as the upload request is accepted server-side, not when the media
//! finishes processing.

use crate::share::{MediaMetadata, PostStatus};
use crate::site::Site;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Asynchronous collaborator contract for fetching sites and publishing.
#[async_trait]
pub trait ShareService: Send + Sync {
    /// Fetch the sites the credential can publish to, in server order.
    async fn fetch_sites(&self) -> Result<Vec<Site>>;

    /// Create and publish a plain post.
    async fn save_and_upload_post(
        &self,
        title: &str,
        body: &str,
        status: PostStatus,
        site_id: u64,
    ) -> Result<()>;

    /// Create a post with media attachments. Resolves once the request is
    /// durably enqueued for upload.
    async fn upload_post_with_media(
        &self,
        title: &str,
        body: &str,
        status: PostStatus,
        site_id: u64,
        media: &[(PathBuf, MediaMetadata)],
    ) -> Result<()>;
}

/// HTTP client for the content-management REST API.
pub struct CmsClient {
    http_client: Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct SitesResponse {
    sites: Vec<Site>,
}

#[derive(Debug, Serialize)]
struct NewPostRequest<'a> {
    title: &'a str,
    content: &'a str,
    status: &'a str,
}

impl CmsClient {
    /// Create a new client against the given API base URL.
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Token preview safe for logs. Works on chars, not bytes, so a
    /// multi-byte token cannot split a character.
    fn token_preview(&self) -> String {
        let chars: Vec<char> = self.token.chars().collect();
        if chars.len() > 8 {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}...{tail}")
        } else {
            "***".to_string()
        }
    }

    async fn check_status(response: reqwest::Response, operation: &str) -> Result<reqwest::Response> {
        let status = response.status();
        info!("{} response status: {}", operation, status);

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("{} failed ({}): {}", operation, status, error_text);

            if status == reqwest::StatusCode::UNAUTHORIZED {
                anyhow::bail!(
                    "Invalid token or insufficient permissions.\n\n\
                    Check that the token in your config (or SHAREPOST_TOKEN) is\n\
                    current and has publish access to your sites."
                );
            }

            anyhow::bail!("API error during {} ({}): {}", operation, status, error_text);
        }
        Ok(response)
    }
}

#[async_trait]
impl ShareService for CmsClient {
    async fn fetch_sites(&self) -> Result<Vec<Site>> {
        let url = format!("{}/me/sites", self.base_url);
        info!("Fetching sites: GET {}", url);
        debug!("Token preview: {}", self.token_preview());

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", self.auth_header())
            .header("User-Agent", "sharepost")
            .send()
            .await
            .context("Failed to fetch sites")?;

        let response = Self::check_status(response, "site fetch").await?;

        let text = response
            .text()
            .await
            .context("Failed to read site list response")?;
        let body: SitesResponse =
            serde_json::from_str(&text).context("Failed to parse site list response")?;
        info!("Fetched {} site(s)", body.sites.len());
        Ok(body.sites)
    }

    async fn save_and_upload_post(
        &self,
        title: &str,
        body: &str,
        status: PostStatus,
        site_id: u64,
    ) -> Result<()> {
        let url = format!("{}/sites/{}/posts/new", self.base_url, site_id);
        info!("Publishing post: POST {} (status: {})", url, status);

        let request = NewPostRequest {
            title,
            content: body,
            status: status.as_str(),
        };

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("User-Agent", "sharepost")
            .json(&request)
            .send()
            .await
            .context("Failed to submit post")?;

        Self::check_status(response, "post publish").await?;
        Ok(())
    }

    async fn upload_post_with_media(
        &self,
        title: &str,
        body: &str,
        status: PostStatus,
        site_id: u64,
        media: &[(PathBuf, MediaMetadata)],
    ) -> Result<()> {
        let url = format!("{}/sites/{}/posts/new", self.base_url, site_id);
        info!(
            "Publishing post with {} media file(s): POST {} (status: {})",
            media.len(),
            url,
            status
        );

        let mut form = reqwest::multipart::Form::new()
            .text("title", title.to_string())
            .text("content", body.to_string())
            .text("status", status.as_str().to_string());

        for (path, meta) in media {
            let part = media_part(path, meta).await?;
            form = form.part("media[]", part);
        }

        let response = self
            .http_client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("User-Agent", "sharepost")
            .multipart(form)
            .send()
            .await
            .context("Failed to submit post with media")?;

        Self::check_status(response, "media post publish").await?;
        Ok(())
    }
}

/// Build a multipart part from a staged attachment.
async fn media_part(path: &Path, meta: &MediaMetadata) -> Result<reqwest::multipart::Part> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read staged attachment {}", path.display()))?;
    let part = reqwest::multipart::Part::bytes(bytes)
        .file_name(meta.filename.clone())
        .mime_str(&meta.mime_type)
        .with_context(|| format!("Invalid MIME type {}", meta.mime_type))?;
    Ok(part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sites_response_accepts_upper_case_wire_keys() {
        let json = r#"{
            "sites": [
                {"ID": 7, "name": "Demo", "URL": "https://demo.example.com"},
                {"id": 8, "url": "https://other.example.com", "icon_url": "https://cdn/i.png"}
            ]
        }"#;
        let body: SitesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.sites.len(), 2);
        assert_eq!(body.sites[0].id, 7);
        assert_eq!(body.sites[0].url, "https://demo.example.com");
        assert_eq!(body.sites[1].name, None);
        assert_eq!(body.sites[1].icon_url.as_deref(), Some("https://cdn/i.png"));
    }

    #[test]
    fn new_post_request_serializes_flat_fields() {
        let request = NewPostRequest {
            title: "Hello",
            content: "Body text",
            status: PostStatus::Draft.as_str(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["title"], "Hello");
        assert_eq!(value["content"], "Body text");
        assert_eq!(value["status"], "draft");
    }

    #[test]
    fn token_preview_masks_short_tokens() {
        let client = CmsClient::new("https://api.example.com".to_string(), "short".to_string());
        assert_eq!(client.token_preview(), "***");
    }

    #[test]
    fn token_preview_survives_multibyte_tokens() {
        // Nine two-byte chars: byte index 4 is not a char boundary.
        let client = CmsClient::new("https://api.example.com".to_string(), "ééééééééé".to_string());
        assert_eq!(client.token_preview(), "éééé...éééé");
    }
}
