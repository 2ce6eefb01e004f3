//! Image host client
//!
//! Uploads go out as a single unsigned multipart POST: the PNG in a `file`
//! field plus the `upload_preset` credential. The host answers with JSON
//! carrying the public `secure_url`. There is no retry; any failure comes
//! back as one error for the status line.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::{Error, Result};

/// Endpoint and credential for unsigned uploads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub endpoint: String,
    pub upload_preset: String,
}

impl From<&AppConfig> for UploadConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            endpoint: config.upload_endpoint.clone(),
            upload_preset: config.upload_preset.clone(),
        }
    }
}

/// The part of the host's reply we care about
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

/// Cheap to clone; clones share one connection pool
#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    config: UploadConfig,
}

impl UploadClient {
    pub fn new(config: UploadConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Underlying HTTP client, shared with thumbnail downloads
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Upload PNG bytes and return the public https url
    pub async fn upload(&self, png: Vec<u8>) -> Result<String> {
        log::info!(
            "☁️  Uploading {} bytes to {}",
            png.len(),
            self.config.endpoint
        );

        let file = Part::bytes(png)
            .file_name("grid.png")
            .mime_str("image/png")?;
        let form = Form::new()
            .part("file", file)
            .text("upload_preset", self.config.upload_preset.clone());

        let response = self
            .http
            .post(&self.config.endpoint)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body: UploadResponse = response.json().await?;
        match body.secure_url {
            Some(url) if !url.is_empty() => {
                log::info!("✅ Uploaded: {}", url);
                Ok(url)
            }
            _ => Err(Error::Upload("response has no secure_url".to_string())),
        }
    }
}
