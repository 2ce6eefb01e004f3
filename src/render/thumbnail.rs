use image::imageops::FilterType;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::APP_DIR;
use crate::error::{Error, Result};

/// Size of cached thumbnails (square)
pub const THUMBNAIL_SIZE: u32 = 256;

/// Local cache of gallery thumbnails, keyed by image url
#[derive(Debug, Clone)]
pub struct ThumbnailCache {
    dir: PathBuf,
}

impl ThumbnailCache {
    /// Cache under ~/.cache/lego-grid/thumbnails on Linux
    pub fn default_location() -> Self {
        let mut path = dirs_next::cache_dir()
            .or_else(dirs_next::home_dir)
            .unwrap_or_else(std::env::temp_dir);

        path.push(APP_DIR);
        path.push("thumbnails");
        Self::new(path)
    }

    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Expected thumbnail path for a url (doesn't check it exists).
    /// Keys are the first 16 bytes of the url's SHA-256, so they stay put
    /// across builds.
    pub fn path_for(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{}.png", hex::encode(&digest[..16])))
    }

    /// Cached thumbnail for a url, if one is on disk
    pub fn get(&self, url: &str) -> Option<PathBuf> {
        let path = self.path_for(url);
        path.exists().then_some(path)
    }

    /// Decode image bytes, shrink to thumbnail size and write to the cache
    pub fn store(&self, url: &str, bytes: &[u8]) -> Result<PathBuf> {
        let img = image::load_from_memory(bytes)?;

        // Nearest keeps pixel-art edges crisp
        let thumbnail = if img.width() > THUMBNAIL_SIZE || img.height() > THUMBNAIL_SIZE {
            img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Nearest)
        } else {
            img
        };

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(url);
        thumbnail.save(&path)?;

        log::debug!("📸 Cached thumbnail: {}", path.display());
        Ok(path)
    }

    /// Download an image and cache its thumbnail
    pub async fn fetch(&self, client: &reqwest::Client, url: &str) -> Result<PathBuf> {
        let response = client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        self.store_async(url.to_string(), bytes.to_vec()).await
    }

    /// [`ThumbnailCache::store`] on a blocking worker
    pub async fn store_async(&self, url: String, bytes: Vec<u8>) -> Result<PathBuf> {
        let cache = self.clone();
        tokio::task::spawn_blocking(move || cache.store(&url, &bytes))
            .await
            .map_err(|e| Error::Task(e.to_string()))?
    }

    /// Drop the cached thumbnail for a url, if any
    pub fn evict(&self, url: &str) {
        if let Some(path) = self.get(url) {
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("⚠️  Could not remove thumbnail {}: {}", path.display(), e);
            }
        }
    }
}
