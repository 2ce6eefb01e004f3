//! Gallery store
//!
//! Pairs a [`GalleryRepository`] with the in-memory list the UI renders.
//! Every mutation goes to the repository first and only touches the
//! in-memory list once the write succeeded, so the on-screen gallery and
//! the persisted one are equal whenever a call returns.

use super::data::GalleryEntry;
use super::library::GalleryRepository;
use crate::error::Result;

pub struct Gallery {
    repo: Box<dyn GalleryRepository>,
    entries: Vec<GalleryEntry>,
}

impl Gallery {
    /// Wrap a repository. Nothing is read until [`Gallery::load_all`].
    pub fn new(repo: Box<dyn GalleryRepository>) -> Self {
        Self {
            repo,
            entries: Vec::new(),
        }
    }

    /// Entries as currently shown, newest first
    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuild the in-memory list from storage, keeping stored order.
    ///
    /// On error the list is left empty and the error is returned so the
    /// caller can report it.
    pub fn load_all(&mut self) -> Result<usize> {
        self.entries.clear();
        self.entries = self.repo.load()?;
        log::info!(
            "🖼️  Loaded {} gallery entries from {}",
            self.entries.len(),
            self.repo.describe()
        );
        Ok(self.entries.len())
    }

    /// Record a new creation at the front of the gallery
    pub fn add(&mut self, url: impl Into<String>, date: impl Into<String>) -> Result<&GalleryEntry> {
        let entry = GalleryEntry::new(url, date);
        self.repo.prepend(&entry)?;
        log::info!("➕ Gallery entry added: {}", entry.url);
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    /// Delete every entry with this url. Returns how many were removed.
    pub fn remove(&mut self, url: &str) -> Result<usize> {
        let removed = self.repo.remove(url)?;
        self.entries.retain(|e| e.url != url);
        log::info!("🗑️  Removed {} gallery entries for {}", removed, url);
        Ok(removed)
    }

    /// Entries as the repository currently holds them
    pub fn persisted(&self) -> Result<Vec<GalleryEntry>> {
        self.repo.load()
    }
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("repo", &self.repo.describe())
            .field("entries", &self.entries.len())
            .finish()
    }
}
