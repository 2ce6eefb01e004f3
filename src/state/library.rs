use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};

use super::data::GalleryEntry;
use crate::error::{Error, Result};

/// Name of the durable key (file stem) the JSON backend stores the gallery under
pub const GALLERY_KEY: &str = "legoGallery";

/// Persistence interface for the gallery.
///
/// Implementations hold the ordered list of entries, newest first. Only
/// `load` and `save` are required; `prepend` and `remove` default to a
/// read-modify-write of the whole list, which backends with finer-grained
/// storage can override.
pub trait GalleryRepository {
    /// Read the full list, newest first. A backend with nothing stored yet
    /// returns an empty list, never an error.
    fn load(&self) -> Result<Vec<GalleryEntry>>;

    /// Replace the full list
    fn save(&mut self, entries: &[GalleryEntry]) -> Result<()>;

    /// Insert a new entry at the front
    fn prepend(&mut self, entry: &GalleryEntry) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(0, entry.clone());
        self.save(&entries)
    }

    /// Drop every entry whose url matches exactly. Returns how many went.
    fn remove(&mut self, url: &str) -> Result<usize> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|e| e.url != url);
        let removed = before - entries.len();
        if removed > 0 {
            self.save(&entries)?;
        }
        Ok(removed)
    }

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// The gallery as one JSON array in one file.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Store the gallery at `<dir>/legoGallery.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{}.json", GALLERY_KEY)))
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move an unreadable gallery file out of the way so it is never
    /// overwritten by the next save.
    fn quarantine(&self) -> PathBuf {
        let mut target = self.path.clone().into_os_string();
        target.push(".corrupt");
        let target = PathBuf::from(target);
        if let Err(e) = fs::rename(&self.path, &target) {
            log::warn!("⚠️  Could not move corrupt gallery aside: {}", e);
        }
        target
    }
}

impl GalleryRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<GalleryEntry>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&json) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let moved_to = self.quarantine();
                log::warn!(
                    "⚠️  Gallery file {} is not valid JSON ({}); moved to {}",
                    self.path.display(),
                    e,
                    moved_to.display()
                );
                Err(Error::Storage(format!(
                    "saved gallery was unreadable and has been moved to {}",
                    moved_to.display()
                )))
            }
        }
    }

    fn save(&mut self, entries: &[GalleryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write then rename, so a crash never leaves half an array behind
        let json = serde_json::to_string(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// The gallery as rows in a SQLite table.
///
/// Newest first is insertion order reversed: the row with the highest id
/// is the most recent save.
pub struct SqliteRepository {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteRepository {
    /// Open or create the database file
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        log::info!("📁 Gallery database at: {}", db_path.display());

        let repo = Self {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        repo.init_schema()?;
        Ok(repo)
    }

    /// Throwaway database, mostly for tests
    pub fn open_in_memory() -> Result<Self> {
        let repo = Self {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        repo.init_schema()?;
        Ok(repo)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS gallery (
                id      INTEGER PRIMARY KEY AUTOINCREMENT,
                url     TEXT NOT NULL,
                date    TEXT NOT NULL
            )",
            [],
        )?;

        // Deletion looks entries up by url
        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_gallery_url ON gallery(url)",
            [],
        )?;

        Ok(())
    }
}

impl GalleryRepository for SqliteRepository {
    fn load(&self) -> Result<Vec<GalleryEntry>> {
        let mut stmt = self
            .conn
            .prepare("SELECT url, date FROM gallery ORDER BY id DESC")?;

        let rows = stmt.query_map([], |row| {
            Ok(GalleryEntry {
                url: row.get(0)?,
                date: row.get(1)?,
            })
        })?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }
        Ok(entries)
    }

    fn save(&mut self, entries: &[GalleryEntry]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM gallery", [])?;
        // Oldest first, so the newest entry ends up with the highest id
        for entry in entries.iter().rev() {
            tx.execute(
                "INSERT INTO gallery (url, date) VALUES (?1, ?2)",
                params![entry.url, entry.date],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn prepend(&mut self, entry: &GalleryEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO gallery (url, date) VALUES (?1, ?2)",
            params![entry.url, entry.date],
        )?;
        Ok(())
    }

    fn remove(&mut self, url: &str) -> Result<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM gallery WHERE url = ?1", params![url])?;
        Ok(removed)
    }

    fn describe(&self) -> String {
        match &self.db_path {
            Some(path) => path.display().to_string(),
            None => ":memory:".to_string(),
        }
    }
}

/// In-process gallery storage
#[derive(Debug, Default)]
pub struct MemoryRepository {
    entries: Vec<GalleryEntry>,
    fail_writes: bool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<GalleryEntry>) -> Self {
        Self {
            entries,
            fail_writes: false,
        }
    }

    /// A repository whose writes always fail, for exercising error paths
    pub fn read_only(entries: Vec<GalleryEntry>) -> Self {
        Self {
            entries,
            fail_writes: true,
        }
    }
}

impl GalleryRepository for MemoryRepository {
    fn load(&self) -> Result<Vec<GalleryEntry>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[GalleryEntry]) -> Result<()> {
        if self.fail_writes {
            return Err(Error::Storage("storage is read-only".to_string()));
        }
        self.entries = entries.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: u32) -> GalleryEntry {
        GalleryEntry::new(
            format!("https://img.example/{}.png", n),
            format!("2024-05-0{}T10:00:00.000Z", n),
        )
    }

    fn exercise(repo: &mut dyn GalleryRepository) {
        assert!(repo.load().unwrap().is_empty());

        repo.prepend(&entry(1)).unwrap();
        repo.prepend(&entry(2)).unwrap();
        repo.prepend(&entry(3)).unwrap();
        assert_eq!(repo.load().unwrap(), vec![entry(3), entry(2), entry(1)]);

        assert_eq!(repo.remove(&entry(2).url).unwrap(), 1);
        assert_eq!(repo.load().unwrap(), vec![entry(3), entry(1)]);

        assert_eq!(repo.remove("https://img.example/missing.png").unwrap(), 0);

        repo.save(&[entry(1), entry(3)]).unwrap();
        assert_eq!(repo.load().unwrap(), vec![entry(1), entry(3)]);
    }

    #[test]
    fn test_memory_repository() {
        exercise(&mut MemoryRepository::new());
    }

    #[test]
    fn test_json_repository() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = JsonFileRepository::in_dir(dir.path());
        exercise(&mut repo);
        assert!(repo.path().ends_with("legoGallery.json"));
    }

    #[test]
    fn test_sqlite_repository() {
        exercise(&mut SqliteRepository::open_in_memory().unwrap());
    }

    #[test]
    fn test_remove_drops_every_duplicate() {
        let mut repo = SqliteRepository::open_in_memory().unwrap();
        repo.prepend(&entry(1)).unwrap();
        repo.prepend(&entry(2)).unwrap();
        repo.prepend(&entry(1)).unwrap();
        assert_eq!(repo.remove(&entry(1).url).unwrap(), 2);
        assert_eq!(repo.load().unwrap(), vec![entry(2)]);
    }

    #[test]
    fn test_json_layout_is_plain_array() {
        let dir = tempfile::tempdir().unwrap();
        let mut repo = JsonFileRepository::in_dir(dir.path());
        repo.prepend(&GalleryEntry::new("https://a", "2024-01-01T00:00:00.000Z"))
            .unwrap();
        let raw = fs::read_to_string(repo.path()).unwrap();
        assert_eq!(raw, r#"[{"url":"https://a","date":"2024-01-01T00:00:00.000Z"}]"#);
    }

    #[test]
    fn test_corrupt_json_is_moved_aside() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::in_dir(dir.path());
        fs::write(repo.path(), "{ not json").unwrap();

        assert!(matches!(repo.load(), Err(Error::Storage(_))));
        assert!(!repo.path().exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("legoGallery.json.corrupt")).unwrap(),
            "{ not json"
        );

        // Afterwards the store reads as empty
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_read_only_memory_repository_rejects_writes() {
        let mut repo = MemoryRepository::read_only(vec![entry(1)]);
        assert!(repo.prepend(&entry(2)).is_err());
        assert_eq!(repo.load().unwrap(), vec![entry(1)]);
    }
}
