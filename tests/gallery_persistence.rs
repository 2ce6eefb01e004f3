//! Gallery contents surviving an application restart

use lego_grid::{Error, Gallery, GalleryEntry, GalleryRepository, JsonFileRepository, SqliteRepository};
use std::path::Path;

type Opener = fn(&Path) -> Box<dyn GalleryRepository>;

fn json_repo(dir: &Path) -> Box<dyn GalleryRepository> {
    Box::new(JsonFileRepository::in_dir(dir))
}

fn sqlite_repo(dir: &Path) -> Box<dyn GalleryRepository> {
    Box::new(SqliteRepository::open(&dir.join("gallery.db")).unwrap())
}

const BACKENDS: [(&str, Opener); 2] = [("json", json_repo), ("sqlite", sqlite_repo)];

#[test]
fn test_restart_reproduces_order() {
    for (name, open) in BACKENDS {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut gallery = Gallery::new(open(dir.path()));
            gallery.load_all().unwrap();
            gallery.add("https://res.example/1.png", "2024-06-01T10:00:00.000Z").unwrap();
            gallery.add("https://res.example/2.png", "2024-06-01T11:00:00.000Z").unwrap();
            gallery.add("https://res.example/3.png", "2024-06-01T12:00:00.000Z").unwrap();
        }

        let mut restarted = Gallery::new(open(dir.path()));
        assert_eq!(restarted.load_all().unwrap(), 3, "backend {}", name);
        let urls: Vec<_> = restarted.entries().iter().map(|e| e.url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://res.example/3.png",
                "https://res.example/2.png",
                "https://res.example/1.png"
            ],
            "backend {}",
            name
        );
    }
}

#[test]
fn test_remove_survives_restart() {
    for (name, open) in BACKENDS {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut gallery = Gallery::new(open(dir.path()));
            gallery.add("https://res.example/keep.png", "2024-06-01T10:00:00.000Z").unwrap();
            gallery.add("https://res.example/drop.png", "2024-06-01T11:00:00.000Z").unwrap();
            assert_eq!(gallery.remove("https://res.example/drop.png").unwrap(), 1);
        }

        let mut restarted = Gallery::new(open(dir.path()));
        restarted.load_all().unwrap();
        assert_eq!(
            restarted.entries(),
            [GalleryEntry::new("https://res.example/keep.png", "2024-06-01T10:00:00.000Z")],
            "backend {}",
            name
        );
    }
}

#[test]
fn test_fresh_install_is_empty() {
    for (_, open) in BACKENDS {
        let dir = tempfile::tempdir().unwrap();
        let mut gallery = Gallery::new(open(dir.path()));
        assert_eq!(gallery.load_all().unwrap(), 0);
    }
}

#[test]
fn test_corrupt_json_starts_empty_without_losing_data() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("legoGallery.json");
    std::fs::write(&file, "[{\"url\": \"https://res.example/1.png\"").unwrap();

    let mut gallery = Gallery::new(json_repo(dir.path()));
    assert!(matches!(gallery.load_all(), Err(Error::Storage(_))));
    assert!(gallery.is_empty());

    // New saves go to a fresh file; the unreadable one is kept aside
    gallery.add("https://res.example/2.png", "2024-06-02T10:00:00.000Z").unwrap();
    assert!(dir.path().join("legoGallery.json.corrupt").exists());

    let mut restarted = Gallery::new(json_repo(dir.path()));
    assert_eq!(restarted.load_all().unwrap(), 1);
}
