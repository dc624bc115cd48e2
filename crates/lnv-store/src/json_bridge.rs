use std::fs;
use std::path::Path;

use lnv_core::CrawlHistory;

use crate::error::{Result, StoreError};
use crate::store::Store;

impl Store {
    /// Merge a browser-format history export (`{"Name": {"rating", "visitedAt"}}`)
    /// into this store. Existing visits keep their first timestamp.
    pub fn import_history_json_str(&self, json: &str) -> Result<usize> {
        let incoming: CrawlHistory = serde_json::from_str(json)?;
        let count = incoming.len();
        let mut history = self.load_history()?;
        history.merge(incoming);
        self.save_history(&history)?;
        tracing::info!(count, "imported crawl history");
        Ok(count)
    }

    pub fn import_history_json_file(&self, path: &Path) -> Result<usize> {
        let json = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        self.import_history_json_str(&json)
    }

    pub fn export_history_json_string(&self) -> Result<String> {
        let history = self.load_history()?;
        Ok(serde_json::to_string_pretty(&history)?)
    }

    pub fn export_history_json_file(&self, path: &Path) -> Result<()> {
        let json = self.export_history_json_string()?;
        fs::write(path, json).map_err(|e| StoreError::io(path, e))?;
        tracing::info!(path = %path.display(), "exported crawl history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lnv_core::Rating;

    #[test]
    fn test_import_browser_export() {
        let store = Store::open_in_memory().unwrap();
        let json = r#"{
            "Lantern": {"rating": 1, "visitedAt": "2026-02-21T04:00:00.000Z"},
            "Pulse": {"rating": -1, "visitedAt": "2026-02-22T05:00:00.000Z"}
        }"#;
        assert_eq!(store.import_history_json_str(json).unwrap(), 2);

        let history = store.load_history().unwrap();
        assert_eq!(history.rating("Lantern"), Rating::Up);
        assert_eq!(history.rating("Pulse"), Rating::Down);
    }

    #[test]
    fn test_import_merges() {
        let store = Store::open_in_memory().unwrap();
        let mut history = CrawlHistory::new();
        history.mark_visited("Lantern", Rating::Neutral, "2026-01-01T00:00:00Z");
        store.save_history(&history).unwrap();

        let json = r#"{"Lantern": {"rating": 1, "visitedAt": "2026-03-01T00:00:00Z"}}"#;
        store.import_history_json_str(json).unwrap();
        let history = store.load_history().unwrap();
        assert_eq!(history.visited_at("Lantern"), Some("2026-01-01T00:00:00Z"));
        assert_eq!(history.rating("Lantern"), Rating::Up);
    }

    #[test]
    fn test_export_import_roundtrip() {
        let source = Store::open_in_memory().unwrap();
        let mut history = CrawlHistory::new();
        history.mark_visited("Lantern", Rating::Up, "2026-02-21T04:00:00Z");
        history.mark_visited("Café Ñ", Rating::Neutral, "2026-02-21T05:00:00Z");
        source.save_history(&history).unwrap();

        let json = source.export_history_json_string().unwrap();
        let target = Store::open_in_memory().unwrap();
        target.import_history_json_str(&json).unwrap();
        assert_eq!(target.load_history().unwrap(), history);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join("lnv-store-test-json");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("history.json");

        let store = Store::open_in_memory().unwrap();
        let mut history = CrawlHistory::new();
        history.mark_visited("Lantern", Rating::Down, "2026-02-21T04:00:00Z");
        store.save_history(&history).unwrap();
        store.export_history_json_file(&path).unwrap();

        let other = Store::open_in_memory().unwrap();
        assert_eq!(other.import_history_json_file(&path).unwrap(), 1);
        assert_eq!(other.load_history().unwrap(), history);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let store = Store::open_in_memory().unwrap();
        assert!(matches!(
            store.import_history_json_str("[1, 2]"),
            Err(StoreError::Json(_))
        ));
        assert!(matches!(
            store.import_history_json_file(Path::new("/nonexistent/lnv.json")),
            Err(StoreError::Io { .. })
        ));
    }
}
