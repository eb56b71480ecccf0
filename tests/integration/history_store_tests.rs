//! History persistence on the local file store

#[cfg(test)]
mod tests {
    use outpaint_rs::storage::{HISTORY_KEY, StorageError};
    use outpaint_rs::{HistoryEntry, HistoryRepository, HistoryStore, ImagePayload, KeyValueStore};
    use serde_json::Value;

    fn entry(id: i64, prompt: &str) -> HistoryEntry {
        HistoryEntry {
            id,
            prompt: prompt.to_string(),
            template: ImagePayload::new(vec![137, 80, 78, 71], "image/png"),
            result: "data:image/png;base64,iVBORw==".to_string(),
        }
    }

    #[tokio::test]
    async fn test_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![entry(20, "second"), entry(10, "first")];

        let store = KeyValueStore::local(dir.path()).await.unwrap();
        HistoryStore::new(store).save(&entries).await.unwrap();

        let reopened = HistoryStore::new(KeyValueStore::local(dir.path()).await.unwrap());
        assert_eq!(reopened.load().await, entries);
    }

    #[tokio::test]
    async fn test_persisted_layout() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeyValueStore::local(dir.path()).await.unwrap();
        HistoryStore::new(store.clone())
            .save(&[entry(1, "sunset")])
            .await
            .unwrap();

        let raw = std::fs::read(dir.path().join(format!("{}.json", HISTORY_KEY))).unwrap();
        let json: Value = serde_json::from_slice(&raw).unwrap();
        let first = &json[0];
        assert_eq!(first["id"], 1);
        assert_eq!(first["prompt"], "sunset");
        assert_eq!(first["template"]["mimeType"], "image/png");
        assert_eq!(first["template"]["data"], "iVBORw==");
        assert_eq!(first["result"], "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn test_corrupt_history_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(format!("{}.json", HISTORY_KEY)), b"{not json").unwrap();

        let history = HistoryStore::new(KeyValueStore::local(dir.path()).await.unwrap());
        assert!(history.load().await.is_empty());

        // The next save replaces the corrupt record
        history.save(&[entry(5, "fresh")]).await.unwrap();
        assert_eq!(history.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_custom_key_isolated() {
        let store = KeyValueStore::memory();
        let a = HistoryStore::with_key(store.clone(), "history_a");
        let b = HistoryStore::with_key(store, "history_b");

        a.save(&[entry(1, "a")]).await.unwrap();
        assert_eq!(a.load().await.len(), 1);
        assert!(b.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_key_fails_to_save() {
        let history = HistoryStore::with_key(KeyValueStore::memory(), "../outside");
        let err = history.save(&[entry(1, "x")]).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(history.load().await.is_empty());
    }
}
