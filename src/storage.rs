use crate::errors::AppError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{collections::BTreeMap, env, marker::PhantomData, path::Path, path::PathBuf};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, error, warn};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

/// Typed name of a stored value.
#[derive(Debug)]
pub struct Key<V> {
    name: &'static str,
    _value: PhantomData<fn() -> V>,
}

impl<V> Key<V> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// One JSON document of key -> value, cached in memory and rewritten in full
/// on every write.
#[derive(Debug)]
pub struct KvStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl KvStore {
    pub async fn open(path: PathBuf) -> Self {
        let entries = load_entries(&path).await;
        debug!(path = %path.display(), keys = entries.len(), "store opened");
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored value, or `default` when the key is missing or its
    /// value no longer matches `V`.
    pub fn read<V: DeserializeOwned>(&self, key: &Key<V>, default: V) -> V {
        let Some(value) = self.entries.get(key.name()) else {
            return default;
        };

        match serde_json::from_value(value.clone()) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("stored value for {} is malformed: {err}", key.name());
                default
            }
        }
    }

    pub fn get<V: DeserializeOwned + Default>(&self, key: &Key<V>) -> V {
        self.read(key, V::default())
    }

    pub async fn write<V: Serialize>(&mut self, key: &Key<V>, value: &V) -> Result<(), AppError> {
        let value = serde_json::to_value(value).map_err(AppError::internal)?;
        let mut next = self.entries.clone();
        next.insert(key.name().to_string(), value);

        persist_entries(&self.path, &next).await?;
        self.entries = next;
        Ok(())
    }
}

async fn load_entries(path: &Path) -> BTreeMap<String, Value> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse data file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read data file: {err}");
            BTreeMap::new()
        }
    }
}

/// Writes a sibling `.tmp` file, syncs it, then renames it over the document.
async fn persist_entries(path: &Path, entries: &BTreeMap<String, Value>) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(entries).map_err(AppError::internal)?;

    let temp = path.with_extension("tmp");
    let mut file = fs::File::create(&temp).await?;
    file.write_all(&payload).await?;
    file.sync_all().await?;
    drop(file);
    fs::rename(&temp, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        label: String,
        total: u32,
    }

    const SAMPLE: Key<Sample> = Key::new("sample");

    fn unique_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("intambwe_store_{tag}_{}_{}.json", std::process::id(), nanos));
        path
    }

    #[tokio::test]
    async fn missing_document_reads_defaults() {
        let store = KvStore::open(unique_path("missing")).await;
        assert_eq!(store.get(&SAMPLE), Sample::default());
        assert_eq!(store.read(&Key::<u32>::new("other"), 7), 7);
    }

    #[tokio::test]
    async fn written_values_survive_reopen() {
        let path = unique_path("reopen");
        let mut store = KvStore::open(path.clone()).await;
        let sample = Sample {
            label: "steps".into(),
            total: 3,
        };
        store.write(&SAMPLE, &sample).await.unwrap();

        let reopened = KvStore::open(path.clone()).await;
        assert_eq!(reopened.get(&SAMPLE), sample);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn corrupt_document_falls_back_to_empty() {
        let path = unique_path("corrupt");
        std::fs::write(&path, b"{not json").unwrap();

        let store = KvStore::open(path.clone()).await;
        assert_eq!(store.get(&SAMPLE), Sample::default());
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn mismatched_value_falls_back_to_default() {
        let path = unique_path("mismatch");
        std::fs::write(&path, br#"{"sample": [1, 2, 3]}"#).unwrap();

        let store = KvStore::open(path.clone()).await;
        let fallback = Sample {
            label: "fallback".into(),
            total: 1,
        };
        assert_eq!(store.read(&SAMPLE, fallback.clone()), fallback);
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn failed_write_leaves_state_unchanged() {
        let mut path = unique_path("missing_dir");
        path.set_extension("");
        path.push("nested");
        path.push("state.json");
        let mut store = KvStore::open(path.clone()).await;

        let sample = Sample {
            label: "lost".into(),
            total: 5,
        };
        assert!(store.write(&SAMPLE, &sample).await.is_err());
        assert_eq!(store.get(&SAMPLE), Sample::default());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn write_replaces_document_without_leftover_temp_file() {
        let path = unique_path("atomic");
        let mut store = KvStore::open(path.clone()).await;
        store.write(&Key::<u32>::new("first"), &1).await.unwrap();
        store.write(&Key::<u32>::new("second"), &2).await.unwrap();

        let document: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(document, serde_json::json!({ "first": 1, "second": 2 }));
        assert!(!path.with_extension("tmp").exists());
        let _ = std::fs::remove_file(path);
    }
}
