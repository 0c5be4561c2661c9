//! Profile Store — a JSON key-value file holding the single profile record.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::profile::Profile;

/// Key the profile record is stored under.
pub const PROFILE_KEY: &str = "smartAutofillProfile";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt store file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cheap to clone; all clones share the same file and write lock.
#[derive(Clone)]
pub struct ProfileStore {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored profile. A missing file or key, or a record that is
    /// not an object (`null` included), yields an empty profile.
    pub async fn load(&self) -> Result<Profile, StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        match entries.remove(PROFILE_KEY) {
            Some(value @ Value::Object(_)) => Ok(serde_json::from_value(value)?),
            Some(other) => {
                debug!("Ignoring non-object profile record: {other}");
                Ok(Profile::default())
            }
            None => Ok(Profile::default()),
        }
    }

    pub async fn save(&self, profile: &Profile) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.insert(PROFILE_KEY.to_string(), serde_json::to_value(profile)?);
        self.write_entries(&entries).await?;
        info!("Profile saved to {}", self.path.display());
        Ok(())
    }

    /// Removes the profile record, leaving any other keys in place.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.remove(PROFILE_KEY).is_some() {
            self.write_entries(&entries).await?;
            info!("Profile cleared");
        }
        Ok(())
    }

    async fn read_entries(&self) -> Result<Map<String, Value>, StoreError> {
        match tokio::fs::read(self.path.as_path()).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(Map::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Store file {} not found; starting empty", self.path.display());
                Ok(Map::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, self.path.as_path()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ProfileStore {
        ProfileStore::new(dir.path().join("nested").join("profile.json"))
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile = store_in(&dir).load().await.unwrap();
        assert!(profile.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let profile = Profile {
            first_name: "Ada".to_string(),
            dob: "1990-07-15".to_string(),
            ..Default::default()
        };
        store.save(&profile).await.unwrap();

        assert_eq!(store.load().await.unwrap(), profile);

        let raw: Value =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw[PROFILE_KEY]["firstName"], "Ada");
    }

    #[tokio::test]
    async fn test_clear_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(
            store.path(),
            r#"{"theme": "dark", "smartAutofillProfile": {"email": "a@b.io"}}"#,
        )
        .unwrap();

        assert_eq!(store.load().await.unwrap().email, "a@b.io");
        store.clear().await.unwrap();

        assert!(store.load().await.unwrap().is_empty());
        let raw: Value =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
    }

    #[tokio::test]
    async fn test_null_record_is_empty_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), r#"{"smartAutofillProfile": null}"#).unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_loose_attribute_types_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(
            store.path(),
            r#"{"smartAutofillProfile": {"email": null, "zip": 12345, "city": "Paris"}}"#,
        )
        .unwrap();

        let profile = store.load().await.unwrap();
        assert_eq!(profile.email, "");
        assert_eq!(profile.zip, "12345");
        assert_eq!(profile.city, "Paris");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load().await, Err(StoreError::Json(_))));
    }
}
