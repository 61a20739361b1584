//! Persistent token storage backends.
//!
//! Every backend is infallible from the caller's point of view: when storage
//! is unavailable (no home directory, locked keychain, no persistent context
//! at all) reads return `None` and writes are dropped with a warning.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use hire_config::{AuthConfig, StorageBackend};
use hire_core::{SessionKind, TokenKind};

/// Namespaced key for one token role of one session kind.
///
/// Four distinct keys exist: `employer_access_token`, `employer_refresh_token`,
/// `candidate_access_token`, `candidate_refresh_token`.
#[must_use]
pub fn storage_key(kind: SessionKind, role: TokenKind) -> String {
    format!("{kind}_{role}_token")
}

/// Key/value persistence for token strings, addressed by session kind and role.
pub trait SessionStore: Send + Sync {
    fn get(&self, kind: SessionKind, role: TokenKind) -> Option<String>;
    fn set(&self, kind: SessionKind, role: TokenKind, value: &str);
    fn remove(&self, kind: SessionKind, role: TokenKind);
    /// Short backend label for status output.
    fn backend_name(&self) -> &'static str;
}

/// Open the backend selected in configuration.
#[must_use]
pub fn from_config(config: &AuthConfig) -> Arc<dyn SessionStore> {
    match config.storage {
        StorageBackend::Keyring => Arc::new(KeyringStore::new(&config.keyring_service)),
        StorageBackend::File => match config.credentials_path() {
            Some(path) => Arc::new(FileStore::new(path)),
            None => {
                tracing::warn!("home directory not found; tokens will not be persisted");
                Arc::new(UnavailableStore)
            }
        },
        StorageBackend::Memory => Arc::new(MemoryStore::default()),
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(SessionKind, TokenKind), String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, kind: SessionKind, role: TokenKind) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(kind, role))
            .cloned()
    }

    fn set(&self, kind: SessionKind, role: TokenKind, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((kind, role), value.to_string());
    }

    fn remove(&self, kind: SessionKind, role: TokenKind) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(kind, role));
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

// ---------------------------------------------------------------------------
// UnavailableStore
// ---------------------------------------------------------------------------

/// Stand-in for a context with no persistent storage at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn get(&self, _kind: SessionKind, _role: TokenKind) -> Option<String> {
        None
    }

    fn set(&self, kind: SessionKind, role: TokenKind, _value: &str) {
        tracing::debug!(%kind, %role, "storage unavailable; token not persisted");
    }

    fn remove(&self, _kind: SessionKind, _role: TokenKind) {}

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// JSON object of namespaced keys in a single credentials file (mode 0600).
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> BTreeMap<String, String> {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        if content.trim().is_empty() {
            return BTreeMap::new();
        }
        serde_json::from_str(&content).unwrap_or_else(|error| {
            tracing::warn!(
                %error,
                path = %self.path.display(),
                "credentials file is corrupt; ignoring",
            );
            BTreeMap::new()
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let json = serde_json::to_string_pretty(entries).map_err(std::io::Error::other)?;
        fs::write(&self.path, json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut BTreeMap<String, String>)) {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries();
        apply(&mut entries);
        if let Err(error) = self.write_entries(&entries) {
            tracing::warn!(%error, path = %self.path.display(), "failed to write credentials file");
        }
    }
}

impl SessionStore for FileStore {
    fn get(&self, kind: SessionKind, role: TokenKind) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read_entries()
            .remove(&storage_key(kind, role))
            .filter(|token| !token.trim().is_empty())
    }

    fn set(&self, kind: SessionKind, role: TokenKind, value: &str) {
        self.update(|entries| {
            entries.insert(storage_key(kind, role), value.to_string());
        });
    }

    fn remove(&self, kind: SessionKind, role: TokenKind) {
        self.update(|entries| {
            entries.remove(&storage_key(kind, role));
        });
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}

// ---------------------------------------------------------------------------
// KeyringStore
// ---------------------------------------------------------------------------

/// OS keychain, one entry per namespaced key under a single service name.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, kind: SessionKind, role: TokenKind) -> Option<keyring::Entry> {
        keyring::Entry::new(&self.service, &storage_key(kind, role))
            .inspect_err(|error| tracing::warn!(%error, "keyring unavailable"))
            .ok()
    }
}

/// `true` once the entry is gone. An entry that never existed counts as removed.
fn removed(result: keyring::Result<()>, kind: SessionKind, role: TokenKind) -> bool {
    match result {
        Ok(()) | Err(keyring::Error::NoEntry) => true,
        Err(error) => {
            tracing::warn!(%error, %kind, %role, "keyring delete failed; token left behind");
            false
        }
    }
}

impl SessionStore for KeyringStore {
    fn get(&self, kind: SessionKind, role: TokenKind) -> Option<String> {
        self.entry(kind, role)?
            .get_password()
            .ok()
            .filter(|token| !token.is_empty())
    }

    fn set(&self, kind: SessionKind, role: TokenKind, value: &str) {
        if let Some(entry) = self.entry(kind, role)
            && let Err(error) = entry.set_password(value)
        {
            tracing::warn!(%error, %kind, %role, "keyring store failed");
        }
    }

    fn remove(&self, kind: SessionKind, role: TokenKind) {
        if let Some(entry) = self.entry(kind, role) {
            removed(entry.delete_credential(), kind, role);
        }
    }

    fn backend_name(&self) -> &'static str {
        "keyring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_are_distinct_per_kind_and_role() {
        let mut keys: Vec<String> = SessionKind::ALL
            .iter()
            .flat_map(|&kind| {
                [TokenKind::Access, TokenKind::Refresh].map(|role| storage_key(kind, role))
            })
            .collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 4);
        assert!(keys.contains(&"employer_access_token".to_string()));
        assert!(keys.contains(&"candidate_refresh_token".to_string()));
    }

    #[test]
    fn keyring_removal_tolerates_only_missing_entries() {
        let (kind, role) = (SessionKind::Candidate, TokenKind::Refresh);
        assert!(removed(Ok(()), kind, role));
        assert!(removed(Err(keyring::Error::NoEntry), kind, role));
        assert!(!removed(Err(keyring::Error::PlatformFailure("locked".into())), kind, role));
        let invalid = keyring::Error::Invalid("service".into(), "empty".into());
        assert!(!removed(Err(invalid), kind, role));
    }

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::default();
        store.set(SessionKind::Employer, TokenKind::Access, "a");
        assert_eq!(
            store.get(SessionKind::Employer, TokenKind::Access).as_deref(),
            Some("a")
        );
        assert!(store.get(SessionKind::Candidate, TokenKind::Access).is_none());
        store.remove(SessionKind::Employer, TokenKind::Access);
        assert!(store.get(SessionKind::Employer, TokenKind::Access).is_none());
    }

    #[test]
    fn unavailable_store_never_returns_values() {
        let store = UnavailableStore;
        store.set(SessionKind::Employer, TokenKind::Access, "a");
        assert!(store.get(SessionKind::Employer, TokenKind::Access).is_none());
        store.remove(SessionKind::Employer, TokenKind::Access);
    }

    #[test]
    fn file_store_round_trip_and_permissions() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("nested").join("credentials.json");
        let store = FileStore::new(&path);

        store.set(SessionKind::Candidate, TokenKind::Refresh, "r1");
        store.set(SessionKind::Employer, TokenKind::Access, "a1");
        assert_eq!(
            store.get(SessionKind::Candidate, TokenKind::Refresh).as_deref(),
            Some("r1")
        );
        assert_eq!(
            store.get(SessionKind::Employer, TokenKind::Access).as_deref(),
            Some("a1")
        );

        let raw: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(raw.get("candidate_refresh_token").map(String::as_str), Some("r1"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
            assert_eq!(mode, 0o600, "credentials file should be 0600");
        }
    }

    #[test]
    fn file_store_deletes_file_when_empty() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials.json");
        let store = FileStore::new(&path);

        store.set(SessionKind::Employer, TokenKind::Access, "a1");
        assert!(path.exists());
        store.remove(SessionKind::Employer, TokenKind::Access);
        assert!(!path.exists());
    }

    #[test]
    fn file_store_ignores_corrupt_and_blank_files() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("credentials.json");
        fs::write(&path, "{not json").expect("write");
        let store = FileStore::new(&path);
        assert!(store.get(SessionKind::Employer, TokenKind::Access).is_none());

        fs::write(&path, r#"{"employer_access_token":"   "}"#).expect("write");
        assert!(store.get(SessionKind::Employer, TokenKind::Access).is_none());
    }

    #[test]
    fn file_store_missing_file_reads_as_empty() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = FileStore::new(tmp.path().join("absent.json"));
        assert!(store.get(SessionKind::Candidate, TokenKind::Access).is_none());
        store.remove(SessionKind::Candidate, TokenKind::Access);
    }

    #[test]
    fn from_config_selects_backend() {
        let memory = AuthConfig {
            storage: StorageBackend::Memory,
            ..Default::default()
        };
        assert_eq!(from_config(&memory).backend_name(), "memory");

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let file = AuthConfig {
            storage: StorageBackend::File,
            credentials_path: Some(tmp.path().join("c.json")),
            ..Default::default()
        };
        assert_eq!(from_config(&file).backend_name(), "file");
    }
}
