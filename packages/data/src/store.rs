//! Last-good in-memory dataset store.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use indicacoes_data_models::DashboardData;

use crate::{DataError, load_dashboard_file};

struct StoreInner {
    current: Option<Arc<DashboardData>>,
    generation: u64,
}

/// Holds the most recently loaded dataset and replaces it atomically on
/// reload.
///
/// A failed reload never discards the previous dataset: callers keep
/// serving the stale copy until a reload succeeds. Each successful reload
/// bumps a generation counter, which downstream caches use as the dataset's
/// identity. Concurrent reloads are not sequenced; the last write wins.
pub struct DatasetStore {
    path: PathBuf,
    inner: RwLock<StoreInner>,
}

impl DatasetStore {
    /// Creates an empty store that loads from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: RwLock::new(StoreInner {
                current: None,
                generation: 0,
            }),
        }
    }

    /// Path of the backing dataset file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-reads the dataset file and replaces the stored copy on success.
    ///
    /// # Errors
    ///
    /// Returns the load error on failure; the previously stored dataset is
    /// retained unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn reload(&self) -> Result<Arc<DashboardData>, DataError> {
        // Read and parse outside the lock; a concurrent reload may race and
        // the later write wins.
        match load_dashboard_file(&self.path) {
            Ok(data) => {
                let data = Arc::new(data);
                let mut inner = self.inner.write().expect("dataset store lock poisoned");
                inner.current = Some(Arc::clone(&data));
                inner.generation += 1;
                log::info!(
                    "Dataset reloaded (generation {}, {} indicações)",
                    inner.generation,
                    data.metadata.total_indicacoes
                );
                Ok(data)
            }
            Err(e) => {
                log::error!("Dataset reload failed, keeping previous copy: {e}");
                Err(e)
            }
        }
    }

    /// Returns the current generation and dataset, or `None` when no load
    /// has succeeded yet.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Option<(u64, Arc<DashboardData>)> {
        let inner = self.inner.read().expect("dataset store lock poisoned");
        inner
            .current
            .as_ref()
            .map(|data| (inner.generation, Arc::clone(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    const VALID: &str = r#"{
        "metadata": {"title":"Dashboard","total_categorias":1,"total_indicacoes":2,"data_processamento":"2024-01-01"},
        "chart_data": [{"categoria":"Asfalto","quantidade":2,"sheet_name":"ASF"}],
        "details": {
            "Asfalto": {
                "sheet_name":"ASF",
                "total_indicacoes":2,
                "indicacoes":[
                    {"numero":"5/2023","descricao":"buraco","rua":"Rua B"},
                    {"numero":"6/2023","descricao":"recapeamento","rua":"Rua C"}
                ]
            }
        }
    }"#;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("indicacoes-store-{}-{name}", std::process::id()))
    }

    fn write_file(path: &Path, contents: &str) {
        let mut f = std::fs::File::create(path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn empty_store_has_no_snapshot() {
        let store = DatasetStore::new(temp_path("never-written.json"));
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn reload_populates_snapshot_and_bumps_generation() {
        let path = temp_path("reload-ok.json");
        write_file(&path, VALID);
        let store = DatasetStore::new(&path);

        store.reload().unwrap();
        let (gen1, data) = store.snapshot().unwrap();
        assert_eq!(gen1, 1);
        assert_eq!(data.metadata.total_indicacoes, 2);

        store.reload().unwrap();
        let (gen2, _) = store.snapshot().unwrap();
        assert_eq!(gen2, 2);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn failed_reload_retains_previous_dataset() {
        let path = temp_path("reload-fail.json");
        write_file(&path, VALID);
        let store = DatasetStore::new(&path);
        store.reload().unwrap();
        let (gen_before, before) = store.snapshot().unwrap();

        write_file(&path, "{broken");
        let err = store.reload().unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));

        let (gen_after, after) = store.snapshot().unwrap();
        assert_eq!(gen_before, gen_after);
        assert!(Arc::ptr_eq(&before, &after));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn failed_initial_load_leaves_store_empty() {
        let store = DatasetStore::new(temp_path("missing-initial.json"));
        assert!(store.reload().is_err());
        assert!(store.snapshot().is_none());
    }
}
