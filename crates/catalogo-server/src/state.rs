use catalogo_storage::{FileStore, InMemoryStore, UnavailableStore, UserStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub index_file: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, index_file: impl Into<PathBuf>) -> Self {
        Self {
            store,
            index_file: Arc::new(index_file.into()),
        }
    }
}

/// Opens the configured user store. A store that cannot be opened is logged
/// and replaced by one that fails every write, so reads keep being served.
pub fn open_store(store_dir: Option<&Path>) -> Arc<dyn UserStore> {
    match store_dir {
        Some(dir) => match FileStore::open(dir) {
            Ok(s) => {
                info!(path = %s.path().display(), "user store opened");
                Arc::new(s)
            }
            Err(e) => {
                error!("user store open failed: {}", e);
                Arc::new(UnavailableStore::new(e.to_string()))
            }
        },
        None => {
            info!("STORE_DIR not set, users are kept in memory");
            Arc::new(InMemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_selection() {
        assert_eq!(open_store(None).kind(), "memory");
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(open_store(Some(dir.path())).kind(), "file");
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "x").unwrap();
        assert_eq!(open_store(Some(blocker.as_path())).kind(), "unavailable");
    }
}
