//! Store backend selection for the FFI entry points.
//!
//! Precedence: explicit `db_path` argument, then `TASKNOTE_STORE=memory`,
//! then `TASKNOTE_DB_PATH`, then `<temp_dir>/tasknote.sqlite3`.

use std::path::PathBuf;

pub(crate) const DB_PATH_ENV: &str = "TASKNOTE_DB_PATH";
pub(crate) const STORE_ENV: &str = "TASKNOTE_STORE";
const DEFAULT_DB_FILE_NAME: &str = "tasknote.sqlite3";
/// Passing this as `db_path` selects the in-memory store.
pub(crate) const MEMORY_DB_PATH: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreBackend {
    Memory,
    File(PathBuf),
}

impl StoreBackend {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::File(_) => "file",
        }
    }
}

pub(crate) fn resolve_store_backend(db_path: Option<&str>) -> StoreBackend {
    let store_env = std::env::var(STORE_ENV).ok();
    let path_env = std::env::var(DB_PATH_ENV).ok();
    resolve_from(db_path, store_env.as_deref(), path_env.as_deref())
}

fn resolve_from(
    db_path: Option<&str>,
    store_env: Option<&str>,
    path_env: Option<&str>,
) -> StoreBackend {
    if let Some(explicit) = non_blank(db_path) {
        if explicit == MEMORY_DB_PATH {
            return StoreBackend::Memory;
        }
        return StoreBackend::File(PathBuf::from(explicit));
    }
    if non_blank(store_env).is_some_and(|value| value.eq_ignore_ascii_case("memory")) {
        return StoreBackend::Memory;
    }
    if let Some(path) = non_blank(path_env) {
        return StoreBackend::File(PathBuf::from(path));
    }
    StoreBackend::File(std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
