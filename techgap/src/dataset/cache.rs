//! Process-wide memoized dataset load.
//!
//! The input workbook is static for the life of the process, so every page
//! render reuses the same parsed and aggregated dataset. Entries are keyed by
//! canonical path and sheet; failed loads are not cached.

use log::debug;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use super::{load_dataset, Dataset};
use crate::domain::LoadError;

type CacheKey = (PathBuf, usize);

static CACHE: OnceLock<Mutex<HashMap<CacheKey, Arc<Dataset>>>> = OnceLock::new();

fn cache() -> &'static Mutex<HashMap<CacheKey, Arc<Dataset>>> {
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Load `path` once per process and return the shared, immutable result.
///
/// # Errors
/// Propagates the [`LoadError`] from [`load_dataset`]; a failure is retried on
/// the next call.
pub fn load_cached(path: &Path, sheet: usize) -> Result<Arc<Dataset>, LoadError> {
    let canonical = std::fs::canonicalize(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound(path.to_path_buf())
        } else {
            LoadError::Io(e)
        }
    })?;
    let key = (canonical, sheet);

    // Entries are inserted whole, so a poisoned map is still consistent
    let mut entries = cache().lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(dataset) = entries.get(&key) {
        debug!("Dataset cache hit for {}", key.0.display());
        return Ok(Arc::clone(dataset));
    }

    let dataset = Arc::new(load_dataset(&key.0, sheet)?);
    entries.insert(key, Arc::clone(&dataset));
    Ok(dataset)
}
