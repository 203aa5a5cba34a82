use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the static reference dataset.
const DATASET_FILENAME: &str = "static_data.db";

/// Environment variable overriding the dataset location.
pub const DATASET_ENV: &str = "CYNOMAP_DATASET";

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "cynomap", "cynomap").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Locate the static reference dataset and verify it exists.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `CYNOMAP_DATASET` environment variable.
/// 3. Platform-specific project data directory.
///
/// Directory arguments are resolved to `static_data.db` inside them. The
/// dataset is never downloaded or created; a missing file is reported as
/// [`Error::DatasetNotFound`].
pub fn ensure_dataset(target: Option<&Path>) -> Result<PathBuf> {
    let resolved = if let Some(explicit) = target {
        canonical_dataset_path(explicit)
    } else if let Some(env_path) = env::var_os(DATASET_ENV) {
        canonical_dataset_path(Path::new(&env_path))
    } else {
        default_dataset_path()?
    };

    if !resolved.is_file() {
        return Err(Error::DatasetNotFound { path: resolved });
    }

    debug!(path = %resolved.display(), "dataset located");
    Ok(resolved)
}

fn canonical_dataset_path(path: &Path) -> PathBuf {
    if path.is_dir() || path.extension().is_none() {
        return path.join(DATASET_FILENAME);
    }

    path.to_path_buf()
}
