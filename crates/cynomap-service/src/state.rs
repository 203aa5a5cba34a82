//! Application state shared by the axum handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cynomap_lib::{
    Credentials, CynoMap, JumpRange, MapConfig, Result as LibResult, SqliteDataset, SvgMode,
    TrackingApi,
};

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable; the dataset is opened afresh for every computation so
/// no map data is shared between requests.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    data_path: PathBuf,
    tracker: Arc<dyn TrackingApi>,
    credentials: Option<Credentials>,
    default_range: JumpRange,
}

impl AppState {
    pub fn new(
        data_path: impl Into<PathBuf>,
        tracker: Arc<dyn TrackingApi>,
        credentials: Option<Credentials>,
        default_range: JumpRange,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                data_path: data_path.into(),
                tracker,
                credentials,
                default_range,
            }),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.inner.data_path
    }

    pub fn default_range(&self) -> JumpRange {
        self.inner.default_range
    }

    pub fn has_credentials(&self) -> bool {
        self.inner.credentials.is_some()
    }

    pub fn dataset_available(&self) -> bool {
        self.inner.data_path.is_file()
    }

    /// Compute a map for `range` and write it as SVG.
    ///
    /// Blocks on the dataset and the tracking API; call it from a blocking
    /// thread.
    pub fn render_svg(&self, range: JumpRange, mode: SvgMode) -> LibResult<String> {
        let dataset = SqliteDataset::open(&self.inner.data_path)?;
        let config = MapConfig::default()
            .with_jump_range(range)
            .with_credentials(self.inner.credentials.clone());

        let map = CynoMap::compute(&dataset, self.inner.tracker.as_ref(), config)?;
        Ok(map.svg(mode))
    }
}
