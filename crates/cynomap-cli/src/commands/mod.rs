// Handlers for the CLI subcommands.
//
// Each module handles one subcommand; main.rs only parses arguments and
// dispatches.

pub mod presence;
pub mod render;
pub mod routes;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use cynomap_lib::{
    ensure_dataset, Credentials, CynoMap, HttpTrackingClient, JumpRange, MapConfig,
    SqliteDataset, TrackingApi,
};

/// Everything a subcommand needs to compute a map.
pub struct MapContext {
    pub dataset_path: PathBuf,
    pub tracker: Box<dyn TrackingApi>,
    pub credentials: Option<Credentials>,
}

impl MapContext {
    /// Locate the dataset and build the tracking client.
    ///
    /// An incomplete or invalid credential pair is dropped with a warning, so
    /// the map is rendered without presence.
    pub fn new(
        data_dir: Option<&Path>,
        tracking_url: &str,
        key_id: Option<u64>,
        vcode: Option<&str>,
    ) -> Result<Self> {
        let dataset_path = ensure_dataset(data_dir).context("failed to locate the static dataset")?;
        let tracker = HttpTrackingClient::new(tracking_url)
            .with_context(|| format!("failed to create tracking client for {tracking_url}"))?;

        let credentials = Credentials::from_parts(key_id, vcode);
        if credentials.is_none() && (key_id.is_some() || vcode.is_some()) {
            warn!("incomplete or invalid tracking credentials; rendering without presence");
        }

        Ok(Self {
            dataset_path,
            tracker: Box::new(tracker),
            credentials,
        })
    }

    /// Build a context around an existing tracker.
    pub fn with_tracker(
        dataset_path: PathBuf,
        tracker: Box<dyn TrackingApi>,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            dataset_path,
            tracker,
            credentials,
        }
    }

    /// Open the dataset and compute the map for `range`.
    pub fn compute(&self, range: JumpRange) -> Result<CynoMap> {
        let dataset = SqliteDataset::open(&self.dataset_path).with_context(|| {
            format!("failed to open dataset {}", self.dataset_path.display())
        })?;
        let config = MapConfig::default()
            .with_jump_range(range)
            .with_credentials(self.credentials.clone());

        CynoMap::compute(&dataset, self.tracker.as_ref(), config)
            .context("failed to compute cyno map")
    }
}
