//! Cyno map library entry points.
//!
//! This crate loads the static starmap from a reference dataset, resolves the
//! live locations of tracked corporation members against it, finds the cyno
//! routes between low-security systems within jump range, and assembles the
//! result into a scene that can be written out as SVG. Higher-level consumers
//! (CLI, HTTP service) should only depend on the functions exported here
//! instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod dataset;
pub mod db;
pub mod distance;
pub mod error;
pub mod map;
pub mod output;
pub mod presence;
pub mod resolver;
pub mod routes;
pub mod scene;
pub mod starmap;
pub mod tracking;

#[cfg(test)]
mod test_helpers;

pub use dataset::{default_dataset_path, ensure_dataset};
pub use db::{MemoryDataset, ReferenceDataset, SqliteDataset, SystemRecord};
pub use distance::{light_years_between, UNITS_PER_LIGHT_YEAR};
pub use error::{Error, Result};
pub use map::{CynoMap, JumpRange, MapConfig, DEFAULT_JUMP_RANGE};
pub use output::{render_svg, SvgMode};
pub use presence::CynoPresence;
pub use resolver::{FacilityIndex, LocationResolver};
pub use routes::{find_cyno_routes, unique_route_pairs, CynoRoute, LOW_SECURITY_THRESHOLD};
pub use scene::{build_scene, Bounds, Circle, Line, LineStyle, Scene, SystemStyle, Viewport};
pub use starmap::{
    load_starmap, Jump, Projection, ProjectedPosition, Starmap, System, SystemId, SystemPosition,
    KNOWN_SPACE_REGION_BOUND,
};
pub use tracking::{
    CachedTracker, Credentials, HttpTrackingClient, LocationRecord, Outpost, TrackingApi,
    TrackingError,
};
