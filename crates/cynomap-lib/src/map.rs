//! One-shot cyno map computation.
//!
//! A [`CynoMap`] owns everything derived for a single request: the loaded
//! starmap, the resolved presence and the routes between presence systems.
//! Nothing here is shared between computations, so two maps with different
//! ranges or credentials never observe each other's data.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::db::ReferenceDataset;
use crate::error::{Error, Result};
use crate::output::{render_svg, SvgMode};
use crate::presence::CynoPresence;
use crate::resolver::LocationResolver;
use crate::routes::{find_cyno_routes, CynoRoute};
use crate::scene::{build_scene, Scene, DEFAULT_PADDING};
use crate::starmap::{load_starmap, Projection, Starmap, KNOWN_SPACE_REGION_BOUND};
use crate::tracking::{Credentials, TrackingApi};

/// Jump range used when the caller does not pick one.
pub const DEFAULT_JUMP_RANGE: JumpRange = JumpRange(13.0);

/// Validated jump range in light-years.
///
/// Always positive and finite; construct through [`JumpRange::new`] or by
/// parsing a string.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct JumpRange(f64);

impl JumpRange {
    pub fn new(light_years: f64) -> Result<Self> {
        if light_years.is_finite() && light_years > 0.0 {
            Ok(Self(light_years))
        } else {
            Err(Error::InvalidJumpRange {
                value: light_years.to_string(),
            })
        }
    }

    pub fn light_years(self) -> f64 {
        self.0
    }
}

impl Default for JumpRange {
    fn default() -> Self {
        DEFAULT_JUMP_RANGE
    }
}

impl FromStr for JumpRange {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let value: f64 = trimmed.parse().map_err(|_| Error::InvalidJumpRange {
            value: trimmed.to_string(),
        })?;
        Self::new(value).map_err(|_| Error::InvalidJumpRange {
            value: trimmed.to_string(),
        })
    }
}

impl fmt::Display for JumpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable inputs of one map computation.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub jump_range: JumpRange,
    /// Tracking credentials; without them the map carries no presence.
    pub credentials: Option<Credentials>,
    /// Systems in regions at or above this identifier are not loaded.
    pub region_bound: i64,
    pub projection: Projection,
    /// Viewport padding around the projected bounds.
    pub padding: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            jump_range: DEFAULT_JUMP_RANGE,
            credentials: None,
            region_bound: KNOWN_SPACE_REGION_BOUND,
            projection: Projection::default(),
            padding: DEFAULT_PADDING,
        }
    }
}

impl MapConfig {
    pub fn with_jump_range(mut self, jump_range: JumpRange) -> Self {
        self.jump_range = jump_range;
        self
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_region_bound(mut self, region_bound: i64) -> Self {
        self.region_bound = region_bound;
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

/// Result of one cyno map computation.
#[derive(Debug, Clone)]
pub struct CynoMap {
    config: MapConfig,
    starmap: Starmap,
    presence: CynoPresence,
    routes: Vec<CynoRoute>,
}

impl CynoMap {
    /// Load the starmap, resolve presence and find routes.
    ///
    /// Any dataset or tracking failure aborts the computation; no partial map
    /// is returned.
    pub fn compute(
        dataset: &dyn ReferenceDataset,
        tracker: &dyn TrackingApi,
        config: MapConfig,
    ) -> Result<Self> {
        let started = Instant::now();

        let starmap = load_starmap(dataset, config.region_bound, &config.projection)?;
        let presence = {
            let resolver = LocationResolver::new(&starmap, dataset, tracker);
            CynoPresence::collect(tracker, config.credentials.as_ref(), &resolver)?
        };
        let routes = find_cyno_routes(&presence, &starmap, config.jump_range.light_years());

        info!(
            jump_range_ly = config.jump_range.light_years(),
            systems = starmap.systems.len(),
            presence = presence.len(),
            routes = routes.len(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
            "cyno map computed"
        );

        Ok(Self {
            config,
            starmap,
            presence,
            routes,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn starmap(&self) -> &Starmap {
        &self.starmap
    }

    pub fn presence(&self) -> &CynoPresence {
        &self.presence
    }

    pub fn routes(&self) -> &[CynoRoute] {
        &self.routes
    }

    pub fn jump_range(&self) -> JumpRange {
        self.config.jump_range
    }

    pub fn scene(&self) -> Scene {
        build_scene(
            &self.starmap,
            &self.presence,
            &self.routes,
            self.config.jump_range.light_years(),
            self.config.padding,
        )
    }

    /// Build the scene and write it as SVG in one step.
    pub fn svg(&self, mode: SvgMode) -> String {
        let svg = render_svg(&self.scene(), mode);
        debug!(bytes = svg.len(), ?mode, "cyno map rendered");
        svg
    }
}
