use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::db::{ReferenceDataset, SystemRecord};
use crate::error::Result;

/// Numeric identifier for a solar system.
pub type SystemId = i64;

/// Region identifiers below this bound make up known space.
pub const KNOWN_SPACE_REGION_BOUND: i64 = 11_000_001;

/// Raw Cartesian coordinates as stored in the dataset (metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SystemPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Coordinates after the map projection has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedPosition {
    pub cx: f64,
    pub cy: f64,
    pub cz: f64,
}

/// Linear projection from raw dataset coordinates into map units.
///
/// Each axis is mapped as `(raw / reduction) * factor + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub reduction: f64,
    pub factor: f64,
    pub offset: f64,
}

impl Projection {
    pub const DEFAULT_REDUCTION: f64 = 1e16;
    pub const DEFAULT_FACTOR: f64 = 20.0;
    pub const DEFAULT_OFFSET: f64 = 100.0;

    fn axis(&self, value: f64) -> f64 {
        ((value / self.reduction) * self.factor) + self.offset
    }

    pub fn project(&self, position: &SystemPosition) -> ProjectedPosition {
        ProjectedPosition {
            cx: self.axis(position.x),
            cy: self.axis(position.y),
            cz: self.axis(position.z),
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            reduction: Self::DEFAULT_REDUCTION,
            factor: Self::DEFAULT_FACTOR,
            offset: Self::DEFAULT_OFFSET,
        }
    }
}

/// A solar system with both raw and projected coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct System {
    pub id: SystemId,
    pub name: String,
    pub security: f64,
    pub position: SystemPosition,
    pub projected: ProjectedPosition,
}

impl System {
    fn from_record(record: SystemRecord, projection: &Projection) -> Self {
        let projected = projection.project(&record.position);
        Self {
            id: record.id,
            name: record.name,
            security: record.security,
            position: record.position,
            projected,
        }
    }
}

/// Stargate connection between two systems, as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Jump {
    pub from: SystemId,
    pub to: SystemId,
}

/// In-memory known-space starmap used for a single map computation.
#[derive(Debug, Clone, Default)]
pub struct Starmap {
    pub systems: HashMap<SystemId, System>,
    pub jumps: Vec<Jump>,
}

impl Starmap {
    pub fn system(&self, id: SystemId) -> Option<&System> {
        self.systems.get(&id)
    }

    pub fn contains(&self, id: SystemId) -> bool {
        self.systems.contains_key(&id)
    }

    /// Lookup a system name by identifier.
    pub fn system_name(&self, id: SystemId) -> Option<&str> {
        self.systems.get(&id).map(|sys| sys.name.as_str())
    }

    /// Systems ordered by identifier, for deterministic iteration.
    pub fn systems_by_id(&self) -> Vec<&System> {
        let mut systems: Vec<&System> = self.systems.values().collect();
        systems.sort_by_key(|system| system.id);
        systems
    }
}

/// Load the known-space systems and jumps from a reference dataset.
///
/// Systems are filtered to regions strictly below `region_bound` and projected
/// with `projection`. Jump rows whose endpoints are not part of the loaded
/// system set are dropped so downstream stages never meet dangling edges.
pub fn load_starmap(
    dataset: &dyn ReferenceDataset,
    region_bound: i64,
    projection: &Projection,
) -> Result<Starmap> {
    let started = Instant::now();
    let systems: HashMap<SystemId, System> = dataset
        .systems_below_region(region_bound)?
        .into_iter()
        .map(|record| {
            let system = System::from_record(record, projection);
            (system.id, system)
        })
        .collect();
    debug!(
        systems = systems.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "systems data loaded"
    );

    let started = Instant::now();
    let mut skipped_edges = 0usize;
    let jumps: Vec<Jump> = dataset
        .jumps()?
        .into_iter()
        .filter(|jump| {
            let known = systems.contains_key(&jump.from) && systems.contains_key(&jump.to);
            if !known {
                skipped_edges += 1;
            }
            known
        })
        .collect();
    if skipped_edges > 0 {
        warn!(
            skipped_edges,
            "ignored jump edges referencing systems outside the loaded map"
        );
    }
    debug!(
        jumps = jumps.len(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "jump data loaded"
    );

    Ok(Starmap { systems, jumps })
}
