// Test utilities used across `cynomap-cli` tests.
// Kept under `#[cfg(test)]` so it is not part of the public crate API.
use cynomap_lib::tracking::TrackingResult;
use cynomap_lib::{
    Credentials, LocationRecord, MemoryDataset, Outpost, SystemPosition, SystemRecord,
    TrackingApi, UNITS_PER_LIGHT_YEAR,
};

/// Tracking capability returning a fixed member list and no outposts.
pub struct StaticTracker {
    members: Vec<LocationRecord>,
}

impl StaticTracker {
    pub fn new(members: Vec<LocationRecord>) -> Self {
        Self { members }
    }
}

impl TrackingApi for StaticTracker {
    fn outposts(&self) -> TrackingResult<Vec<Outpost>> {
        Ok(Vec::new())
    }

    fn member_tracking(&self, _credentials: &Credentials) -> TrackingResult<Vec<LocationRecord>> {
        Ok(self.members.clone())
    }
}

fn at_ly(x: f64, z: f64) -> SystemPosition {
    SystemPosition {
        x: x * UNITS_PER_LIGHT_YEAR,
        y: 0.0,
        z: z * UNITS_PER_LIGHT_YEAR,
    }
}

/// Three known-space systems: two low-security systems 4 ly apart and a
/// high-security system 6 ly from the first.
pub fn sample_dataset() -> MemoryDataset {
    MemoryDataset::new()
        .with_system(SystemRecord::new(1, "Amamake", 10_000_042, 0.4, at_ly(0.0, 0.0)))
        .with_system(SystemRecord::new(2, "Vard", 10_000_042, 0.3, at_ly(4.0, 0.0)))
        .with_system(SystemRecord::new(3, "Jita", 10_000_002, 0.946, at_ly(0.0, 6.0)))
        .with_jump(1, 2)
        .with_jump(2, 3)
}
