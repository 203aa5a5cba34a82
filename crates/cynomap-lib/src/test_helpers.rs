// Test-only helpers for `cynomap-lib` unit tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::db::SystemRecord;
use crate::distance::UNITS_PER_LIGHT_YEAR;
use crate::starmap::{SystemId, SystemPosition};
use crate::tracking::{
    Credentials, LocationRecord, Outpost, TrackingApi, TrackingError, TrackingResult,
};

/// Region used for every known-space fixture system.
pub const FIXTURE_REGION: i64 = 10_000_001;

/// System record placed at the given light-year coordinates.
pub fn system_at_ly(id: SystemId, name: &str, security: f64, x_ly: f64, y_ly: f64) -> SystemRecord {
    SystemRecord::new(
        id,
        name,
        FIXTURE_REGION,
        security,
        SystemPosition {
            x: x_ly * UNITS_PER_LIGHT_YEAR,
            y: y_ly * UNITS_PER_LIGHT_YEAR,
            z: 0.0,
        },
    )
}

/// Tracking capability returning canned responses and counting calls.
#[derive(Debug, Default)]
pub struct ScriptedTracker {
    outposts: Vec<Outpost>,
    members: Vec<LocationRecord>,
    outpost_error: Option<TrackingError>,
    member_error: Option<TrackingError>,
    outpost_calls: AtomicUsize,
    member_calls: AtomicUsize,
}

impl ScriptedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outposts(mut self, outposts: Vec<Outpost>) -> Self {
        self.outposts = outposts;
        self
    }

    pub fn with_members(mut self, members: Vec<LocationRecord>) -> Self {
        self.members = members;
        self
    }

    pub fn failing_outposts(mut self, error: TrackingError) -> Self {
        self.outpost_error = Some(error);
        self
    }

    pub fn failing_members(mut self, error: TrackingError) -> Self {
        self.member_error = Some(error);
        self
    }

    pub fn outpost_calls(&self) -> usize {
        self.outpost_calls.load(Ordering::SeqCst)
    }

    pub fn member_calls(&self) -> usize {
        self.member_calls.load(Ordering::SeqCst)
    }
}

impl TrackingApi for ScriptedTracker {
    fn outposts(&self) -> TrackingResult<Vec<Outpost>> {
        self.outpost_calls.fetch_add(1, Ordering::SeqCst);
        match &self.outpost_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.outposts.clone()),
        }
    }

    fn member_tracking(&self, _credentials: &Credentials) -> TrackingResult<Vec<LocationRecord>> {
        self.member_calls.fetch_add(1, Ordering::SeqCst);
        match &self.member_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.members.clone()),
        }
    }
}
