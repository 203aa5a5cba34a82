//! Shared fixtures for the integration tests.
//!
//! The fixture database follows the static-data export layout and is written
//! into a temporary directory that lives as long as the returned guard.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use cynomap_lib::tracking::TrackingResult;
use cynomap_lib::{
    Credentials, LocationRecord, Outpost, TrackingApi, TrackingError, UNITS_PER_LIGHT_YEAR,
};
use rusqlite::Connection;
use tempfile::TempDir;

pub const AMAMAKE: i64 = 30002537;
pub const VARD: i64 = 30002538;
pub const JITA: i64 = 30000142;
pub const TAMA: i64 = 30002813;
pub const THERA: i64 = 31000005;

/// Station hosted in Vard.
pub const VARD_STATION: i64 = 60000004;
/// Station hosted in Thera, outside known space.
pub const THERA_STATION: i64 = 60015000;

/// Temporary SQLite dataset with a handful of known-space systems.
pub struct DatasetFixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl DatasetFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("static_data.db");
        let connection = Connection::open(&path).expect("create fixture db");
        connection
            .execute_batch(&fixture_sql())
            .expect("populate fixture db");
        Self { _dir: dir, path }
    }
}

fn ly(value: f64) -> f64 {
    value * UNITS_PER_LIGHT_YEAR
}

fn fixture_sql() -> String {
    format!(
        r#"
        CREATE TABLE mapSolarSystems (
            solarSystemID INTEGER PRIMARY KEY,
            solarSystemName TEXT NOT NULL,
            regionID INTEGER NOT NULL,
            security REAL NOT NULL,
            x REAL NOT NULL,
            y REAL NOT NULL,
            z REAL NOT NULL
        );
        CREATE TABLE mapSolarSystemJumps (
            fromSolarSystemID INTEGER NOT NULL,
            toSolarSystemID INTEGER NOT NULL
        );
        CREATE TABLE staStations (
            stationID INTEGER PRIMARY KEY,
            solarSystemID INTEGER NOT NULL
        );
        INSERT INTO mapSolarSystems VALUES ({AMAMAKE}, 'Amamake', 10000042, 0.4, 0.0, 0.0, 0.0);
        INSERT INTO mapSolarSystems VALUES ({VARD}, 'Vard', 10000042, 0.3, {vard_x}, 0.0, 0.0);
        INSERT INTO mapSolarSystems VALUES ({JITA}, 'Jita', 10000002, 0.946, 0.0, 0.0, {jita_z});
        INSERT INTO mapSolarSystems VALUES ({TAMA}, 'Tama', 10000033, 0.3, {tama_x}, 0.0, 0.0);
        INSERT INTO mapSolarSystems VALUES ({THERA}, 'Thera', 11000031, -1.0, 0.0, 0.0, 0.0);
        INSERT INTO mapSolarSystemJumps VALUES ({AMAMAKE}, {VARD});
        INSERT INTO mapSolarSystemJumps VALUES ({VARD}, {AMAMAKE});
        INSERT INTO mapSolarSystemJumps VALUES ({VARD}, {JITA});
        INSERT INTO mapSolarSystemJumps VALUES ({JITA}, {THERA});
        INSERT INTO staStations VALUES ({VARD_STATION}, {VARD});
        INSERT INTO staStations VALUES ({THERA_STATION}, {THERA});
        "#,
        vard_x = ly(4.0),
        jita_z = ly(6.0),
        tama_x = ly(40.0),
    )
}

/// Tracking capability with canned responses that counts its calls.
#[derive(Debug, Default)]
pub struct FakeTracker {
    pub outposts: Vec<Outpost>,
    pub members: Vec<LocationRecord>,
    pub member_error: Option<TrackingError>,
    outpost_calls: AtomicUsize,
    member_calls: AtomicUsize,
}

impl FakeTracker {
    pub fn with_members(members: Vec<LocationRecord>) -> Self {
        Self {
            members,
            ..Self::default()
        }
    }

    pub fn and_outposts(mut self, outposts: Vec<Outpost>) -> Self {
        self.outposts = outposts;
        self
    }

    pub fn failing(error: TrackingError) -> Self {
        Self {
            member_error: Some(error),
            ..Self::default()
        }
    }

    pub fn outpost_calls(&self) -> usize {
        self.outpost_calls.load(Ordering::SeqCst)
    }

    pub fn member_calls(&self) -> usize {
        self.member_calls.load(Ordering::SeqCst)
    }
}

impl TrackingApi for FakeTracker {
    fn outposts(&self) -> TrackingResult<Vec<Outpost>> {
        self.outpost_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outposts.clone())
    }

    fn member_tracking(&self, _credentials: &Credentials) -> TrackingResult<Vec<LocationRecord>> {
        self.member_calls.fetch_add(1, Ordering::SeqCst);
        match &self.member_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.members.clone()),
        }
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(4_203_947, "fixture-vcode").expect("valid credentials")
}
