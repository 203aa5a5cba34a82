use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use tracing::debug;

use crate::error::{Error, Result};
use crate::starmap::{Jump, SystemId, SystemPosition};
use crate::tracking::LocationId;

/// Raw system row as stored in the reference dataset, before projection.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemRecord {
    pub id: SystemId,
    pub name: String,
    pub region_id: i64,
    pub security: f64,
    pub position: SystemPosition,
}

impl SystemRecord {
    pub fn new(
        id: SystemId,
        name: impl Into<String>,
        region_id: i64,
        security: f64,
        position: SystemPosition,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            region_id,
            security,
            position,
        }
    }
}

/// Read interface over the static reference dataset.
///
/// Implementations are injected by the caller when a map is computed, so the
/// storage backend is chosen at construction time rather than by name.
pub trait ReferenceDataset {
    /// All systems whose region identifier is strictly below `region_bound`.
    fn systems_below_region(&self, region_bound: i64) -> Result<Vec<SystemRecord>>;

    /// Every stored jump edge, in a stable order.
    fn jumps(&self) -> Result<Vec<Jump>>;

    /// Hosting system for a facility, when the dataset knows the facility.
    fn facility_system(&self, facility_id: LocationId) -> Result<Option<SystemId>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FacilityTable {
    table: &'static str,
    facility_id_column: &'static str,
    system_id_column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SchemaDefinition {
    systems_table: &'static str,
    system_id_column: &'static str,
    system_name_column: &'static str,
    region_column: &'static str,
    security_column: &'static str,
    position_columns: [&'static str; 3],
    jumps_table: &'static str,
    jump_from_column: &'static str,
    jump_to_column: &'static str,
    facilities: Option<FacilityTable>,
}

const MAP_SCHEMA: SchemaDefinition = SchemaDefinition {
    systems_table: "mapSolarSystems",
    system_id_column: "solarSystemID",
    system_name_column: "solarSystemName",
    region_column: "regionID",
    security_column: "security",
    position_columns: ["x", "y", "z"],
    jumps_table: "mapSolarSystemJumps",
    jump_from_column: "fromSolarSystemID",
    jump_to_column: "toSolarSystemID",
    facilities: Some(FacilityTable {
        table: "staStations",
        facility_id_column: "stationID",
        system_id_column: "solarSystemID",
    }),
};

/// Reference dataset backed by a static-data SQLite export.
///
/// Each map computation opens its own read-only connection; connections are
/// not shared between computations.
pub struct SqliteDataset {
    connection: Connection,
    schema: SchemaDefinition,
}

impl SqliteDataset {
    /// Open a dataset file read-only and verify its schema.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let connection = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %path.display(), "opened reference dataset");
        Self::from_connection(connection)
    }

    /// Wrap an existing connection, verifying the expected tables are present.
    pub fn from_connection(connection: Connection) -> Result<Self> {
        let schema = detect_schema(&connection)?;
        Ok(Self { connection, schema })
    }

    /// Whether the dataset carries a facility catalog.
    pub fn has_facility_catalog(&self) -> bool {
        self.schema.facilities.is_some()
    }
}

impl ReferenceDataset for SqliteDataset {
    fn systems_below_region(&self, region_bound: i64) -> Result<Vec<SystemRecord>> {
        let schema = &self.schema;
        let [x, y, z] = schema.position_columns;
        let sql = format!(
            "SELECT {id}, {name}, {region}, {security}, {x}, {y}, {z} FROM {table} \
             WHERE {region} < ?1 ORDER BY {id}",
            id = schema.system_id_column,
            name = schema.system_name_column,
            region = schema.region_column,
            security = schema.security_column,
            table = schema.systems_table,
        );

        let mut stmt = self.connection.prepare(&sql)?;
        let rows = stmt.query_map([region_bound], row_to_record)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn jumps(&self) -> Result<Vec<Jump>> {
        let sql = format!(
            "SELECT {from}, {to} FROM {table} ORDER BY {from}, {to}",
            from = self.schema.jump_from_column,
            to = self.schema.jump_to_column,
            table = self.schema.jumps_table
        );

        let mut stmt = self.connection.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(Jump {
                from: row.get(0)?,
                to: row.get(1)?,
            })
        })?;
        let mut jumps = Vec::new();
        for row in rows {
            jumps.push(row?);
        }
        Ok(jumps)
    }

    fn facility_system(&self, facility_id: LocationId) -> Result<Option<SystemId>> {
        let Some(facilities) = self.schema.facilities else {
            return Ok(None);
        };

        let sql = format!(
            "SELECT {system} FROM {table} WHERE {facility} = ?1 LIMIT 1",
            system = facilities.system_id_column,
            table = facilities.table,
            facility = facilities.facility_id_column
        );
        let system = self
            .connection
            .query_row(&sql, [facility_id], |row| row.get(0))
            .optional()?;
        Ok(system)
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<SystemRecord> {
    Ok(SystemRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        region_id: row.get(2)?,
        security: row.get(3)?,
        position: SystemPosition {
            x: row.get(4)?,
            y: row.get(5)?,
            z: row.get(6)?,
        },
    })
}

fn detect_schema(connection: &Connection) -> Result<SchemaDefinition> {
    let mut schema = MAP_SCHEMA;

    if !table_exists(connection, schema.systems_table)?
        || !table_exists(connection, schema.jumps_table)?
    {
        return Err(Error::UnsupportedSchema);
    }

    let [x, y, z] = schema.position_columns;
    if !table_has_columns(
        connection,
        schema.systems_table,
        &[
            schema.system_id_column,
            schema.system_name_column,
            schema.region_column,
            schema.security_column,
            x,
            y,
            z,
        ],
    )? {
        return Err(Error::UnsupportedSchema);
    }

    if !table_has_columns(
        connection,
        schema.jumps_table,
        &[schema.jump_from_column, schema.jump_to_column],
    )? {
        return Err(Error::UnsupportedSchema);
    }

    if let Some(facilities) = schema.facilities {
        if !table_exists(connection, facilities.table)?
            || !table_has_columns(
                connection,
                facilities.table,
                &[facilities.facility_id_column, facilities.system_id_column],
            )?
        {
            debug!(
                table = facilities.table,
                "facility catalog unavailable; facility lookups will miss"
            );
            schema.facilities = None;
        }
    }

    Ok(schema)
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}

/// Reference dataset held entirely in memory.
///
/// Useful when the catalog has already been loaded by other means, and for
/// exercising the map pipeline without a database file.
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    systems: Vec<SystemRecord>,
    jumps: Vec<Jump>,
    facilities: HashMap<LocationId, SystemId>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system(mut self, record: SystemRecord) -> Self {
        self.systems.push(record);
        self
    }

    pub fn with_jump(mut self, from: SystemId, to: SystemId) -> Self {
        self.jumps.push(Jump { from, to });
        self
    }

    pub fn with_facility(mut self, facility_id: LocationId, system_id: SystemId) -> Self {
        self.facilities.insert(facility_id, system_id);
        self
    }
}

impl ReferenceDataset for MemoryDataset {
    fn systems_below_region(&self, region_bound: i64) -> Result<Vec<SystemRecord>> {
        let mut records: Vec<SystemRecord> = self
            .systems
            .iter()
            .filter(|record| record.region_id < region_bound)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    fn jumps(&self) -> Result<Vec<Jump>> {
        Ok(self.jumps.clone())
    }

    fn facility_system(&self, facility_id: LocationId) -> Result<Option<SystemId>> {
        Ok(self.facilities.get(&facility_id).copied())
    }
}
