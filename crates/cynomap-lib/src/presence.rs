use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::resolver::LocationResolver;
use crate::starmap::SystemId;
use crate::tracking::{Credentials, LocationRecord, TrackingApi};

/// Tracked members grouped by the system they are currently in.
///
/// Systems iterate in identifier order; members keep the order in which the
/// tracking API reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CynoPresence {
    systems: BTreeMap<SystemId, Vec<String>>,
}

impl CynoPresence {
    /// Fetch member locations and group them by resolved system.
    ///
    /// Without credentials no tracking call is made and the presence is empty.
    /// Members whose location does not resolve are left out; tracking and
    /// dataset failures abort the whole collection.
    pub fn collect(
        tracker: &dyn TrackingApi,
        credentials: Option<&Credentials>,
        resolver: &LocationResolver<'_>,
    ) -> Result<Self> {
        let Some(credentials) = credentials else {
            debug!("no tracking credentials configured; presence is empty");
            return Ok(Self::default());
        };

        let records = tracker.member_tracking(credentials)?;
        Self::from_records(resolver, &records)
    }

    /// Group already-fetched location records by resolved system.
    pub fn from_records(resolver: &LocationResolver<'_>, records: &[LocationRecord]) -> Result<Self> {
        let mut systems: BTreeMap<SystemId, Vec<String>> = BTreeMap::new();
        let mut dropped = 0usize;

        for record in records {
            let resolved = match record.location_id {
                Some(location_id) => resolver.resolve(location_id)?,
                None => None,
            };
            match resolved {
                Some(system) => systems
                    .entry(system)
                    .or_default()
                    .push(record.member_name.clone()),
                None => {
                    debug!(member = %record.member_name, location = ?record.location_id, "member location unresolved");
                    dropped += 1;
                }
            }
        }

        info!(
            members = records.len(),
            dropped,
            systems = systems.len(),
            "cyno locations resolved"
        );
        Ok(Self { systems })
    }

    pub fn contains(&self, system: SystemId) -> bool {
        self.systems.contains_key(&system)
    }

    pub fn members(&self, system: SystemId) -> Option<&[String]> {
        self.systems.get(&system).map(Vec::as_slice)
    }

    /// Presence-bearing systems in identifier order.
    pub fn systems(&self) -> impl Iterator<Item = SystemId> + '_ {
        self.systems.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SystemId, &[String])> + '_ {
        self.systems
            .iter()
            .map(|(system, members)| (*system, members.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(SystemId, S)> for CynoPresence {
    fn from_iter<I: IntoIterator<Item = (SystemId, S)>>(iter: I) -> Self {
        let mut systems: BTreeMap<SystemId, Vec<String>> = BTreeMap::new();
        for (system, member) in iter {
            systems.entry(system).or_default().push(member.into());
        }
        Self { systems }
    }
}
