use std::collections::HashMap;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::db::ReferenceDataset;
use crate::error::{Error, Result};
use crate::starmap::{Starmap, SystemId};
use crate::tracking::{LocationId, Outpost, TrackingApi, TrackingResult};

/// Facility → hosting system lookup built from the tracking API outpost list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityIndex {
    facilities: HashMap<LocationId, SystemId>,
}

impl FacilityIndex {
    /// Fetch the full outpost list once and index it.
    pub fn fetch(tracker: &dyn TrackingApi) -> TrackingResult<Self> {
        let outposts = tracker.outposts()?;
        debug!(outposts = outposts.len(), "facility index built");
        Ok(Self::from_outposts(outposts))
    }

    pub fn from_outposts(outposts: impl IntoIterator<Item = Outpost>) -> Self {
        Self {
            facilities: outposts
                .into_iter()
                .map(|outpost| (outpost.facility_id, outpost.system_id))
                .collect(),
        }
    }

    pub fn system_for(&self, facility_id: LocationId) -> Option<SystemId> {
        self.facilities.get(&facility_id).copied()
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

/// Maps raw member locations onto systems of the loaded starmap.
///
/// Lookup order is fixed: a location that is itself a loaded system wins,
/// then the outpost index from the tracking API, then the dataset's own
/// facility catalog. The outpost index is fetched at most once per resolver
/// and only when a location is not a system.
pub struct LocationResolver<'a> {
    starmap: &'a Starmap,
    dataset: &'a dyn ReferenceDataset,
    tracker: &'a dyn TrackingApi,
    facilities: OnceCell<FacilityIndex>,
}

impl<'a> LocationResolver<'a> {
    pub fn new(
        starmap: &'a Starmap,
        dataset: &'a dyn ReferenceDataset,
        tracker: &'a dyn TrackingApi,
    ) -> Self {
        Self {
            starmap,
            dataset,
            tracker,
            facilities: OnceCell::new(),
        }
    }

    /// The outpost index, fetching it on first use.
    pub fn facility_index(&self) -> Result<&FacilityIndex> {
        self.facilities
            .get_or_try_init(|| FacilityIndex::fetch(self.tracker).map_err(Error::from))
    }

    /// Resolve a raw location to a system identifier.
    ///
    /// Returns `Ok(None)` for locations that cannot be placed on the map.
    /// Errors are reserved for tracking or dataset failures.
    pub fn resolve(&self, location_id: LocationId) -> Result<Option<SystemId>> {
        if self.starmap.contains(location_id) {
            return Ok(Some(location_id));
        }

        let hosting_system = match self.facility_index()?.system_for(location_id) {
            Some(system) => Some(system),
            None => self.dataset.facility_system(location_id)?,
        };

        match hosting_system {
            Some(system) if self.starmap.contains(system) => Ok(Some(system)),
            Some(system) => {
                debug!(
                    location_id,
                    system, "facility hosted outside the loaded map; dropping"
                );
                Ok(None)
            }
            None => {
                debug!(location_id, "location did not resolve to a system");
                Ok(None)
            }
        }
    }
}
