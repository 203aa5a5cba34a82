use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use tracing::debug;

use super::{Credentials, LocationRecord, Outpost, TrackingApi, TrackingResult};

/// Default lifetime of cached tracking responses.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    fetched_at: Instant,
    value: T,
}

impl<T: Clone> CacheEntry<T> {
    fn fresh(&self, ttl: Duration) -> Option<T> {
        (self.fetched_at.elapsed() < ttl).then(|| self.value.clone())
    }
}

/// Time-bounded cache in front of a tracking capability.
///
/// Readers share a read lock, so one instance can serve concurrent map
/// computations. Failed calls are never cached.
#[derive(Debug)]
pub struct CachedTracker<T> {
    inner: T,
    ttl: Duration,
    outposts: RwLock<Option<CacheEntry<Vec<Outpost>>>>,
    members: RwLock<HashMap<Credentials, CacheEntry<Vec<LocationRecord>>>>,
}

impl<T: TrackingApi> CachedTracker<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            outposts: RwLock::new(None),
            members: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<T: TrackingApi> TrackingApi for CachedTracker<T> {
    fn outposts(&self) -> TrackingResult<Vec<Outpost>> {
        let cached = self
            .outposts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|entry| entry.fresh(self.ttl));
        if let Some(outposts) = cached {
            debug!(count = outposts.len(), "outpost list served from cache");
            return Ok(outposts);
        }

        let outposts = self.inner.outposts()?;
        *self.outposts.write().unwrap_or_else(PoisonError::into_inner) = Some(CacheEntry {
            fetched_at: Instant::now(),
            value: outposts.clone(),
        });
        Ok(outposts)
    }

    fn member_tracking(&self, credentials: &Credentials) -> TrackingResult<Vec<LocationRecord>> {
        let cached = self
            .members
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(credentials)
            .and_then(|entry| entry.fresh(self.ttl));
        if let Some(records) = cached {
            debug!(
                key_id = credentials.key_id(),
                count = records.len(),
                "member tracking served from cache"
            );
            return Ok(records);
        }

        let records = self.inner.member_tracking(credentials)?;
        self.members
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                credentials.clone(),
                CacheEntry {
                    fetched_at: Instant::now(),
                    value: records.clone(),
                },
            );
        Ok(records)
    }
}
