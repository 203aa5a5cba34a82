//! Character-tracking capability.
//!
//! The map never talks to the tracking API directly; it consumes the
//! [`TrackingApi`] trait. [`HttpTrackingClient`] is the production transport
//! and [`CachedTracker`] layers a shared, time-bounded cache over any
//! implementation.

mod cache;
mod http;

use std::fmt;

use thiserror::Error;

use crate::error::{Error, Result};
use crate::starmap::SystemId;

pub use cache::{CachedTracker, DEFAULT_CACHE_TTL};
pub use http::{HttpTrackingClient, DEFAULT_TRACKING_URL};

/// Identifier of a location reported by the tracking API (system or facility).
pub type LocationId = i64;

/// Fatal failures from the tracking capability.
///
/// A member without a resolvable location is not an error; it is reported as
/// a [`LocationRecord`] without a location and skipped downstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    /// The credential pair was rejected.
    #[error("tracking API rejected the credentials (HTTP {status})")]
    Unauthorized { status: u16 },

    /// The tracking API could not be reached or failed server-side.
    #[error("tracking API unreachable: {message}")]
    Unreachable { message: String },

    /// The tracking API answered with a body that could not be decoded.
    #[error("tracking API returned a malformed response: {message}")]
    MalformedResponse { message: String },
}

/// Result alias for tracking calls.
pub type TrackingResult<T> = std::result::Result<T, TrackingError>;

/// API key pair used to query corporation member tracking.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credentials {
    key_id: u64,
    verification_code: String,
}

impl Credentials {
    /// Build a validated credential pair.
    pub fn new(key_id: u64, verification_code: impl Into<String>) -> Result<Self> {
        let verification_code = verification_code.into().trim().to_string();
        if key_id == 0 {
            return Err(Error::InvalidCredentials {
                reason: "key id must be non-zero".to_string(),
            });
        }
        if verification_code.is_empty() {
            return Err(Error::InvalidCredentials {
                reason: "verification code must not be blank".to_string(),
            });
        }
        Ok(Self {
            key_id,
            verification_code,
        })
    }

    /// Build credentials from optional parts, yielding `None` unless both
    /// parts are present and valid.
    pub fn from_parts(key_id: Option<u64>, verification_code: Option<&str>) -> Option<Self> {
        match (key_id, verification_code) {
            (Some(key_id), Some(code)) => Self::new(key_id, code).ok(),
            _ => None,
        }
    }

    pub fn key_id(&self) -> u64 {
        self.key_id
    }

    pub fn verification_code(&self) -> &str {
        &self.verification_code
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key_id", &self.key_id)
            .field("verification_code", &"<redacted>")
            .finish()
    }
}

/// Outpost facility together with the system hosting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outpost {
    pub facility_id: LocationId,
    pub system_id: SystemId,
}

/// Current location of a tracked member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRecord {
    pub member_name: String,
    pub location_id: Option<LocationId>,
}

impl LocationRecord {
    pub fn new(member_name: impl Into<String>, location_id: Option<LocationId>) -> Self {
        Self {
            member_name: member_name.into(),
            location_id,
        }
    }
}

/// External character-tracking capability.
///
/// Implementations must be safe to share between concurrent map computations.
pub trait TrackingApi: Send + Sync {
    /// Every currently active outpost facility with its hosting system.
    fn outposts(&self) -> TrackingResult<Vec<Outpost>>;

    /// Tracked members of the corporation owning `credentials`.
    fn member_tracking(&self, credentials: &Credentials) -> TrackingResult<Vec<LocationRecord>>;
}

impl<T: TrackingApi + ?Sized> TrackingApi for std::sync::Arc<T> {
    fn outposts(&self) -> TrackingResult<Vec<Outpost>> {
        (**self).outposts()
    }

    fn member_tracking(&self, credentials: &Credentials) -> TrackingResult<Vec<LocationRecord>> {
        (**self).member_tracking(credentials)
    }
}
