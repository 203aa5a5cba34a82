//! Service configuration read from the environment.
//!
//! - `CYNOMAP_DATA_PATH`: static dataset file (default `/data/static_data.db`)
//! - `SERVICE_PORT`: HTTP port (default 8080)
//! - `CYNOMAP_TRACKING_URL`: tracking gateway base URL
//! - `CYNOMAP_KEY_ID` / `CYNOMAP_VCODE`: tracking credentials; both or neither
//! - `CYNOMAP_DEFAULT_RANGE`: jump range for `/cynos.svg` (default 13)
//! - `CYNOMAP_CACHE_TTL_SECS`: tracking cache lifetime (default 300)

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use cynomap_lib::tracking::{DEFAULT_CACHE_TTL, DEFAULT_TRACKING_URL};
use cynomap_lib::{Credentials, JumpRange, DEFAULT_JUMP_RANGE};

const DEFAULT_DATA_PATH: &str = "/data/static_data.db";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub data_path: PathBuf,
    pub port: u16,
    pub tracking_url: String,
    pub credentials: Option<Credentials>,
    pub default_range: JumpRange,
    pub cache_ttl: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            port: DEFAULT_PORT,
            tracking_url: DEFAULT_TRACKING_URL.to_string(),
            credentials: None,
            default_range: DEFAULT_JUMP_RANGE,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults with a warning, and an
    /// incomplete credential pair disables presence instead of failing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_path = lookup("CYNOMAP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let port = parse_or("SERVICE_PORT", lookup("SERVICE_PORT"), defaults.port);

        let tracking_url = lookup("CYNOMAP_TRACKING_URL").unwrap_or(defaults.tracking_url);

        let default_range = parse_or(
            "CYNOMAP_DEFAULT_RANGE",
            lookup("CYNOMAP_DEFAULT_RANGE"),
            defaults.default_range,
        );

        let cache_ttl = Duration::from_secs(parse_or(
            "CYNOMAP_CACHE_TTL_SECS",
            lookup("CYNOMAP_CACHE_TTL_SECS"),
            defaults.cache_ttl.as_secs(),
        ));

        let key_id = lookup("CYNOMAP_KEY_ID");
        let vcode = lookup("CYNOMAP_VCODE");
        let credentials = Credentials::from_parts(
            key_id.as_deref().and_then(|raw| raw.trim().parse().ok()),
            vcode.as_deref(),
        );
        if credentials.is_none() && (key_id.is_some() || vcode.is_some()) {
            warn!("incomplete or invalid tracking credentials; maps will carry no presence");
        }

        Self {
            data_path,
            port,
            tracking_url,
            credentials,
            default_range,
            cache_ttl,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring unparseable configuration value");
            default
        }),
        None => default,
    }
}
