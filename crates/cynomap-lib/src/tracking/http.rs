use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{
    Credentials, LocationId, LocationRecord, Outpost, TrackingApi, TrackingError, TrackingResult,
};
use crate::error::{Error, Result};
use crate::starmap::SystemId;

/// Tracking gateway used when no URL is configured.
pub const DEFAULT_TRACKING_URL: &str = "http://127.0.0.1:8181";

const OUTPOSTS_PATH: &str = "/eve/outposts";
const MEMBER_TRACKING_PATH: &str = "/corp/member-tracking";

/// Blocking HTTP client for the JSON character-tracking gateway.
///
/// Must not be called from inside an async task; run it on a blocking thread.
#[derive(Debug, Clone)]
pub struct HttpTrackingClient {
    client: Client,
    base_url: String,
}

impl HttpTrackingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> TrackingResult<T> {
        let url = self.endpoint(path);
        debug!(url = %url, "querying tracking API");

        let response = self
            .client
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| TrackingError::Unreachable {
                message: err.to_string(),
            })?;

        if let Some(error) = classify_status(response.status()) {
            return Err(error);
        }

        response
            .json::<T>()
            .map_err(|err| TrackingError::MalformedResponse {
                message: err.to_string(),
            })
    }
}

impl TrackingApi for HttpTrackingClient {
    fn outposts(&self) -> TrackingResult<Vec<Outpost>> {
        let list: OutpostList = self.get_json(OUTPOSTS_PATH, &[])?;
        Ok(list.into_outposts())
    }

    fn member_tracking(&self, credentials: &Credentials) -> TrackingResult<Vec<LocationRecord>> {
        let query = [
            ("keyID", credentials.key_id().to_string()),
            ("vCode", credentials.verification_code().to_string()),
            ("extended", "1".to_string()),
        ];
        let response: MemberTrackingResponse = self.get_json(MEMBER_TRACKING_PATH, &query)?;
        Ok(response.into_records())
    }
}

fn user_agent() -> String {
    format!(
        "cynomap-lib/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/scetrov/cynomap-rs"
    )
}

/// Map a non-success status to the matching fatal tracking error.
fn classify_status(status: StatusCode) -> Option<TrackingError> {
    if status.is_success() {
        return None;
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Some(TrackingError::Unauthorized {
            status: status.as_u16(),
        });
    }
    Some(TrackingError::Unreachable {
        message: format!("unexpected HTTP status {status}"),
    })
}

#[derive(Debug, Deserialize)]
struct OutpostList {
    #[serde(default)]
    outposts: Vec<OutpostRow>,
}

#[derive(Debug, Deserialize)]
struct OutpostRow {
    #[serde(rename = "stationID")]
    station_id: LocationId,
    #[serde(rename = "solarSystemID")]
    solar_system_id: SystemId,
}

impl OutpostList {
    fn into_outposts(self) -> Vec<Outpost> {
        self.outposts
            .into_iter()
            .map(|row| Outpost {
                facility_id: row.station_id,
                system_id: row.solar_system_id,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct MemberTrackingResponse {
    #[serde(default)]
    members: Vec<MemberRow>,
}

#[derive(Debug, Deserialize)]
struct MemberRow {
    name: String,
    #[serde(rename = "locationID", default)]
    location_id: Option<LocationId>,
}

impl MemberTrackingResponse {
    fn into_records(self) -> Vec<LocationRecord> {
        self.members
            .into_iter()
            .map(|row| LocationRecord {
                member_name: row.name,
                location_id: row.location_id.filter(|id| *id > 0),
            })
            .collect()
    }
}
