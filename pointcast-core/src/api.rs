//! api.weather.gov client.
//!
//! Three GET endpoints, decoded into the narrow views the app renders:
//!
//! 1. `/points/{lat},{lon}` — resolve a coordinate to its forecast grid cell
//!    and owning office
//! 2. `/gridpoints/{office}/{x},{y}/forecast` — multi-period forecast for a
//!    grid cell
//! 3. `/alerts?area={area}&active=true` — active alerts for a state/area code
//!
//! Side effects stay out of the reducer: the runtime spawns one async task per
//! fetch, and the task sends a `Did*` result action back over the action
//! channel. There is no retry, backoff, or request timeout; a failure settles
//! the request slot once and nothing further happens automatically.
//!
//! The geocoding helper at the bottom hits Open-Meteo instead; it runs once at
//! startup to turn `--place` into a coordinate and is best-effort only.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::request::{GridKey, PointKey};

/// Public NWS API, fixed apart from test overrides.
pub const DEFAULT_BASE_URL: &str = "https://api.weather.gov";

// api.weather.gov rejects requests without an identifying User-Agent.
const USER_AGENT: &str = concat!("pointcast/", env!("CARGO_PKG_VERSION"));

/// Network or decode failure for any of the three fetches.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

/// HTTP client for api.weather.gov with connection pooling and the mandatory
/// User-Agent header. Cheap to clone; clones share the pool.
#[derive(Clone, Debug)]
pub struct NwsClient {
    http: reqwest::Client,
    base_url: String,
}

impl NwsClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Resolve a coordinate to its grid cell and owning forecast office.
    pub async fn point(&self, key: PointKey) -> Result<PointInfo, FetchError> {
        let url = format!("{}/points/{}", self.base_url, key);
        let response: PointsResponse = self.get_json(&url).await?;
        Ok(response.into_info())
    }

    /// Fetch the multi-period forecast for a resolved grid cell.
    pub async fn forecast(&self, key: &GridKey) -> Result<Forecast, FetchError> {
        let url = format!("{}/gridpoints/{}/forecast", self.base_url, key);
        let response: ForecastResponse = self.get_json(&url).await?;
        Ok(response.properties)
    }

    /// Fetch the active alerts for a state/area code.
    pub async fn active_alerts(&self, area: &str) -> Result<Vec<Alert>, FetchError> {
        let url = format!("{}/alerts?area={}&active=true", self.base_url, area);
        let response: AlertsResponse = self.get_json(&url).await?;
        Ok(response
            .features
            .into_iter()
            .map(|feature| feature.properties)
            .collect())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .header("accept", "application/geo+json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response.json().await?)
    }
}

impl Default for NwsClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Points endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    /// Owning forecast office ("county warning area"), e.g. "LOX".
    cwa: String,
    #[serde(rename = "gridId")]
    grid_id: String,
    #[serde(rename = "gridX")]
    grid_x: i32,
    #[serde(rename = "gridY")]
    grid_y: i32,
    #[serde(rename = "relativeLocation", default)]
    relative_location: Option<RelativeLocation>,
}

#[derive(Debug, Deserialize)]
struct RelativeLocation {
    properties: RelativeLocationProperties,
}

#[derive(Debug, Deserialize)]
struct RelativeLocationProperties {
    city: String,
    state: String,
}

impl PointsResponse {
    fn into_info(self) -> PointInfo {
        let properties = self.properties;
        let locality = properties
            .relative_location
            .map(|loc| format!("{}, {}", loc.properties.city, loc.properties.state));
        PointInfo {
            office: properties.cwa,
            grid_id: properties.grid_id,
            grid_x: properties.grid_x,
            grid_y: properties.grid_y,
            locality,
        }
    }
}

/// What the app keeps from a gridpoint lookup: the office identifier that
/// becomes the resolved station, the grid cell indices routing the forecast
/// request, and a human-readable nearby locality.
#[derive(Clone, Debug, PartialEq)]
pub struct PointInfo {
    pub office: String,
    pub grid_id: String,
    pub grid_x: i32,
    pub grid_y: i32,
    pub locality: Option<String>,
}

// ============================================================================
// Forecast endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: Forecast,
}

/// Multi-period forecast for one grid cell.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Forecast {
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "isDaytime")]
    pub is_daytime: bool,
    pub temperature: i64,
    #[serde(rename = "temperatureUnit")]
    pub temperature_unit: String,
    #[serde(rename = "windSpeed", default)]
    pub wind_speed: String,
    #[serde(rename = "windDirection", default)]
    pub wind_direction: String,
    #[serde(rename = "probabilityOfPrecipitation", default)]
    pub precipitation: Option<QuantitativeValue>,
    #[serde(rename = "shortForecast", default)]
    pub short_forecast: String,
    #[serde(rename = "detailedForecast", default)]
    pub detailed_forecast: String,
}

impl ForecastPeriod {
    /// Chance of precipitation as a whole percentage, when reported.
    pub fn precip_chance(&self) -> Option<i64> {
        self.precipitation
            .as_ref()
            .and_then(|quantity| quantity.value)
            .map(|value| value.round() as i64)
    }
}

/// NWS wraps many numeric fields as `{ unitCode, value }` with nullable value.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct QuantitativeValue {
    #[serde(default)]
    pub value: Option<f64>,
}

// ============================================================================
// Alerts endpoint
// ============================================================================

#[derive(Debug, Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
struct AlertFeature {
    properties: Alert,
}

/// One active alert, as rendered in the alerts panel.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Alert {
    pub event: String,
    pub severity: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(rename = "areaDesc", default)]
    pub area_desc: String,
    #[serde(default)]
    pub onset: Option<String>,
    #[serde(default)]
    pub ends: Option<String>,
}

// ============================================================================
// Geocoding (Open-Meteo) — startup `--place` lookup only
// ============================================================================

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("no match for place {0:?}")]
    NotFound(String),
}

/// A named place resolved to a coordinate.
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    admin1: Option<String>,
}

/// Resolve a place name to a coordinate using the Open-Meteo geocoding API.
pub async fn geocode_place(place: &str) -> Result<Place, GeocodeError> {
    let url = format!(
        "https://geocoding-api.open-meteo.com/v1/search?name={}&count=1&language=en",
        urlencoding::encode(place)
    );

    let response = reqwest::get(&url).await?;
    let data: GeocodingResponse = response.json().await?;

    data.results
        .and_then(|results| results.into_iter().next())
        .map(|result| {
            let name = match &result.admin1 {
                Some(region) => format!("{}, {}", result.name, region),
                None => result.name,
            };
            Place {
                name,
                lat: result.latitude,
                lon: result.longitude,
            }
        })
        .ok_or_else(|| GeocodeError::NotFound(place.to_string()))
}
