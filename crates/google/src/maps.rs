//! Google Maps web services: place autocomplete, geocoding, place details.
//!
//! These endpoints answer HTTP 200 even on failure and report the outcome
//! in a top-level `status` field, so every response goes through
//! [`check_maps_status`] after the HTTP status check.

use serde::{Deserialize, Serialize};

use crate::error::GoogleApiError;
use crate::parse_response;

/// Queries shorter than this (after trimming) are answered with no
/// suggestions and never reach Google.
pub const MIN_AUTOCOMPLETE_CHARS: usize = 3;

/// Client for the Maps web services.
pub struct MapsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
    pub main_text: String,
    pub secondary_text: Option<String>,
}

/// Best match for a free-text address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: String,
}

/// Details for a single place id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceDetails {
    pub place_id: String,
    pub name: String,
    pub formatted_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// ---- wire types ----

#[derive(Deserialize)]
struct AutocompleteResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
struct Prediction {
    place_id: String,
    description: String,
    structured_formatting: Option<StructuredFormatting>,
}

#[derive(Deserialize)]
struct StructuredFormatting {
    main_text: String,
    secondary_text: Option<String>,
}

#[derive(Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeEntry>,
}

#[derive(Deserialize)]
struct GeocodeEntry {
    formatted_address: String,
    geometry: Geometry,
    place_id: String,
}

#[derive(Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct DetailsResponse {
    status: String,
    error_message: Option<String>,
    result: Option<DetailsEntry>,
}

#[derive(Deserialize)]
struct DetailsEntry {
    place_id: String,
    name: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
}

/// Outcome of a Maps `status` field.
#[derive(Debug, PartialEq, Eq)]
enum MapsStatus {
    Ok,
    Empty,
}

/// Classify the Maps `status` string. `ZERO_RESULTS` and `NOT_FOUND` are
/// empty answers; anything other than `OK` is an upstream error.
fn check_maps_status(status: &str, message: Option<String>) -> Result<MapsStatus, GoogleApiError> {
    match status {
        "OK" => Ok(MapsStatus::Ok),
        "ZERO_RESULTS" | "NOT_FOUND" => Ok(MapsStatus::Empty),
        other => Err(GoogleApiError::Api {
            status: 200,
            body: match message {
                Some(m) => format!("{other}: {m}"),
                None => other.to_string(),
            },
        }),
    }
}

impl MapsClient {
    /// Create a client for the Maps web services.
    ///
    /// * `base_url` - e.g. `https://maps.googleapis.com/maps/api`.
    /// * `api_key` - `None` disables every call with
    ///   [`GoogleApiError::NotConfigured`].
    pub fn with_client(client: reqwest::Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    fn key(&self) -> Result<&str, GoogleApiError> {
        self.api_key
            .as_deref()
            .ok_or(GoogleApiError::NotConfigured("Google Maps"))
    }

    /// Suggest places matching a partial query.
    ///
    /// Queries under [`MIN_AUTOCOMPLETE_CHARS`] return an empty list.
    /// `session_token` groups a user's keystrokes into one billing session.
    pub async fn autocomplete(
        &self,
        query: &str,
        session_token: Option<&str>,
    ) -> Result<Vec<PlaceSuggestion>, GoogleApiError> {
        let key = self.key()?;
        let query = query.trim();
        if query.chars().count() < MIN_AUTOCOMPLETE_CHARS {
            return Ok(Vec::new());
        }

        let mut params = vec![("input", query), ("key", key)];
        if let Some(token) = session_token {
            params.push(("sessiontoken", token));
        }

        let response = self
            .client
            .get(format!("{}/place/autocomplete/json", self.base_url))
            .query(&params)
            .send()
            .await?;
        let body: AutocompleteResponse = parse_response(response).await?;

        if check_maps_status(&body.status, body.error_message)? == MapsStatus::Empty {
            return Ok(Vec::new());
        }

        Ok(body
            .predictions
            .into_iter()
            .map(|p| {
                let (main_text, secondary_text) = match p.structured_formatting {
                    Some(f) => (f.main_text, f.secondary_text),
                    None => (p.description.clone(), None),
                };
                PlaceSuggestion {
                    place_id: p.place_id,
                    description: p.description,
                    main_text,
                    secondary_text,
                }
            })
            .collect())
    }

    /// Geocode a free-text address to its best match.
    pub async fn geocode(&self, address: &str) -> Result<GeocodeResult, GoogleApiError> {
        let key = self.key()?;
        let response = self
            .client
            .get(format!("{}/geocode/json", self.base_url))
            .query(&[("address", address), ("key", key)])
            .send()
            .await?;
        let body: GeocodeResponse = parse_response(response).await?;

        check_maps_status(&body.status, body.error_message)?;
        let entry = body
            .results
            .into_iter()
            .next()
            .ok_or_else(|| GoogleApiError::NoResults(address.to_string()))?;

        Ok(GeocodeResult {
            formatted_address: entry.formatted_address,
            latitude: entry.geometry.location.lat,
            longitude: entry.geometry.location.lng,
            place_id: entry.place_id,
        })
    }

    /// Look up name, address, and coordinates for a place id.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, GoogleApiError> {
        let key = self.key()?;
        let response = self
            .client
            .get(format!("{}/place/details/json", self.base_url))
            .query(&[
                ("place_id", place_id),
                ("fields", "place_id,name,formatted_address,geometry"),
                ("key", key),
            ])
            .send()
            .await?;
        let body: DetailsResponse = parse_response(response).await?;

        check_maps_status(&body.status, body.error_message)?;
        let entry = body
            .result
            .ok_or_else(|| GoogleApiError::NoResults(place_id.to_string()))?;

        let name = entry
            .name
            .or_else(|| entry.formatted_address.clone())
            .unwrap_or_else(|| entry.place_id.clone());
        Ok(PlaceDetails {
            place_id: entry.place_id,
            name,
            formatted_address: entry.formatted_address,
            latitude: entry.geometry.as_ref().map(|g| g.location.lat),
            longitude: entry.geometry.as_ref().map(|g| g.location.lng),
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use mockito::Matcher;

    use super::*;

    fn client(server: &mockito::ServerGuard, key: Option<&str>) -> MapsClient {
        MapsClient::with_client(
            reqwest::Client::new(),
            server.url(),
            key.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn autocomplete_maps_predictions() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/place/autocomplete/json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("input".into(), "Shibuya".into()),
                Matcher::UrlEncoded("key".into(), "k".into()),
                Matcher::UrlEncoded("sessiontoken".into(), "sess-1".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"OK","predictions":[
                    {"place_id":"p1","description":"Shibuya Crossing, Tokyo",
                     "structured_formatting":{"main_text":"Shibuya Crossing","secondary_text":"Tokyo"}},
                    {"place_id":"p2","description":"Shibuya Station"}
                ]}"#,
            )
            .create_async()
            .await;

        let results = client(&server, Some("k"))
            .autocomplete("  Shibuya ", Some("sess-1"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].main_text, "Shibuya Crossing");
        assert_eq!(results[0].secondary_text.as_deref(), Some("Tokyo"));
        assert_eq!(results[1].main_text, "Shibuya Station");
        assert_eq!(results[1].secondary_text, None);
    }

    #[tokio::test]
    async fn short_queries_skip_the_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let results = client(&server, Some("k")).autocomplete(" ab ", None).await.unwrap();
        assert!(results.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let server = mockito::Server::new_async().await;
        let maps = client(&server, None);
        assert!(!maps.is_configured());
        assert_matches!(
            maps.geocode("Tokyo").await,
            Err(GoogleApiError::NotConfigured(_))
        );
    }

    #[tokio::test]
    async fn geocode_takes_first_result() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/geocode/json")
            .match_query(Matcher::UrlEncoded("address".into(), "1 Main St".into()))
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"OK","results":[
                    {"formatted_address":"1 Main St, Springfield","place_id":"g1",
                     "geometry":{"location":{"lat":40.5,"lng":-89.25}}},
                    {"formatted_address":"1 Main St, Shelbyville","place_id":"g2",
                     "geometry":{"location":{"lat":0.0,"lng":0.0}}}
                ]}"#,
            )
            .create_async()
            .await;

        let result = client(&server, Some("k")).geocode("1 Main St").await.unwrap();
        assert_eq!(
            result,
            GeocodeResult {
                formatted_address: "1 Main St, Springfield".into(),
                latitude: 40.5,
                longitude: -89.25,
                place_id: "g1".into(),
            }
        );
    }

    #[tokio::test]
    async fn geocode_zero_results() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/geocode/json")
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"ZERO_RESULTS","results":[]}"#)
            .create_async()
            .await;

        assert_matches!(
            client(&server, Some("k")).geocode("nowhere").await,
            Err(GoogleApiError::NoResults(q)) if q == "nowhere"
        );
    }

    #[tokio::test]
    async fn denied_status_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/place/details/json")
            .match_query(Matcher::Any)
            .with_body(r#"{"status":"REQUEST_DENIED","error_message":"bad key"}"#)
            .create_async()
            .await;

        assert_matches!(
            client(&server, Some("k")).place_details("p1").await,
            Err(GoogleApiError::Api { status: 200, body }) if body == "REQUEST_DENIED: bad key"
        );
    }

    #[tokio::test]
    async fn http_errors_carry_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/place/details/json")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        assert_matches!(
            client(&server, Some("k")).place_details("p1").await,
            Err(GoogleApiError::Api { status: 500, body }) if body == "boom"
        );
    }

    #[tokio::test]
    async fn place_details_fields() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/place/details/json")
            .match_query(Matcher::UrlEncoded("place_id".into(), "p9".into()))
            .with_body(
                r#"{"status":"OK","result":{"place_id":"p9","name":"Old Mill",
                    "formatted_address":"Mill Rd","geometry":{"location":{"lat":1.5,"lng":2.5}}}}"#,
            )
            .create_async()
            .await;

        let details = client(&server, Some("k")).place_details("p9").await.unwrap();
        assert_eq!(details.name, "Old Mill");
        assert_eq!(details.formatted_address.as_deref(), Some("Mill Rd"));
        assert_eq!(details.latitude, Some(1.5));
        assert_eq!(details.longitude, Some(2.5));
    }
}
