//! Query parameter types shared by handlers that are not tied to a model.

use serde::Deserialize;

/// `GET /locations/autocomplete?q=&session_token=`.
#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    #[serde(default)]
    pub q: String,
    #[serde(alias = "sessionToken")]
    pub session_token: Option<String>,
}

/// `GET /locations/geocode?address=`.
#[derive(Debug, Deserialize)]
pub struct GeocodeParams {
    #[serde(default)]
    pub address: String,
}
