//! HTTP clients for the Google services used in shoot planning.
//!
//! - [`maps`] -- place autocomplete, geocoding, and place details.
//! - [`calendar`] -- create a calendar event for a shoot.
//! - [`docs`] -- create a planning document for a shoot.
//!
//! All clients share one [`reqwest::Client`] and take their base URL from
//! [`GoogleConfig`] so tests can point them at a local mock server.

pub mod calendar;
pub mod config;
pub mod docs;
pub mod error;
pub mod maps;

pub use calendar::CalendarClient;
pub use config::GoogleConfig;
pub use docs::DocsClient;
pub use error::GoogleApiError;
pub use maps::MapsClient;

/// Return the response unchanged on a 2xx status, otherwise an
/// [`GoogleApiError::Api`] carrying the status and body text.
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, GoogleApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(GoogleApiError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

/// Parse a successful JSON response body into the expected type.
pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, GoogleApiError> {
    let response = ensure_success(response).await?;
    Ok(response.json::<T>().await?)
}
