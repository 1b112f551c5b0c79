use std::sync::Arc;

use shootboard_google::{CalendarClient, DocsClient, MapsClient};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference counted and everything else is
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shootboard_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    pub maps: Arc<MapsClient>,
    pub calendar: Arc<CalendarClient>,
    pub docs: Arc<DocsClient>,
}

impl AppState {
    /// Build the state, constructing the Google clients over one shared
    /// HTTP client.
    pub fn new(pool: shootboard_db::DbPool, config: ServerConfig) -> Result<Self, reqwest::Error> {
        let google = &config.google;
        let http = google.http_client()?;

        let maps = MapsClient::with_client(
            http.clone(),
            google.maps_base_url.clone(),
            google.maps_api_key.clone(),
        );
        let calendar = CalendarClient::with_client(http.clone(), google.calendar_base_url.clone());
        let docs = DocsClient::with_client(http, google.docs_base_url.clone());

        Ok(Self {
            pool,
            config: Arc::new(config),
            maps: Arc::new(maps),
            calendar: Arc::new(calendar),
            docs: Arc::new(docs),
        })
    }
}
