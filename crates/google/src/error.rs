/// Errors from the Google API clients.
#[derive(Debug, thiserror::Error)]
pub enum GoogleApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Google returned a non-2xx status, or a 200 with an error `status`
    /// field (the Maps web services do this).
    #[error("Google API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The integration has no credentials configured.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The lookup succeeded but matched nothing.
    #[error("No results for {0}")]
    NoResults(String),

    /// A configured base URL cannot carry a path.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}
