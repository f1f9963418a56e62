use thiserror::Error;

/// Failure taxonomy for the proxy layer.
///
/// Every variant maps to an HTTP-style status code so the server can hand a
/// structured `{error, status}` payload to the client instead of letting an
/// upstream failure escape the boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// The provider credential is absent. A deployment problem, not user input.
    #[error("Server missing OPENWEATHER_API_KEY")]
    MissingApiKey,

    /// The caller did not supply a city.
    #[error("Missing city")]
    MissingCity,

    /// Upstream answered 404 for a weather lookup.
    #[error("City not found")]
    CityNotFound,

    /// The race against the request timer was lost.
    #[error("Request timed out")]
    Timeout,

    /// Upstream answered with a non-success status. The message is the
    /// upstream body when it had one, otherwise a templated fallback.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// Transport-level failure (send, read, or parse of the upstream body).
    #[error("{0}")]
    Network(String),
}

impl UpstreamError {
    /// Build an [`UpstreamError::Upstream`], preferring the upstream body as
    /// the message and falling back to `fallback` when the body is empty.
    pub fn upstream(status: u16, body: &str, fallback: String) -> Self {
        let trimmed = body.trim();
        let message = if trimmed.is_empty() { fallback } else { truncate(trimmed) };
        UpstreamError::Upstream { status, message }
    }

    /// Status code to surface at the HTTP boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            UpstreamError::MissingApiKey => 500,
            UpstreamError::MissingCity => 400,
            UpstreamError::CityNotFound => 404,
            UpstreamError::Timeout => 500,
            UpstreamError::Upstream { status, .. } => *status,
            UpstreamError::Network(_) => 500,
        }
    }
}

fn truncate(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
