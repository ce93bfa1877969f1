use thiserror::Error;

/// Failures surfaced by the metadata provider. Search callers see these
/// directly; the watchlist store swallows them per-show during refresh and
/// keeps the stale record instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("invalid provider URL: {0}")]
    BadUrl(String),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
}
