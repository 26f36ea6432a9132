use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Anything other than 200 OK ends the run.
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("chart feed: {0}")]
    Chart(String),

    #[error("chart feed body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid feed url: {0}")]
    Url(#[from] url::ParseError),
}

impl ScrapeError {
    /// Status code of a rejected response, if that is what failed.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ScrapeError::Status(code) => Some(*code),
            _ => None,
        }
    }
}
