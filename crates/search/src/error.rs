use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Throttled after {0} attempts")]
    Throttled(u32),

    #[error("Failed to parse page markup: {0}")]
    Markup(String),

    #[error("Invalid search settings: {0}")]
    Settings(String),
}
