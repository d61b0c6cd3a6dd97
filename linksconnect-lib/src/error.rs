use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to read TOML: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("Failed to write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("The Gemini response contained no text")]
    EmptyResponse,
    #[error("No Gemini API key configured, set GEMINI_API_KEY")]
    MissingApiKey,
    #[error("$HOME must exist")]
    NoHome,
    #[error("Invalid GHIN number: {0}")]
    InvalidGhin(String),
    #[error("A profile needs both a name and a location")]
    IncompleteProfile,
}
