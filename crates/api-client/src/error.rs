use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to send the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The API returned status {0} for {1}")]
    Status(reqwest::StatusCode, String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),
}
