use thiserror::Error;

/// Failure modes for a single route fetch. Every failure is terminal for that
/// fetch; this layer never retries.
#[derive(Debug, Error)]
pub enum GetError {
    #[error("unable to build the request URL: {0}")]
    InvalidRequest(String),
    #[error("the request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("the request failed with status code: {0}")]
    ResponseStatus(reqwest::StatusCode),
    #[error("the response body could not be read: {0}")]
    ResponseBody(#[source] reqwest::Error),
    #[error("unexpected content type or empty response body")]
    UnexpectedFormat,
    #[error("unable to parse the response body: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Failure modes for a single photo upload.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("unable to prepare the photo part: {0}")]
    Encoding(String),
    #[error("unable to build the upload URL: {0}")]
    InvalidRequest(String),
    #[error("the upload request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("the upload failed with status code: {0}")]
    ResponseStatus(reqwest::StatusCode),
}
