/// A shared plan token that could not be decoded.
#[derive(thiserror::Error, Debug)]
pub enum ShareError {
    #[error("share token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("share token is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("share token payload is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// The venue CSV could not be read.
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
