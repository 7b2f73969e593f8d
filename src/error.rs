//! Error handling

/// Everything that can go wrong between reading the receipt and printing the
/// verdict.
#[derive(Debug)]
pub enum VerifyError {
    /// The receipt file couldn't be read.
    Io(std::io::Error),
    /// The receipt couldn't be decoded or re-encoded.
    Image(image::ImageError),
    /// The endpoint URL couldn't be built.
    Url(url::ParseError),
    /// The HTTP request itself failed (connect, timeout, body read).
    Request(reqwest::Error),
    /// The API answered with a non-200 status.
    Api {
        /// HTTP status returned by the API.
        status: reqwest::StatusCode,
        /// Response body, for the logs.
        body: String,
    },
    /// The response envelope was missing the nested answer text.
    MissingContent,
    /// The nested answer text wasn't the JSON object we asked for.
    Parse(String),
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "Failed to read receipt image: {err}"),
            Self::Image(err) => write!(f, "Failed to process receipt image: {err}"),
            Self::Url(err) => write!(f, "Failed to build API URL: {err}"),
            Self::Request(err) => write!(f, "Gemini request failed: {err}"),
            Self::Api { status, body } => {
                write!(f, "Gemini API error: {status} - {body}")
            }
            Self::MissingContent => {
                write!(f, "Gemini response contained no candidate text")
            }
            Self::Parse(detail) => {
                write!(f, "Gemini answer was not valid JSON: {detail}")
            }
        }
    }
}

impl std::error::Error for VerifyError {}

impl From<std::io::Error> for VerifyError {
    fn from(err: std::io::Error) -> Self {
        VerifyError::Io(err)
    }
}

impl From<image::ImageError> for VerifyError {
    fn from(err: image::ImageError) -> Self {
        VerifyError::Image(err)
    }
}

impl From<url::ParseError> for VerifyError {
    fn from(err: url::ParseError) -> Self {
        VerifyError::Url(err)
    }
}

impl From<reqwest::Error> for VerifyError {
    fn from(err: reqwest::Error) -> Self {
        VerifyError::Request(err)
    }
}
