// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("HTTP Error: {0}")]
    Http(String),
    #[error("CMS Error ({status}): {message}")]
    Cms { status: u16, message: String },
    #[error("Decode Error: {0}")]
    Decode(String),
    #[error("Image URL Error: {0}")]
    ImageUrl(#[from] ImageUrlError),
    #[error("Layout Error: {0}")]
    Layout(String),
    #[error("Usage Error: {0}")]
    Usage(String),
}

/// Reasons an image-transformation URL cannot be built for an asset.
///
/// None of these are fatal: the display URL resolver falls back to the raw
/// asset URL, and to "skip rendering" when that is missing too.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageUrlError {
    /// The gallery item carries neither an asset reference nor a URL.
    #[error("no image source")]
    MissingSource,

    /// The asset id does not follow the `image-<hash>-<w>x<h>-<format>` shape.
    #[error("malformed asset id: {0}")]
    MalformedAssetId(String),

    /// No CMS project id / dataset is configured for the CDN endpoint.
    #[error("missing project id or dataset")]
    MissingProject,
}

impl Error {
    /// Returns a stable message key for this error, for front ends that
    /// localize or group failures.
    #[must_use]
    pub fn message_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Http(_) => "error-http",
            Error::Cms { .. } => "error-cms-query",
            Error::Decode(_) => "error-decode",
            Error::ImageUrl(_) => "error-image-url",
            Error::Layout(_) => "error-layout",
            Error::Usage(_) => "error-usage",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Usage(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Http(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
