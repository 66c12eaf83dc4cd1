use std::fmt;
use std::path::PathBuf;

use reqwest::Client;

use crate::error::UpdateError;

/// Where an HTML document is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// HTTP(S) URL fetched with a GET request.
    Remote(String),
    /// File on the local filesystem.
    Local(PathBuf),
}

impl DocumentSource {
    /// Loads the whole document as text.
    ///
    /// Local files are decoded lossily. A version string containing invalid UTF-8
    /// comes back with U+FFFD in it, never matches the raw file bytes, and the
    /// patch step then reports `UpdateOutcome::VersionNotInFile`.
    ///
    /// # Errors
    ///
    /// Returns `UpdateError::Fetch` naming the URL or path when the request fails,
    /// the server answers with a non-success status, or the file cannot be read.
    pub async fn fetch(&self, client: &Client) -> Result<String, UpdateError> {
        match self {
            DocumentSource::Remote(url) => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .and_then(|response| response.error_for_status())
                    .map_err(|e| UpdateError::fetch(url.as_str(), e))?;

                response
                    .text()
                    .await
                    .map_err(|e| UpdateError::fetch(url.as_str(), e))
            }
            DocumentSource::Local(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .map_err(|e| UpdateError::fetch(path.display().to_string(), e))?;

                // Only the extracted text matters here; the patch step rereads raw bytes
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Remote(url) => f.write_str(url),
            DocumentSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}
