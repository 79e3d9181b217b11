use std::fs;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::debug;

use crate::{ImageSource, SourceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads image bytes from disk or over HTTP. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    http: Client,
}

impl SourceFetcher {
    pub fn new() -> Result<Self, SourceError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("fadeshow/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| SourceError::Http {
                url: "<client>".into(),
                source,
            })?;
        Ok(Self { http })
    }

    pub fn fetch(&self, source: &ImageSource) -> Result<Vec<u8>, SourceError> {
        match source {
            ImageSource::Local(path) => {
                debug!(path = %path.display(), "reading image file");
                fs::read(path).map_err(|err| SourceError::Io {
                    path: path.clone(),
                    source: err,
                })
            }
            ImageSource::Remote(url) => {
                debug!(%url, "downloading image");
                let http_error = |source| SourceError::Http {
                    url: url.to_string(),
                    source,
                };
                let response = self
                    .http
                    .get(url.clone())
                    .send()
                    .map_err(http_error)?
                    .error_for_status()
                    .map_err(http_error)?;
                let bytes = response.bytes().map_err(http_error)?;
                Ok(bytes.to_vec())
            }
        }
    }
}
