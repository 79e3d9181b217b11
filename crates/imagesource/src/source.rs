use std::fmt;
use std::path::{Path, PathBuf};

use directories_next::BaseDirs;
use reqwest::Url;
use tracing::debug;

use crate::SourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Local(PathBuf),
    Remote(Url),
}

impl ImageSource {
    pub fn parse(input: &str) -> Result<Self, SourceError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SourceError::Empty);
        }

        if trimmed.contains("://") {
            let url = Url::parse(trimmed).map_err(|err| SourceError::InvalidUrl {
                input: trimmed.to_string(),
                reason: err.to_string(),
            })?;
            return match url.scheme() {
                "http" | "https" => Ok(ImageSource::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(ImageSource::Local)
                    .map_err(|_| SourceError::InvalidUrl {
                        input: trimmed.to_string(),
                        reason: "file url does not name a local path".into(),
                    }),
                other => Err(SourceError::UnsupportedScheme(other.to_string())),
            };
        }

        let path = expand_home(trimmed);
        debug!(original = %input, expanded = %path.display(), "parsed local image source");
        Ok(ImageSource::Local(path))
    }

    /// Anchors a relative local path at `base`; absolute paths and URLs are
    /// returned unchanged.
    pub fn with_base(self, base: &Path) -> Self {
        match self {
            ImageSource::Local(path) if path.is_relative() => ImageSource::Local(base.join(path)),
            other => other,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Remote(_))
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Local(path) => write!(f, "{}", path.display()),
            ImageSource::Remote(url) => write!(f, "{url}"),
        }
    }
}

fn expand_home(input: &str) -> PathBuf {
    let rest = if input == "~" {
        Some("")
    } else {
        input.strip_prefix("~/")
    };
    match (rest, BaseDirs::new()) {
        (Some(rest), Some(dirs)) => dirs.home_dir().join(rest),
        _ => PathBuf::from(input),
    }
}
