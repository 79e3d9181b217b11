//! Image sources for the slideshow: identifier parsing, byte fetching and
//! decoding into GPU-ready RGBA.
//!
//! - [`ImageSource`] turns user input (`photos/a.jpg`, `~/b.png`,
//!   `file:///c.png`, `https://host/d.jpg`) into a local path or remote URL.
//! - [`SourceFetcher`] reads local files or downloads remote ones with a
//!   blocking HTTP client. It is meant to run on loader worker threads.
//! - [`decode_rgba`] decodes the bytes and flips rows so row zero is the
//!   bottom of the image, matching the renderer's UV origin.

mod decode;
mod fetch;
mod source;

use std::path::PathBuf;

pub use decode::{decode_rgba, DecodedImage};
pub use fetch::SourceFetcher;
pub use source::ImageSource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("image source must not be empty")]
    Empty,
    #[error("invalid image url '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },
    #[error("unsupported url scheme '{0}'; expected http, https or file")]
    UnsupportedScheme(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode {label}: {source}")]
    Decode {
        label: String,
        #[source]
        source: image::ImageError,
    },
}
