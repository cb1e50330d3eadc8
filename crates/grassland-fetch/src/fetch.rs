//! HTTP retrieval and decoding of source images.
//!
//! The only I/O in the whole system lives here: given a URL, fetch the
//! raw bytes with a request-scoped timeout and decode them into the
//! pipeline's RGB raster format. Transport failures are distinguishable
//! from malformed payloads so callers can decide what is worth
//! retrying.

use std::io::Read;
use std::time::Duration;

use grassland_pipeline::PipelineError;
use grassland_pipeline::types::RgbImage;

/// Options controlling a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Total per-request timeout, bounding unbounded network waits.
    pub timeout: Duration,

    /// Upper bound on accepted response body size. Bodies are read
    /// through a `take` so an endless stream cannot exhaust memory.
    pub max_bytes: u64,
}

impl FetchOptions {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    /// Default response body cap (64 MiB).
    pub const DEFAULT_MAX_BYTES: u64 = 64 * 1024 * 1024;
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            max_bytes: Self::DEFAULT_MAX_BYTES,
        }
    }
}

/// Errors retrieving or decoding a source image.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or transport failure, including timeouts. Retriable by
    /// the caller.
    #[error("transport failure fetching {url}: {source}")]
    Transport {
        /// The requested URL.
        url: String,
        /// The underlying transport error.
        #[source]
        source: Box<ureq::Error>,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP status {status}")]
    Status {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be read to completion.
    #[error("failed reading response body from {url}: {source}")]
    Body {
        /// The requested URL.
        url: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The fetched bytes are not a valid or supported image. Not
    /// retriable; the remote content itself is malformed.
    #[error("response from {url} is not a decodable image: {source}")]
    Decode {
        /// The requested URL.
        url: String,
        /// The underlying decode error.
        #[source]
        source: PipelineError,
    },
}

impl FetchError {
    /// Whether retrying the same request might succeed.
    ///
    /// Transport failures, timeouts, truncated bodies, and server
    /// status errors are transient; a payload that does not decode as
    /// an image will not improve on retry.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        !matches!(self, Self::Decode { .. })
    }
}

/// Fetch raw bytes from `url`.
///
/// # Errors
///
/// Returns [`FetchError::Transport`] on network failure or timeout,
/// [`FetchError::Status`] on a non-success response, and
/// [`FetchError::Body`] when the body cannot be read.
pub fn fetch_bytes(url: &str, options: &FetchOptions) -> Result<Vec<u8>, FetchError> {
    let agent = ureq::AgentBuilder::new().timeout(options.timeout).build();

    let response = agent.get(url).call().map_err(|e| match e {
        ureq::Error::Status(status, _) => FetchError::Status {
            url: url.to_owned(),
            status,
        },
        transport => FetchError::Transport {
            url: url.to_owned(),
            source: Box::new(transport),
        },
    })?;

    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(options.max_bytes)
        .read_to_end(&mut bytes)
        .map_err(|source| FetchError::Body {
            url: url.to_owned(),
            source,
        })?;

    log::debug!("fetched {} bytes from {url}", bytes.len());
    Ok(bytes)
}

/// Fetch and decode a source image into an RGB raster.
///
/// # Errors
///
/// Propagates [`fetch_bytes`] errors and returns [`FetchError::Decode`]
/// when the payload is not a valid image.
pub fn fetch_image(url: &str, options: &FetchOptions) -> Result<RgbImage, FetchError> {
    let bytes = fetch_bytes(url, options)?;
    grassland_pipeline::decode::decode_rgb(&bytes).map_err(|source| FetchError::Decode {
        url: url.to_owned(),
        source,
    })
}
