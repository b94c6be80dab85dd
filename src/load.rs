//! Loads [`Article`]s from the JSON data file. The data file is a JSON array
//! of article objects and may live on disk or behind an `http(s)` URL. Every
//! call to [`load`] reads the source afresh; nothing is cached between pages.

use crate::article::Article;
use log::{debug, info};
use reqwest::header::CACHE_CONTROL;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Where the article data comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    /// A JSON file on disk.
    Path(PathBuf),

    /// A JSON document served over HTTP(S).
    Url(Url),
}

impl Source {
    /// Interprets `s` as a source. `http` and `https` URLs are fetched over
    /// the network, `file` URLs and anything that isn't a URL are read from
    /// disk, with relative paths resolved against `root`.
    pub fn parse(s: &str, root: &Path) -> Source {
        match Url::parse(s) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Source::Url(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Source::Path(path),
                Err(()) => Source::Path(root.join(s)),
            },
            _ => Source::Path(root.join(s)),
        }
    }

    /// Retrieves the raw bytes of the document.
    fn fetch(&self) -> std::result::Result<Vec<u8>, FetchError> {
        match self {
            Source::Path(path) => Ok(std::fs::read(path)?),
            Source::Url(url) => {
                // The data changes between page views, so intermediate caches
                // must not answer for it.
                let response = reqwest::blocking::Client::new()
                    .get(url.as_str())
                    .header(CACHE_CONTROL, "no-store")
                    .send()?
                    .error_for_status()?;
                Ok(response.bytes()?.to_vec())
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Reads and parses the articles from `source`, in document order.
pub fn load(source: &Source) -> Result<Vec<Article>> {
    debug!("loading articles from {}", source);
    let bytes = source.fetch().map_err(|err| Error::Fetch {
        source: source.to_string(),
        err,
    })?;
    let articles = parse_articles(&bytes).map_err(|err| Error::Parse {
        source: source.to_string(),
        err,
    })?;
    info!("loaded {} articles from {}", articles.len(), source);
    Ok(articles)
}

/// Parses a JSON array of article objects.
pub fn parse_articles(bytes: &[u8]) -> serde_json::Result<Vec<Article>> {
    serde_json::from_slice(bytes)
}

/// The result of a load operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a failure to load articles.
#[derive(Debug)]
pub enum Error {
    /// Returned when the document couldn't be retrieved.
    Fetch { source: String, err: FetchError },

    /// Returned when the document isn't a JSON array of articles.
    Parse {
        source: String,
        err: serde_json::Error,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Fetch { source, err } => {
                write!(f, "Fetching articles from '{}': {}", source, err)
            }
            Error::Parse { source, err } => {
                write!(f, "Parsing articles from '{}': {}", source, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Fetch { source: _, err } => Some(err),
            Error::Parse { source: _, err } => Some(err),
        }
    }
}

/// The transport-level cause of an [`Error::Fetch`].
#[derive(Debug)]
pub enum FetchError {
    /// Returned when reading a file fails.
    Io(io::Error),

    /// Returned when the HTTP request fails or answers with an error status.
    Http(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::Io(err) => write!(f, "{}", err),
            FetchError::Http(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Io(err) => Some(err),
            FetchError::Http(err) => Some(err),
        }
    }
}

impl From<io::Error> for FetchError {
    /// Converts an [`io::Error`] into a [`FetchError`]. This allows us to use
    /// the `?` operator for file reads.
    fn from(err: io::Error) -> FetchError {
        FetchError::Io(err)
    }
}

impl From<reqwest::Error> for FetchError {
    /// Converts a [`reqwest::Error`] into a [`FetchError`]. This allows us to
    /// use the `?` operator for HTTP requests.
    fn from(err: reqwest::Error) -> FetchError {
        FetchError::Http(err)
    }
}
