use crate::booking::{parse_bookings, Booking};
use serde_json::Value;
use std::fmt::Debug;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can list the bookings made for a venue
pub(crate) trait BookingSource: Debug {
    fn fetch(&self, venue: &str) -> Result<Vec<Booking>, SourceError>;
}

impl<T: BookingSource + ?Sized> BookingSource for Box<T> {
    fn fetch(&self, venue: &str) -> Result<Vec<Booking>, SourceError> {
        (**self).fetch(venue)
    }
}

/// Bookings stored as JSON in a local file.  Bookings for halls other than
/// the one asked about are skipped.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub(crate) fn new(path: PathBuf) -> FileSource {
        FileSource { path }
    }
}

impl BookingSource for FileSource {
    fn fetch(&self, venue: &str) -> Result<Vec<Booking>, SourceError> {
        let src = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let value =
            serde_json::from_str::<Value>(&src).map_err(|source| SourceError::Json {
                origin: self.path.display().to_string(),
                source,
            })?;
        let mut bookings = parse_bookings(&value);
        bookings.retain(|b| b.is_for_venue(venue));
        tracing::info!(path = %self.path.display(), venue, count = bookings.len(), "loaded bookings from file");
        Ok(bookings)
    }
}

/// The booking API's `GET /api/bookings?hall_id=…` endpoint.  As with
/// [`FileSource`], bookings for other halls in the response are skipped.
#[derive(Clone, Debug)]
pub(crate) struct ApiSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl ApiSource {
    pub(crate) fn new(base_url: &str) -> Result<ApiSource, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|source| SourceError::Http {
                url: base_url.to_owned(),
                source,
            })?;
        Ok(ApiSource {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn bookings_url(&self) -> String {
        format!("{}/api/bookings", self.base_url)
    }
}

impl BookingSource for ApiSource {
    fn fetch(&self, venue: &str) -> Result<Vec<Booking>, SourceError> {
        let url = self.bookings_url();
        tracing::debug!(%url, venue, "fetching bookings");
        let http_err = |source| SourceError::Http {
            url: url.clone(),
            source,
        };
        let value = self
            .client
            .get(&url)
            .query(&[("hall_id", venue)])
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(http_err)?
            .json::<Value>()
            .map_err(http_err)?;
        let mut bookings = parse_bookings(&value);
        let total = bookings.len();
        // The server is not relied upon to honor `hall_id`.
        bookings.retain(|b| b.is_for_venue(venue));
        tracing::info!(
            %url,
            venue,
            count = bookings.len(),
            skipped = total - bookings.len(),
            "fetched bookings"
        );
        Ok(bookings)
    }
}

#[derive(Debug, Error)]
pub(crate) enum SourceError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse bookings from {origin}")]
    Json {
        origin: String,
        source: serde_json::Error,
    },
    #[error("request to {url} failed")]
    Http { url: String, source: reqwest::Error },
}
