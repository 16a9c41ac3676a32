//! Wire types of the podcast provider's REST API.
//!
//! # Submodules
//!
//! * [`genre`] - Category taxonomy
//! * [`podcast`] - Podcast list pages, search pages, details and random picks
//! * [`episode`] - Episodes and their supplementary links
//!
//! All records are decoded leniently: optional text defaults to an empty
//! string and counters default to zero, so that a sparse provider record
//! still yields a usable catalog entry.

pub mod episode;
pub mod genre;
pub mod podcast;

pub use episode::{Episode, EpisodePodcast};
pub use genre::{Genre, Genres};
pub use podcast::{Podcast, PodcastDetail, PodcastPage, RandomPodcast, SearchPage};

use crate::error::Result;
use serde::Deserialize;
use std::fmt::Debug;

/// Parses and logs JSON responses from the provider.
///
/// # Arguments
///
/// * `body` - Response body text to parse
/// * `origin` - Description of API endpoint for logging
///
/// # Errors
///
/// Returns error if:
/// * Response body is not valid JSON
/// * JSON structure doesn't match type `T`
///
/// # Logging
///
/// * Success: Logs parsed structure at TRACE level
/// * Parse Error: Logs raw JSON at TRACE level if valid JSON
/// * Invalid JSON: Logs error and raw text at ERROR level
pub fn json<T>(body: &str, origin: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Debug,
{
    match serde_json::from_str(body) {
        Ok(result) => {
            trace!("{}: {result:#?}", origin);
            Ok(result)
        }
        Err(e) => {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
                trace!("{}: {json:#?}", origin);
            } else {
                error!("{}: failed parsing response ({e:?})", origin);
                trace!("{body}");
            }
            Err(e.into())
        }
    }
}
