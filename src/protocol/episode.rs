//! Podcast episodes.
//!
//! Episodes appear in two places:
//! * in the `episodes` page of a podcast detail, without podcast data
//! * as the reply of the single-episode endpoint, with a nested `podcast`
//!   object carrying the canonical listing url and the `extra` links
//!
//! # Wire Format
//!
//! ```json
//! {
//!     "id": "ea09b575d07341599d8d5b71f205517b",
//!     "title": "Episode Title",
//!     "pub_date_ms": 1479110402040,
//!     "audio": "https://www.listennotes.com/e/p/ea09b575d07341599d8d5b71f205517b/",
//!     "audio_length_sec": 1897,
//!     "listennotes_url": "https://www.listennotes.com/e/ea09b575d07341599d8d5b71f205517b/",
//!     "podcast": {
//!         "id": "4d3fe717742d4963a85562e9f84d8c79",
//!         "listennotes_url": "https://www.listennotes.com/c/4d3fe717742d4963a85562e9f84d8c79/",
//!         "extra": {
//!             "twitter_handle": "nasa",
//!             "youtube_url": "https://www.youtube.com/watch?v=abc123",
//!             "spotify_url": ""
//!         }
//!     }
//! }
//! ```

use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError, DefaultOnNull, Map};

use super::podcast::Millis;

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Episode {
    pub id: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub title: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub pub_date_ms: Millis,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub thumbnail: String,

    /// Direct audio url.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub audio: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub audio_length_sec: u64,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub listennotes_url: String,

    #[serde(default)]
    pub podcast: Option<EpisodePodcast>,
}

impl Episode {
    /// The provider page of this episode, or of its podcast when the
    /// episode has none of its own.
    #[must_use]
    pub fn source_url(&self) -> &str {
        if !self.listennotes_url.is_empty() {
            return &self.listennotes_url;
        }

        self.podcast
            .as_ref()
            .map(|podcast| podcast.listennotes_url.as_str())
            .unwrap_or_default()
    }

    /// Supplementary links of the podcast in source order.
    #[must_use]
    pub fn extra(&self) -> &[(String, String)] {
        self.podcast
            .as_ref()
            .map(|podcast| podcast.extra.as_slice())
            .unwrap_or_default()
    }
}

/// Podcast data nested in a single-episode reply.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct EpisodePodcast {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub listennotes_url: String,

    /// Free-form `<name>_<kind>` links, kept in source order.
    ///
    /// Values that are not strings decode as empty strings.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<Map<_, DefaultOnError>>")]
    pub extra: Vec<(String, String)>,
}
