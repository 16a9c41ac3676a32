//! Podcast records as returned by the provider.
//!
//! The same podcast is described by structurally different payloads
//! depending on the endpoint:
//! * [`Podcast`] - an entry of a best-of list or a search page
//! * [`PodcastDetail`] - a podcast with genre ids and one page of episodes
//! * [`RandomPodcast`] - the single episode-shaped pick of the random
//!   endpoint, which carries a `podcast_id` and one `pub_date_ms` instead of
//!   an `id` and an earliest/latest pair
//!
//! # Wire Format
//!
//! List page:
//! ```json
//! {
//!     "podcasts": [{ "id": "4d3fe717742d4963a85562e9f84d8c79", ... }],
//!     "has_next": true,
//!     "page_number": 2
//! }
//! ```
//!
//! Search page (titles arrive as `title_original`):
//! ```json
//! {
//!     "results": [{ "id": "...", "title_original": "Star Talk", ... }],
//!     "next_offset": 10,
//!     "count": 10,
//!     "total": 322
//! }
//! ```

use std::ops::Deref;

use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};

use super::{episode::Episode, genre::GenreId};

/// Publish timestamp in milliseconds since the Unix epoch.
///
/// Also serves as the episode pagination cursor.
pub type Millis = i64;

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Podcast {
    pub id: String,

    #[serde(default, alias = "title_original")]
    #[serde_as(as = "DefaultOnNull")]
    pub title: String,

    #[serde(default, alias = "publisher_original")]
    #[serde_as(as = "DefaultOnNull")]
    pub publisher: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub thumbnail: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub image: String,

    #[serde(default, alias = "description_original")]
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub total_episodes: u32,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub country: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub language: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub explicit_content: bool,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub earliest_pub_date_ms: Millis,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub latest_pub_date_ms: Millis,
}

/// One page of a best-of listing, with or without genre filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PodcastPage {
    #[serde(default)]
    pub podcasts: Vec<Podcast>,

    #[serde(default)]
    pub has_next: bool,

    #[serde(default)]
    pub page_number: u32,
}

/// One page of podcast search results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<Podcast>,

    /// Offset increment to reach the next page.
    #[serde(default)]
    pub next_offset: u32,

    #[serde(default)]
    pub count: u32,

    #[serde(default)]
    pub total: u32,
}

/// A podcast with its genres and one page of episodes, oldest first.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PodcastDetail {
    #[serde(flatten)]
    pub podcast: Podcast,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub genre_ids: Vec<GenreId>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub episodes: Vec<Episode>,

    /// Cursor to request the page after this one.
    #[serde(default)]
    pub next_episode_pub_date: Option<Millis>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub website: String,
}

impl Deref for PodcastDetail {
    type Target = Podcast;

    fn deref(&self) -> &Self::Target {
        &self.podcast
    }
}

/// Random pick, shaped after the episode it was drawn from.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RandomPodcast {
    pub podcast_id: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub title: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub publisher: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub thumbnail: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub image: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub description: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub audio_length_sec: u64,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub explicit_content: bool,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub pub_date_ms: Millis,
}
