//! Mapping of provider records onto the normalized catalog schema.
//!
//! Three source shapes end up in the same [`CatalogEntry`]:
//! * list and search items through [`catalog_entry`]
//! * the random pick through [`random_entry`], which has its own mapping
//!   because its payload carries different fields
//! * podcast details through [`catalog_detail`], which adds runtime,
//!   locale and the episode list
//!
//! All catalog ids are namespaced as `<namespace>_listennotes_<provider id>`
//! so they cannot collide with ids from other providers.
//!
//! # Output Format
//!
//! ```json
//! {
//!     "id": "podcasts_listennotes_4d3fe717742d4963a85562e9f84d8c79",
//!     "type": "series",
//!     "genres": ["<strong>Episodes: </strong> 120", "..."],
//!     "director": ["NASA"],
//!     "releaseInfo": "2018-2021",
//!     "name": "Houston We Have a Podcast",
//!     "poster": "https://cdn.example.com/thumb.jpg",
//!     "posterShape": "square",
//!     "background": "https://cdn.example.com/image.jpg",
//!     "logo": "https://cdn.example.com/thumb.jpg",
//!     "description": "..."
//! }
//! ```

use serde::Serialize;
use time::{macros::format_description, Duration, OffsetDateTime};

use crate::{
    error::{Error, Result},
    protocol::{podcast::Millis, Episode, Podcast, PodcastDetail, RandomPodcast},
};

/// Provider segment of every catalog id.
pub const PROVIDER: &str = "listennotes";

/// Catalog type of every entry.
pub const SERIES: &str = "series";

/// Poster shape of every entry; podcast artwork is square.
pub const SQUARE: &str = "square";

/// Attribution line closing every info block.
pub const ATTRIBUTION: &str = "<i>Powered by listen notes</i>";

/// Normalized list row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: &'static str,

    /// Human-readable info lines; genre names for details.
    #[serde(rename = "genres")]
    pub info: Vec<String>,

    pub director: Vec<String>,
    pub release_info: String,
    pub name: String,
    pub poster: String,
    pub poster_shape: &'static str,
    pub background: String,
    pub logo: String,
    pub description: String,
}

/// Normalized podcast with all of its episodes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDetail {
    #[serde(flatten)]
    pub entry: CatalogEntry,

    pub runtime: String,
    pub language: String,
    pub country: String,
    pub website: String,
    pub videos: Vec<Video>,
}

/// One episode, presented as a video of a single-season series.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,

    /// Publish time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<String>,

    pub season: u32,
    pub episode: usize,
    pub thumbnail: String,
    pub streams: Vec<VideoStream>,
    pub overview: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VideoStream {
    pub url: String,
}

/// Builds the catalog id of a provider record.
#[must_use]
pub fn catalog_id(namespace: &str, provider_id: &str) -> String {
    format!("{namespace}_{PROVIDER}_{provider_id}")
}

/// Extracts the provider id from a catalog id: its third `_`-separated
/// segment.
///
/// # Errors
///
/// Will return `Err` if the catalog id has fewer than three segments, or if
/// the provider id is not made of ASCII letters and digits only.
pub fn provider_id(catalog_id: &str) -> Result<&str> {
    catalog_id
        .split('_')
        .nth(2)
        .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric()))
        .ok_or_else(|| Error::invalid_argument(format!("malformed catalog id: {catalog_id}")))
}

/// Calendar year (UTC) of a millisecond timestamp.
#[must_use]
pub fn year(ms: Millis) -> Option<i32> {
    OffsetDateTime::UNIX_EPOCH
        .checked_add(Duration::milliseconds(ms))
        .map(OffsetDateTime::year)
}

/// A single year when both are equal, a `begin-end` range otherwise.
#[must_use]
pub fn format_release_info(begin: i32, end: i32) -> String {
    if begin == end {
        begin.to_string()
    } else {
        format!("{begin}-{end}")
    }
}

fn release_info(earliest: Millis, latest: Millis) -> String {
    match (year(earliest), year(latest)) {
        (Some(begin), Some(end)) => format_release_info(begin, end),
        (Some(year), None) | (None, Some(year)) => year.to_string(),
        (None, None) => String::new(),
    }
}

/// Millisecond timestamp as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
#[must_use]
pub fn released(ms: Millis) -> Option<String> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );

    OffsetDateTime::UNIX_EPOCH
        .checked_add(Duration::milliseconds(ms))
        .and_then(|at| at.format(&format).ok())
}

/// Mean audio length in whole minutes, rounded down.
///
/// Returns `None` for a podcast without episodes.
#[must_use]
pub fn average_episode_minutes(episodes: &[Episode]) -> Option<u64> {
    let count = u64::try_from(episodes.len()).ok().filter(|&n| n > 0)?;
    let total = episodes
        .iter()
        .fold(0_u64, |total, e| total.saturating_add(e.audio_length_sec));
    Some(total / count / 60)
}

fn explicit_line(explicit: bool) -> String {
    format!(
        "<strong>Explicit content: </strong> {}",
        if explicit { "yes" } else { "no" }
    )
}

/// Maps a list or search item.
#[must_use]
pub fn catalog_entry(namespace: &str, podcast: &Podcast) -> CatalogEntry {
    CatalogEntry {
        id: catalog_id(namespace, &podcast.id),
        kind: SERIES,
        info: vec![
            format!("<strong>Episodes: </strong> {}", podcast.total_episodes),
            format!("<strong>Country: </strong> {}", podcast.country),
            format!("<strong>Language: </strong> {}", podcast.language),
            explicit_line(podcast.explicit_content),
            ATTRIBUTION.to_owned(),
        ],
        director: vec![podcast.publisher.clone()],
        release_info: release_info(podcast.earliest_pub_date_ms, podcast.latest_pub_date_ms),
        name: podcast.title.clone(),
        poster: podcast.thumbnail.clone(),
        poster_shape: SQUARE,
        background: podcast.image.clone(),
        logo: podcast.thumbnail.clone(),
        description: podcast.description.clone(),
    }
}

/// Maps the random pick.
#[must_use]
pub fn random_entry(namespace: &str, pick: &RandomPodcast) -> CatalogEntry {
    CatalogEntry {
        id: catalog_id(namespace, &pick.podcast_id),
        kind: SERIES,
        info: vec![
            format!(
                "<strong>Length: </strong> {} minutes",
                pick.audio_length_sec / 60
            ),
            explicit_line(pick.explicit_content),
            ATTRIBUTION.to_owned(),
        ],
        director: vec![pick.publisher.clone()],
        release_info: year(pick.pub_date_ms).map(|year| year.to_string()).unwrap_or_default(),
        name: pick.title.clone(),
        poster: pick.thumbnail.clone(),
        poster_shape: SQUARE,
        background: pick.image.clone(),
        logo: pick.thumbnail.clone(),
        description: pick.description.clone(),
    }
}

/// Maps a podcast whose episode list has been fully gathered.
///
/// `id` is the catalog id the podcast was requested with, and `genres` the
/// names of its categories as resolved by [`crate::genres::ids_to_genres`].
#[must_use]
pub fn catalog_detail(
    id: &str,
    namespace: &str,
    detail: &PodcastDetail,
    genres: Vec<String>,
) -> CatalogDetail {
    let release_info = release_info(detail.earliest_pub_date_ms, detail.latest_pub_date_ms);
    let runtime = match average_episode_minutes(&detail.episodes) {
        Some(minutes) => format!("{release_info} | Average episode length: {minutes} minutes"),
        None => format!("{release_info} | Average episode length: unavailable"),
    };

    let videos = detail
        .episodes
        .iter()
        .enumerate()
        .map(|(i, episode)| video(namespace, episode, i + 1))
        .collect();

    CatalogDetail {
        entry: CatalogEntry {
            id: id.to_owned(),
            kind: SERIES,
            info: genres,
            director: vec![detail.publisher.clone()],
            release_info,
            name: detail.title.clone(),
            poster: detail.thumbnail.clone(),
            poster_shape: SQUARE,
            background: detail.image.clone(),
            logo: detail.thumbnail.clone(),
            description: detail.description.clone(),
        },
        runtime,
        language: detail.language.clone(),
        country: detail.country.clone(),
        website: detail.website.clone(),
        videos,
    }
}

/// Maps episode `number` (1-based) into the single season.
fn video(namespace: &str, episode: &Episode, number: usize) -> Video {
    Video {
        id: catalog_id(namespace, &episode.id),
        title: episode.title.clone(),
        released: released(episode.pub_date_ms),
        season: 1,
        episode: number,
        thumbnail: episode.thumbnail.clone(),
        streams: vec![VideoStream {
            url: episode.audio.clone(),
        }],
        overview: episode.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // 2018-03-01T12:00:00Z and 2021-06-15T08:30:00.250Z
    const MARCH_2018: Millis = 1_519_905_600_000;
    const JUNE_2021: Millis = 1_623_745_800_250;

    fn podcast() -> Podcast {
        Podcast {
            id: "abc".to_owned(),
            title: "Houston We Have a Podcast".to_owned(),
            publisher: "NASA".to_owned(),
            thumbnail: "https://cdn.example.com/thumb.jpg".to_owned(),
            image: "https://cdn.example.com/image.jpg".to_owned(),
            description: "Space.".to_owned(),
            total_episodes: 120,
            country: "United States".to_owned(),
            language: "English".to_owned(),
            explicit_content: false,
            earliest_pub_date_ms: MARCH_2018,
            latest_pub_date_ms: JUNE_2021,
        }
    }

    fn episode(id: &str, seconds: u64) -> Episode {
        Episode {
            id: id.to_owned(),
            title: format!("Episode {id}"),
            pub_date_ms: JUNE_2021,
            audio: format!("https://cdn.example.com/{id}.mp3"),
            audio_length_sec: seconds,
            ..Episode::default()
        }
    }

    #[test]
    fn release_info_formats() {
        assert_eq!(format_release_info(2020, 2020), "2020");
        assert_eq!(format_release_info(2018, 2021), "2018-2021");
    }

    #[test]
    fn years_are_utc_calendar_years() {
        assert_eq!(year(MARCH_2018), Some(2018));
        assert_eq!(year(0), Some(1970));
        assert_eq!(year(-1), Some(1969));
        assert_eq!(year(Millis::MAX), None);
    }

    #[test]
    fn release_times_have_millisecond_precision() {
        assert_eq!(
            released(JUNE_2021).as_deref(),
            Some("2021-06-15T08:30:00.250Z")
        );
        assert_eq!(released(0).as_deref(), Some("1970-01-01T00:00:00.000Z"));
        assert_eq!(released(Millis::MAX), None);
    }

    #[test]
    fn catalog_ids_round_trip_through_provider_id() {
        let id = catalog_id("podcasts", "abc");
        assert_eq!(id, "podcasts_listennotes_abc");
        assert_eq!(provider_id(&id).unwrap(), "abc");
    }

    #[test]
    fn malformed_catalog_ids_are_rejected() {
        assert_eq!(
            provider_id("podcasts_listennotes").unwrap_err().kind,
            ErrorKind::InvalidArgument
        );
        assert!(provider_id("podcasts_listennotes_").is_err());
        assert!(provider_id("abc").is_err());
    }

    #[test]
    fn provider_ids_with_url_syntax_are_rejected() {
        for id in [
            "podcasts_listennotes_x/../../v1/admin?a=b",
            "podcasts_listennotes_..",
            "podcasts_listennotes_abc#top",
            "podcasts_listennotes_a%2Fb",
            "podcasts_listennotes_a b",
        ] {
            assert_eq!(
                provider_id(id).unwrap_err().kind,
                ErrorKind::InvalidArgument,
                "{id}"
            );
        }
        assert_eq!(
            provider_id("podcasts_listennotes_4d3fe717742d4963a85562e9f84d8c79").unwrap(),
            "4d3fe717742d4963a85562e9f84d8c79"
        );
    }

    #[test]
    fn average_length_is_floored_minutes() {
        let episodes = [episode("1", 1_800), episode("2", 1_979)];
        assert_eq!(average_episode_minutes(&episodes), Some(31));
        assert_eq!(average_episode_minutes(&[episode("1", 59)]), Some(0));
    }

    #[test]
    fn average_length_saturates_on_absurd_lengths() {
        let episodes = [episode("1", u64::MAX), episode("2", u64::MAX)];
        assert_eq!(average_episode_minutes(&episodes), Some(u64::MAX / 2 / 60));
    }

    #[test]
    fn average_length_of_no_episodes_is_unavailable() {
        assert_eq!(average_episode_minutes(&[]), None);
    }

    #[test]
    fn list_entry_has_five_info_lines_in_order() {
        let entry = catalog_entry("podcasts", &podcast());

        assert_eq!(entry.id, "podcasts_listennotes_abc");
        assert_eq!(entry.kind, "series");
        assert_eq!(
            entry.info,
            [
                "<strong>Episodes: </strong> 120",
                "<strong>Country: </strong> United States",
                "<strong>Language: </strong> English",
                "<strong>Explicit content: </strong> no",
                "<i>Powered by listen notes</i>",
            ]
        );
        assert_eq!(entry.director, ["NASA"]);
        assert_eq!(entry.release_info, "2018-2021");
        assert_eq!(entry.poster, entry.logo);
        assert_eq!(entry.poster_shape, "square");
        assert_eq!(entry.background, "https://cdn.example.com/image.jpg");
    }

    #[test]
    fn single_year_podcast_has_single_year_release() {
        let mut podcast = podcast();
        podcast.earliest_pub_date_ms = JUNE_2021 - 1_000;
        assert_eq!(catalog_entry("podcasts", &podcast).release_info, "2021");
    }

    #[test]
    fn random_entry_uses_its_own_fields() {
        let pick = RandomPodcast {
            podcast_id: "p9".to_owned(),
            title: "Lucky".to_owned(),
            publisher: "Someone".to_owned(),
            audio_length_sec: 1_830,
            explicit_content: true,
            pub_date_ms: MARCH_2018,
            ..RandomPodcast::default()
        };

        let entry = random_entry("podcasts", &pick);

        assert_eq!(entry.id, "podcasts_listennotes_p9");
        assert_eq!(
            entry.info,
            [
                "<strong>Length: </strong> 30 minutes",
                "<strong>Explicit content: </strong> yes",
                "<i>Powered by listen notes</i>",
            ]
        );
        assert_eq!(entry.release_info, "2018");
        assert_eq!(entry.director, ["Someone"]);
    }

    #[test]
    fn detail_numbers_episodes_in_one_season() {
        let detail = PodcastDetail {
            podcast: podcast(),
            genre_ids: vec![77, 68],
            episodes: vec![episode("e1", 600), episode("e2", 1_200)],
            next_episode_pub_date: None,
            website: "https://www.nasa.gov".to_owned(),
        };
        let genres = vec!["TV and Film".to_owned(), "Comedy".to_owned()];

        let meta = catalog_detail("podcasts_listennotes_abc", "podcasts", &detail, genres);

        assert_eq!(meta.entry.id, "podcasts_listennotes_abc");
        assert_eq!(meta.entry.info, ["TV and Film", "Comedy"]);
        assert_eq!(meta.runtime, "2018-2021 | Average episode length: 15 minutes");
        assert_eq!(meta.website, "https://www.nasa.gov");
        assert_eq!(meta.videos.len(), 2);

        let second = &meta.videos[1];
        assert_eq!(second.id, "podcasts_listennotes_e2");
        assert_eq!(second.season, 1);
        assert_eq!(second.episode, 2);
        assert_eq!(second.released.as_deref(), Some("2021-06-15T08:30:00.250Z"));
        assert_eq!(second.streams[0].url, "https://cdn.example.com/e2.mp3");
    }

    #[test]
    fn detail_without_episodes_has_unavailable_average() {
        let detail = PodcastDetail {
            podcast: podcast(),
            ..PodcastDetail::default()
        };

        let meta = catalog_detail("podcasts_listennotes_abc", "podcasts", &detail, Vec::new());

        assert_eq!(meta.runtime, "2018-2021 | Average episode length: unavailable");
        assert!(meta.videos.is_empty());
    }

    #[test]
    fn entries_serialize_with_host_field_names() {
        let json = serde_json::to_value(catalog_entry("podcasts", &podcast())).unwrap();

        assert_eq!(json["type"], "series");
        assert_eq!(json["releaseInfo"], "2018-2021");
        assert_eq!(json["posterShape"], "square");
        assert_eq!(json["genres"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn details_serialize_flat() {
        let detail = PodcastDetail {
            podcast: podcast(),
            episodes: vec![episode("e1", 600)],
            ..PodcastDetail::default()
        };

        let json = serde_json::to_value(catalog_detail(
            "podcasts_listennotes_abc",
            "podcasts",
            &detail,
            Vec::new(),
        ))
        .unwrap();

        assert_eq!(json["name"], "Houston We Have a Podcast");
        assert_eq!(json["language"], "English");
        assert_eq!(json["videos"][0]["episode"], 1);
        assert_eq!(
            json["videos"][0]["streams"][0]["url"],
            "https://cdn.example.com/e1.mp3"
        );
    }
}
