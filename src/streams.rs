//! Stream descriptors of a single episode.
//!
//! Every episode yields its audio file and the provider page it was found
//! on. The free-form links of its podcast follow, in the order the provider
//! lists them. Those links are keyed `<name>_<kind>`:
//! * `*_url` becomes an external link titled `<name>`, except for
//!   `youtube_url` which becomes an embedded video
//! * `*_handle` becomes an external link to `https://<name>.com/<handle>`
//!
//! Anything else, and any link without a value, is left out. Extraction
//! never fails.

use serde::Serialize;

/// Title of the audio stream.
pub const AUDIO_TITLE: &str = "audio";

/// Title of the link to the provider page.
pub const SOURCE_TITLE: &str = "source";

/// Link name that is embedded as a video instead of linked to.
const YOUTUBE: &str = "youtube";

/// Marker preceding the video id in a video page url.
const VIDEO_ID_MARKER: &str = "?v=";

/// A way to play or visit an episode.
///
/// Serializes to `{url, title}`, `{externalUrl, title}` or `{ytId, title}`
/// respectively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Stream {
    DirectAudio {
        url: String,
        title: String,
    },
    ExternalLink {
        #[serde(rename = "externalUrl")]
        url: String,
        title: String,
    },
    VideoEmbed {
        #[serde(rename = "ytId")]
        platform_id: String,
        title: String,
    },
}

impl Stream {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::DirectAudio { title, .. }
            | Self::ExternalLink { title, .. }
            | Self::VideoEmbed { title, .. } => title,
        }
    }
}

/// Classification of one supplementary link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Link<'a> {
    /// `<name>_url` with a value.
    UrlLink { name: &'a str, url: &'a str },
    /// `<name>_handle` with a value.
    HandleLink { name: &'a str, handle: &'a str },
    Ignored,
}

/// Classifies the link stored under `key`.
///
/// `name` is the part of `key` before the first `_`, and `kind` the part
/// after it up to the next `_`.
#[must_use]
pub fn classify<'a>(key: &'a str, value: &'a str) -> Link<'a> {
    if value.is_empty() {
        return Link::Ignored;
    }

    let mut segments = key.split('_');
    let (Some(name), Some(kind)) = (segments.next(), segments.next()) else {
        return Link::Ignored;
    };

    match kind {
        "url" => Link::UrlLink { name, url: value },
        "handle" => Link::HandleLink {
            name,
            handle: value,
        },
        _ => Link::Ignored,
    }
}

impl Link<'_> {
    /// The stream this link turns into, if any.
    #[must_use]
    pub fn into_stream(self) -> Option<Stream> {
        match self {
            Self::UrlLink { name, url } if name == YOUTUBE => url
                .split_once(VIDEO_ID_MARKER)
                .map(|(_, id)| id)
                .filter(|id| !id.is_empty())
                .map(|id| Stream::VideoEmbed {
                    platform_id: id.to_owned(),
                    title: name.to_owned(),
                }),
            Self::UrlLink { name, url } => Some(Stream::ExternalLink {
                url: url.to_owned(),
                title: name.to_owned(),
            }),
            Self::HandleLink { name, handle } => Some(Stream::ExternalLink {
                url: format!("https://{name}.com/{handle}"),
                title: name.to_owned(),
            }),
            Self::Ignored => None,
        }
    }
}

/// All streams of an episode: audio, provider page, then `extras` in order.
#[must_use]
pub fn extract(audio: &str, source_url: &str, extras: &[(String, String)]) -> Vec<Stream> {
    let mut streams = Vec::with_capacity(extras.len() + 2);
    streams.push(Stream::DirectAudio {
        url: audio.to_owned(),
        title: AUDIO_TITLE.to_owned(),
    });
    streams.push(Stream::ExternalLink {
        url: source_url.to_owned(),
        title: SOURCE_TITLE.to_owned(),
    });

    streams.extend(
        extras
            .iter()
            .filter_map(|(key, value)| classify(key, value).into_stream()),
    );

    streams
}
