//! The catalog operations offered to a discovery host.
//!
//! An [`Adapter`] answers four questions: which genres can be browsed, which
//! podcasts are in a listing, what one podcast looks like with all of its
//! episodes, and how one episode can be played. [`ListenNotesAdapter`]
//! answers them from any [`Catalog`], by default the Listen Notes API.
//!
//! Each operation drives one sequential chain of catalog calls. Nothing is
//! cached between operations, so concurrent requests may repeat upstream
//! calls.

use async_trait::async_trait;
use serde::Serialize;

use crate::{
    catalog::Catalog,
    collect::{self, Listing},
    config::Config,
    error::Result,
    genres,
    listennotes::ListenNotes,
    normalize::{self, CatalogDetail, CatalogEntry},
    streams::{self, Stream},
};

/// Seconds a host may cache details and streams: three days.
pub const CACHE_MAX_AGE: u32 = 3 * 24 * 3600;

/// Skip offset of a listing request that does not specify one.
pub const DEFAULT_SKIP: u32 = 50;

/// Number of search pages gathered per search request.
pub const SEARCH_PAGES: u32 = 4;

/// Parameters of a listing request.
///
/// A search takes precedence over a genre; without either the best podcasts
/// over all categories are listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionRequest {
    pub search: Option<String>,

    /// Display name of a genre, or [`genres::RANDOM`] for a single random
    /// pick.
    pub genre: Option<String>,

    /// Defaults to [`DEFAULT_SKIP`].
    pub skip: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    pub meta: CatalogDetail,
    pub cache_max_age: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamsResponse {
    pub streams: Vec<Stream>,
    pub cache_max_age: u32,
}

#[async_trait]
pub trait Adapter: Send + Sync {
    /// Browsable genre names, led by [`genres::RANDOM`].
    async fn genres(&self) -> Result<Vec<String>>;

    /// Podcasts of a listing, search or random pick.
    ///
    /// A listing without matches is empty, not an error.
    async fn summarized_collection(&self, request: &CollectionRequest)
        -> Result<Vec<CatalogEntry>>;

    /// A podcast with all of its episodes, by catalog id.
    async fn meta(&self, id: &str) -> Result<MetaResponse>;

    /// The streams of an episode, by catalog id.
    async fn streams(&self, id: &str) -> Result<StreamsResponse>;
}

/// [`Adapter`] over a [`Catalog`] of the Listen Notes kind.
pub struct ListenNotesAdapter<C = ListenNotes> {
    catalog: C,
    namespace: String,
}

impl ListenNotesAdapter {
    /// Connects to the Listen Notes API as configured.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the API client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ListenNotes::new(config)?, &config.namespace))
    }
}

impl<C: Catalog> ListenNotesAdapter<C> {
    /// Creates an adapter whose catalog ids start with `namespace`.
    #[must_use]
    pub fn new(catalog: C, namespace: &str) -> Self {
        Self {
            catalog,
            namespace: namespace.to_owned(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

#[async_trait]
impl<C: Catalog> Adapter for ListenNotesAdapter<C> {
    async fn genres(&self) -> Result<Vec<String>> {
        genres::genres(&self.catalog).await
    }

    async fn summarized_collection(
        &self,
        request: &CollectionRequest,
    ) -> Result<Vec<CatalogEntry>> {
        let skip = request.skip.unwrap_or(DEFAULT_SKIP);

        let collection = if let Some(query) = request.search.as_deref().filter(|q| !q.is_empty())
        {
            collect::search(&self.catalog, query, SEARCH_PAGES).await?
        } else if let Some(genre) = request.genre.as_deref() {
            if genre == genres::RANDOM {
                let pick = self.catalog.random_podcast().await?;
                return Ok(vec![normalize::random_entry(&self.namespace, &pick)]);
            }

            let genre_id = genres::genre_name_to_id(&self.catalog, genre).await?;
            collect::offset_window(&self.catalog, Listing::Genre(genre_id), skip).await?
        } else {
            collect::offset_window(&self.catalog, Listing::Top, skip).await?
        };

        if collection.is_empty() {
            info!("no podcasts found for {request:?}");
        }

        Ok(collection
            .iter()
            .map(|podcast| normalize::catalog_entry(&self.namespace, podcast))
            .collect())
    }

    async fn meta(&self, id: &str) -> Result<MetaResponse> {
        let podcast_id = normalize::provider_id(id)?;

        let first_page = self.catalog.podcast_info(podcast_id, None).await?;
        let detail = collect::all_episodes(&self.catalog, first_page).await?;
        let genres = genres::ids_to_genres(&self.catalog, &detail.genre_ids).await?;

        Ok(MetaResponse {
            meta: normalize::catalog_detail(id, &self.namespace, &detail, genres),
            cache_max_age: CACHE_MAX_AGE,
        })
    }

    async fn streams(&self, id: &str) -> Result<StreamsResponse> {
        let episode_id = normalize::provider_id(id)?;
        let episode = self.catalog.episode(episode_id).await?;

        Ok(StreamsResponse {
            streams: streams::extract(&episode.audio, episode.source_url(), episode.extra()),
            cache_max_age: CACHE_MAX_AGE,
        })
    }
}
