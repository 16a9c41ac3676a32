//! The remote podcast catalog, as seen by the adapter.
//!
//! Every method is one independent network round trip with its own latency
//! and failure mode. Implementations do not cache, retry or parallelize;
//! callers drive them sequentially.

use async_trait::async_trait;

use crate::{
    error::Result,
    protocol::{
        genre::GenreId, podcast::Millis, Episode, Genres, PodcastDetail, PodcastPage,
        RandomPodcast, SearchPage,
    },
};

#[async_trait]
pub trait Catalog: Send + Sync {
    /// The full category taxonomy.
    async fn all_categories(&self) -> Result<Genres>;

    /// One page of the best podcasts over all categories.
    async fn top_podcasts(&self, page: u32) -> Result<PodcastPage>;

    /// One page of the best podcasts of a single category.
    async fn podcasts(&self, genre_id: GenreId, page: u32) -> Result<PodcastPage>;

    /// One page of podcasts matching `query`, starting at `offset`.
    async fn search_podcasts(&self, query: &str, offset: u32) -> Result<SearchPage>;

    /// A podcast with one page of episodes, oldest first.
    ///
    /// Without a cursor the first page is returned; with a cursor, the page
    /// of episodes published after it.
    async fn podcast_info(&self, id: &str, cursor: Option<Millis>) -> Result<PodcastDetail>;

    /// A single episode including its podcast's supplementary links.
    async fn episode(&self, id: &str) -> Result<Episode>;

    /// A random pick.
    async fn random_podcast(&self) -> Result<RandomPodcast>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted in-memory catalog for tests.

    use std::{collections::HashMap, sync::Mutex};

    use super::*;
    use crate::{
        error::Error,
        protocol::{Genre, Podcast},
    };

    #[derive(Default)]
    pub struct FakeCatalog {
        pub genres: Genres,
        pub top: HashMap<u32, PodcastPage>,
        pub by_genre: HashMap<(GenreId, u32), PodcastPage>,
        /// Returned in call order, regardless of the offset asked for.
        pub search: Vec<SearchPage>,
        pub details: HashMap<String, PodcastDetail>,
        /// Follow-up episode pages of any podcast, keyed by cursor.
        pub episode_pages: HashMap<Millis, PodcastDetail>,
        pub episodes: HashMap<String, Episode>,
        pub random: Option<RandomPodcast>,
        /// Method name that fails with `Unavailable` on its `n`th call
        /// (zero-based).
        pub fail: Option<(&'static str, usize)>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeCatalog {
        pub fn with_genres(names: &[(GenreId, &str)]) -> Self {
            Self {
                genres: Genres {
                    genres: names
                        .iter()
                        .map(|(id, name)| Genre {
                            id: *id,
                            name: (*name).to_owned(),
                            parent_id: None,
                        })
                        .collect(),
                },
                ..Self::default()
            }
        }

        /// Simulates a best-of listing of `total` podcasts in pages of 50,
        /// where page `n` holds podcasts `50 * n` up to `50 * (n + 1)`.
        pub fn with_top_listing(total: usize) -> Self {
            let mut top = HashMap::new();
            let pages = total.div_ceil(50);
            for page in 0..pages {
                let podcasts = (page * 50..total.min((page + 1) * 50))
                    .map(|n| Podcast {
                        id: format!("p{n}"),
                        ..Podcast::default()
                    })
                    .collect();
                top.insert(
                    u32::try_from(page).unwrap(),
                    PodcastPage {
                        podcasts,
                        has_next: (page + 1) * 50 < total,
                        page_number: u32::try_from(page).unwrap(),
                    },
                );
            }

            Self {
                top,
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// Logs a call and returns how many calls of `method` came before.
        fn record(&self, method: &'static str, call: String) -> Result<usize> {
            let mut calls = self.calls.lock().unwrap();
            let nth = calls
                .iter()
                .filter(|c| c.split(' ').next() == Some(method))
                .count();
            calls.push(call);

            match self.fail {
                Some((failing, n)) if failing == method && n == nth => {
                    Err(Error::unavailable(format!("{method} is down")).into_remote())
                }
                _ => Ok(nth),
            }
        }
    }

    /// What a provider 404 looks like once it leaves a catalog call.
    fn missing(what: String) -> Error {
        Error::not_found(what).into_remote()
    }

    #[async_trait]
    impl Catalog for FakeCatalog {
        async fn all_categories(&self) -> Result<Genres> {
            self.record("all_categories", "all_categories".to_owned())?;
            Ok(self.genres.clone())
        }

        async fn top_podcasts(&self, page: u32) -> Result<PodcastPage> {
            self.record("top_podcasts", format!("top_podcasts {page}"))?;
            self.top
                .get(&page)
                .cloned()
                .ok_or_else(|| missing(format!("top page {page}")))
        }

        async fn podcasts(&self, genre_id: GenreId, page: u32) -> Result<PodcastPage> {
            self.record("podcasts", format!("podcasts {genre_id} {page}"))?;
            self.by_genre
                .get(&(genre_id, page))
                .cloned()
                .ok_or_else(|| missing(format!("genre {genre_id} page {page}")))
        }

        async fn search_podcasts(&self, query: &str, offset: u32) -> Result<SearchPage> {
            let n = self.record("search_podcasts", format!("search_podcasts {query} {offset}"))?;
            Ok(self.search.get(n).cloned().unwrap_or_default())
        }

        async fn podcast_info(&self, id: &str, cursor: Option<Millis>) -> Result<PodcastDetail> {
            self.record("podcast_info", format!("podcast_info {id} {cursor:?}"))?;
            match cursor {
                None => self.details.get(id).cloned(),
                Some(cursor) => self.episode_pages.get(&cursor).cloned(),
            }
            .ok_or_else(|| missing(format!("podcast {id} at {cursor:?}")))
        }

        async fn episode(&self, id: &str) -> Result<Episode> {
            self.record("episode", format!("episode {id}"))?;
            self.episodes
                .get(id)
                .cloned()
                .ok_or_else(|| missing(format!("episode {id}")))
        }

        async fn random_podcast(&self) -> Result<RandomPodcast> {
            self.record("random_podcast", "random_podcast".to_owned())?;
            self.random
                .clone()
                .ok_or_else(|| missing("random pick".to_owned()))
        }
    }
}
