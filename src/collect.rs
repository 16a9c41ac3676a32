//! Multi-page accumulation of remote records.
//!
//! Three stopping rules are provided, one per kind of remote listing:
//! * [`offset_window`] - page-numbered listings, until a skip offset is covered
//! * [`search`] - offset-cursor search, for a fixed number of pages
//! * [`all_episodes`] - publish-date cursor, until the latest episode is reached
//!
//! Pages are fetched one after the other. A failed call aborts the whole
//! aggregation and whatever was accumulated so far is dropped.

use crate::{
    catalog::Catalog,
    error::{Error, Result},
    protocol::{genre::GenreId, Podcast, PodcastDetail, PodcastPage},
};

/// Number of podcasts on one page of a best-of listing.
pub const PAGE_SIZE: u32 = 50;

/// A page-numbered best-of listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Listing {
    /// Best podcasts over all categories.
    Top,
    /// Best podcasts of one category.
    Genre(GenreId),
}

impl Listing {
    async fn page<C>(self, catalog: &C, page: u32) -> Result<PodcastPage>
    where
        C: Catalog + ?Sized,
    {
        match self {
            Self::Top => catalog.top_podcasts(page).await,
            Self::Genre(genre_id) => catalog.podcasts(genre_id, page).await,
        }
    }
}

/// Gathers enough of `listing` to cover `skip`.
///
/// Starts at page `skip / PAGE_SIZE` and keeps fetching while the provider
/// reports more pages and no more than `skip` podcasts have been gathered.
/// Only podcasts from the start page onward are counted, so the result holds
/// at least `min(skip + 1, total - start)` podcasts, where `start` is the
/// position of the first podcast on the start page. It is not sliced to a
/// window; callers that need an exact page cut it themselves.
///
/// # Errors
///
/// Will return `Err` if any page cannot be fetched.
pub async fn offset_window<C>(catalog: &C, listing: Listing, skip: u32) -> Result<Vec<Podcast>>
where
    C: Catalog + ?Sized,
{
    let skip_len = usize::try_from(skip).unwrap_or(usize::MAX);
    let mut page = skip / PAGE_SIZE;
    let mut collection = Vec::new();

    loop {
        debug!("{listing:?}: fetching page {page}");
        let response = listing.page(catalog, page).await?;
        collection.extend(response.podcasts);
        page += 1;

        if !response.has_next || collection.len() > skip_len {
            break;
        }
    }

    debug!("{listing:?}: gathered {} podcasts for skip {skip}", collection.len());
    Ok(collection)
}

/// Gathers `pages` pages of search results for `query`.
///
/// The offset for each next page is advanced by the `next_offset` the
/// provider returns. Exactly `pages` calls are made, even when the provider
/// runs out of results earlier.
///
/// # Errors
///
/// Will return `Err` if any page cannot be fetched.
pub async fn search<C>(catalog: &C, query: &str, pages: u32) -> Result<Vec<Podcast>>
where
    C: Catalog + ?Sized,
{
    let mut offset = 0;
    let mut collection = Vec::new();

    for page in 0..pages {
        debug!("search \"{query}\": fetching page {page} at offset {offset}");
        let response = catalog.search_podcasts(query, offset).await?;
        collection.extend(response.results);
        offset = offset.saturating_add(response.next_offset);
    }

    debug!("search \"{query}\": gathered {} podcasts", collection.len());
    Ok(collection)
}

/// Completes the episode list of `podcast` by following its
/// `next_episode_pub_date` cursor.
///
/// The latest publish date of the podcast, as known when this starts, is
/// the ceiling: pages are requested while the cursor lies below it. Every
/// page must move the cursor forward. A page without a cursor ends the list.
///
/// # Errors
///
/// Will return `Err` if:
/// - any page cannot be fetched
/// - a page returns a cursor that is not past the one it was requested with
pub async fn all_episodes<C>(catalog: &C, mut podcast: PodcastDetail) -> Result<PodcastDetail>
where
    C: Catalog + ?Sized,
{
    let ceiling = podcast.latest_pub_date_ms;
    let mut cursor = podcast.next_episode_pub_date;

    while let Some(current) = cursor.filter(|&cursor| ceiling > cursor) {
        debug!("podcast {}: fetching episodes after {current}", podcast.id);
        let page = catalog.podcast_info(&podcast.id, Some(current)).await?;
        podcast.episodes.extend(page.episodes);

        match page.next_episode_pub_date {
            Some(next) if next <= current => {
                return Err(Error::inconsistent_pagination(format!(
                    "podcast {}: episode cursor went from {current} to {next}",
                    podcast.id
                )));
            }
            next => cursor = next,
        }
    }

    debug!(
        "podcast {}: gathered {} episodes",
        podcast.id,
        podcast.episodes.len()
    );
    Ok(podcast)
}
