//! Category taxonomy lookups.
//!
//! Display names have `&` replaced by `and`. The taxonomy is fetched anew
//! for every lookup; nothing is cached at this layer.

use crate::{
    catalog::Catalog,
    error::{Error, Result},
    protocol::{genre::GenreId, Genres},
};

/// Pseudo genre that selects a single random pick instead of a category.
pub const RANDOM: &str = "Random";

/// Display form of a category name.
#[must_use]
pub fn display_name(name: &str) -> String {
    name.replacen('&', "and", 1)
}

/// Genre names for browsing: [`RANDOM`] first, then all category names
/// sorted alphabetically.
#[must_use]
pub fn browse_names(taxonomy: &Genres) -> Vec<String> {
    let mut names: Vec<_> = taxonomy
        .genres
        .iter()
        .map(|genre| display_name(&genre.name))
        .collect();
    names.sort();

    let mut genres = Vec::with_capacity(names.len() + 1);
    genres.push(RANDOM.to_owned());
    genres.extend(names);
    genres
}

/// Names of the categories whose id is in `ids`, in taxonomy order.
///
/// Unknown ids are skipped.
#[must_use]
pub fn names_for_ids(taxonomy: &Genres, ids: &[GenreId]) -> Vec<String> {
    taxonomy
        .genres
        .iter()
        .filter(|genre| ids.contains(&genre.id))
        .map(|genre| display_name(&genre.name))
        .collect()
}

/// Id of the category whose display name equals `name`.
#[must_use]
pub fn id_for_name(taxonomy: &Genres, name: &str) -> Option<GenreId> {
    taxonomy
        .genres
        .iter()
        .find(|genre| display_name(&genre.name) == name)
        .map(|genre| genre.id)
}

/// Fetches the taxonomy and returns the browsable genre names.
///
/// # Errors
///
/// Will return `Err` if the taxonomy cannot be fetched.
pub async fn genres<C>(catalog: &C) -> Result<Vec<String>>
where
    C: Catalog + ?Sized,
{
    let taxonomy = catalog.all_categories().await?;
    Ok(browse_names(&taxonomy))
}

/// Fetches the taxonomy and translates category ids to names.
///
/// # Errors
///
/// Will return `Err` if the taxonomy cannot be fetched.
pub async fn ids_to_genres<C>(catalog: &C, ids: &[GenreId]) -> Result<Vec<String>>
where
    C: Catalog + ?Sized,
{
    let taxonomy = catalog.all_categories().await?;
    Ok(names_for_ids(&taxonomy, ids))
}

/// Fetches the taxonomy and translates a display name to its category id.
///
/// # Errors
///
/// Will return `Err` if:
/// - the taxonomy cannot be fetched
/// - no category carries `name`
pub async fn genre_name_to_id<C>(catalog: &C, name: &str) -> Result<GenreId>
where
    C: Catalog + ?Sized,
{
    let taxonomy = catalog.all_categories().await?;
    id_for_name(&taxonomy, &display_name(name))
        .ok_or_else(|| Error::not_found(format!("genre \"{name}\" does not exist")))
}
