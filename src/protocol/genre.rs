//! Category taxonomy.
//!
//! # Wire Format
//!
//! ```json
//! {
//!     "genres": [
//!         { "id": 144, "name": "Personal Finance", "parent_id": 67 },
//!         { "id": 133, "name": "Arts & Crafts", "parent_id": 67 }
//!     ]
//! }
//! ```

use serde::Deserialize;

/// Provider-native category id.
pub type GenreId = u32;

/// Full category taxonomy in the provider's native order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Genres {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Genre {
    pub id: GenreId,

    /// Raw display name; may contain `&`.
    pub name: String,

    #[serde(default)]
    pub parent_id: Option<GenreId>,
}
