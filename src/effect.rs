//! Effects - side effects declared by the reducer

use crate::favorites::FavoritesSet;

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch one page of the people listing
    FetchPage { page: u32 },
    /// Overwrite the favorites file with the full set
    SaveFavorites { favorites: FavoritesSet },
}
