//! Actions - intents from the UI and results from async tasks

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::Character;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: fetch the initial page
    Init,

    // ===== Page category =====
    /// Go to the following page (ignored past the last page)
    PageNext,

    /// Go to the previous page (ignored on page 1)
    PagePrev,

    /// Re-issue the fetch for the current page
    PageRetry,

    /// Result: a page fetch finished
    PageDidLoad {
        page: u32,
        characters: Vec<Character>,
        has_next: bool,
    },

    /// Result: a page fetch failed
    PageDidError { page: u32, error: String },

    // ===== Grid category =====
    /// Move the highlighted tile by `delta` positions
    GridMove(i16),

    // ===== Detail category =====
    /// Open the overlay for a character
    DetailOpen(Character),

    /// Hide the overlay, keeping the selection
    DetailClose,

    // ===== Favorite category =====
    /// Add or remove a character from favorites
    FavoriteToggle(Character),

    /// Result: favorites written to disk
    FavoriteDidSave,

    /// Result: writing favorites failed
    FavoriteDidError(String),

    // ===== Uncategorized =====
    /// Spinner animation tick
    Tick,

    Quit,
}
