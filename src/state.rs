//! Application state - single source of truth

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::favorites::FavoritesSet;

/// First page of the people listing. Pages are 1-based.
pub const FIRST_PAGE: u32 = 1;

/// Spinner timing while a page fetch is outstanding.
pub const SPINNER_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// A measurement that SWAPI sends either as a string ("172", "unknown")
/// or as a bare number. Rendered verbatim, never converted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Stat {
    Number(f64),
    Text(String),
}

impl Default for Stat {
    fn default() -> Self {
        Stat::Text(String::new())
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Number(value) => write!(f, "{value}"),
            Stat::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Stat {
    fn from(value: &str) -> Self {
        Stat::Text(value.to_string())
    }
}

/// A character record from the people listing
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Character {
    pub name: String,
    pub height: Stat,
    pub mass: Stat,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    /// Canonical resource URL, e.g. `https://swapi.dev/api/people/1/`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Character {
    /// Same favorite / same tile: characters are identified by name.
    pub fn same_as(&self, other: &Character) -> bool {
        self.name == other.name
    }

    /// Numeric id parsed from the trailing segment of `url`.
    pub fn resource_id(&self) -> Option<u32> {
        let url = self.url.as_deref()?;
        url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// A fetch for `current_page` is outstanding
    #[debug(section = "Fetch", label = "Loading")]
    pub loading: bool,

    /// Last fetch error; characters are kept from the previous success
    #[debug(section = "Fetch", label = "Error", debug_fmt)]
    pub error: Option<String>,

    #[debug(section = "Fetch", label = "Page")]
    pub current_page: u32,

    /// False once a page came back empty or without a successor
    #[debug(section = "Fetch", label = "Has next")]
    pub has_next_page: bool,

    /// Characters from the last successful fetch of `current_page`
    #[debug(skip)]
    pub characters: Vec<Character>,

    /// Highlighted tile in the grid
    #[debug(section = "Grid", label = "Cursor")]
    pub cursor: usize,

    #[debug(skip)]
    pub favorites: FavoritesSet,

    /// Last character opened in the overlay (kept after closing)
    #[debug(skip)]
    pub selected: Option<Character>,

    #[debug(section = "Overlay", label = "Open")]
    pub overlay_open: bool,

    /// Transient status-line message
    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    /// Create state starting at `page` with previously saved favorites
    pub fn new(page: u32, favorites: FavoritesSet) -> Self {
        Self {
            loading: false,
            error: None,
            current_page: page.max(FIRST_PAGE),
            has_next_page: true,
            characters: Vec::new(),
            cursor: 0,
            favorites,
            selected: None,
            overlay_open: false,
            message: None,
            tick_count: 0,
        }
    }

    pub fn is_favorite(&self, character: &Character) -> bool {
        self.favorites.contains(character)
    }

    pub fn highlighted(&self) -> Option<&Character> {
        self.characters.get(self.cursor)
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > FIRST_PAGE
    }

    /// Forward paging waits until the current page has said whether a
    /// successor exists.
    pub fn can_go_next(&self) -> bool {
        self.has_next_page && !self.loading
    }

    /// The character shown by the overlay, if it is open.
    pub fn overlay_character(&self) -> Option<&Character> {
        if self.overlay_open {
            self.selected.as_ref()
        } else {
            None
        }
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FIRST_PAGE, FavoritesSet::default())
    }
}
