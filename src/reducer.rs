//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => start_fetch(state),

        // ===== Page actions =====
        Action::PageNext => {
            if !state.can_go_next() {
                return DispatchResult::unchanged();
            }
            state.current_page += 1;
            start_fetch(state)
        }

        Action::PagePrev => {
            if !state.can_go_prev() {
                return DispatchResult::unchanged();
            }
            state.current_page -= 1;
            state.has_next_page = true;
            start_fetch(state)
        }

        Action::PageRetry => start_fetch(state),

        Action::PageDidLoad {
            page,
            characters,
            has_next,
        } => {
            if page != state.current_page {
                tracing::debug!(page, current = state.current_page, "discarding stale page");
                return DispatchResult::unchanged();
            }
            state.has_next_page = has_next && !characters.is_empty();
            state.characters = characters;
            state.cursor = 0;
            state.error = None;
            state.loading = false;
            DispatchResult::changed()
        }

        Action::PageDidError { page, error } => {
            if page != state.current_page {
                tracing::debug!(page, current = state.current_page, "discarding stale error");
                return DispatchResult::unchanged();
            }
            state.error = Some(error);
            state.loading = false;
            DispatchResult::changed()
        }

        // ===== Grid actions =====
        Action::GridMove(delta) => {
            // A move that would leave the grid is dropped, not clamped
            let target = state.cursor as i64 + i64::from(delta);
            if delta == 0 || target < 0 || target >= state.characters.len() as i64 {
                return DispatchResult::unchanged();
            }
            state.cursor = target as usize;
            DispatchResult::changed()
        }

        // ===== Detail actions =====
        Action::DetailOpen(character) => {
            state.selected = Some(character);
            state.overlay_open = true;
            DispatchResult::changed()
        }

        Action::DetailClose => {
            if !state.overlay_open {
                return DispatchResult::unchanged();
            }
            state.overlay_open = false;
            DispatchResult::changed()
        }

        // ===== Favorite actions =====
        Action::FavoriteToggle(character) => {
            let name = character.name.clone();
            let added = state.favorites.toggle(character);
            state.message = Some(if added {
                format!("Added {name} to favorites")
            } else {
                format!("Removed {name} from favorites")
            });
            DispatchResult::changed_with(Effect::SaveFavorites {
                favorites: state.favorites.clone(),
            })
        }

        Action::FavoriteDidSave => DispatchResult::unchanged(),

        Action::FavoriteDidError(error) => {
            state.message = Some(format!("Could not save favorites: {error}"));
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.loading {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Mark `current_page` as in flight and request it.
fn start_fetch(state: &mut AppState) -> DispatchResult<Effect> {
    state.loading = true;
    state.error = None;
    state.message = None;
    state.tick_count = 0;
    DispatchResult::changed_with(Effect::FetchPage {
        page: state.current_page,
    })
}
