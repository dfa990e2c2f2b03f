//! Fetch / paging / favorites flows through the effect store harness

use starwars::{
    action::Action,
    api::FETCH_FAILED_MESSAGE,
    effect::Effect,
    favorites::FavoritesSet,
    persist::FavoritesStore,
    reducer::reducer,
    state::{AppState, Character},
};
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, assert_emitted, assert_not_emitted};

fn character(name: &str, height: &str) -> Character {
    Character {
        name: name.into(),
        height: height.into(),
        mass: "77".into(),
        hair_color: "blond".into(),
        skin_color: "fair".into(),
        eye_color: "blue".into(),
        birth_year: "19BBY".into(),
        gender: "male".into(),
        url: None,
    }
}

fn page_one() -> Vec<Character> {
    vec![
        character("Luke Skywalker", "172"),
        character("C-3PO", "167"),
    ]
}

fn page_two() -> Vec<Character> {
    vec![character("Anakin Skywalker", "188")]
}

// ============================================================================
// Fetch lifecycle
// ============================================================================

#[test]
fn test_initial_fetch_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::Init);
    harness.assert_state(|s| s.loading && s.error.is_none());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchPage { page: 1 }));

    harness.complete_action(Action::PageDidLoad {
        page: 1,
        characters: page_one(),
        has_next: true,
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| s.error.is_none());
    harness.assert_state(|s| s.characters == page_one());
    harness.assert_state(|s| s.current_page == 1);
}

#[test]
fn test_failed_page_keeps_previous_characters() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.complete_action(Action::PageDidLoad {
        page: 1,
        characters: page_one(),
        has_next: true,
    });
    harness.process_emitted();
    harness.drain_effects();

    harness.dispatch_collect(Action::PageNext);
    harness.complete_action(Action::PageDidError {
        page: 2,
        error: FETCH_FAILED_MESSAGE.into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| !s.loading);
    harness.assert_state(|s| s.error.as_deref() == Some(FETCH_FAILED_MESSAGE));
    harness.assert_state(|s| s.characters == page_one());
    harness.assert_state(|s| s.current_page == 2);

    harness.drain_effects();
    harness.dispatch_collect(Action::PageRetry);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchPage { page: 2 }));
    harness.assert_state(|s| s.loading && s.error.is_none());
}

#[test]
fn test_prev_on_first_page_issues_no_fetch() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::PagePrev);

    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.current_page == 1 && !s.loading);
}

#[test]
fn test_last_requested_page_wins() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.complete_action(Action::PageDidLoad {
        page: 1,
        characters: page_one(),
        has_next: true,
    });
    harness.process_emitted();
    harness.dispatch_collect(Action::PageNext);
    harness.dispatch_collect(Action::PagePrev);
    harness.drain_effects();

    // page 2 answers late, page 1 is the one on screen
    harness.complete_action(Action::PageDidLoad {
        page: 2,
        characters: page_two(),
        has_next: true,
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (0, 1));
    harness.assert_state(|s| s.loading && s.current_page == 1);
    harness.assert_state(|s| s.characters == page_one());

    harness.complete_action(Action::PageDidLoad {
        page: 1,
        characters: vec![character("Yoda", "66")],
        has_next: false,
    });
    harness.process_emitted();
    harness.assert_state(|s| !s.loading && s.characters[0].name == "Yoda");
    harness.assert_state(|s| !s.can_go_next());
}

#[test]
fn test_next_ignored_until_page_lands() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::Init);
    harness.drain_effects();

    harness.dispatch_collect(Action::PageNext);
    harness.dispatch_collect(Action::PageNext);

    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.current_page == 1);

    harness.complete_action(Action::PageDidLoad {
        page: 1,
        characters: page_one(),
        has_next: true,
    });
    harness.process_emitted();
    harness.dispatch_collect(Action::PageNext);

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::FetchPage { page: 2 }));
}

// ============================================================================
// Selection and favorites
// ============================================================================

#[test]
fn test_select_and_close_overlay() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::PageDidLoad {
        page: 1,
        characters: page_one(),
        has_next: true,
    });

    store.dispatch(Action::DetailOpen(page_one()[0].clone()));
    assert!(store.state().overlay_open);
    assert_eq!(
        store.state().overlay_character().map(|c| c.name.as_str()),
        Some("Luke Skywalker")
    );

    store.dispatch(Action::DetailClose);
    assert!(!store.state().overlay_open);
    assert!(store.state().selected.is_some());
}

#[test]
fn test_favorite_round_trip_through_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let file_store = FavoritesStore::in_dir(dir.path());
    let mut store = EffectStore::new(AppState::new(1, file_store.load()), reducer);
    let luke = character("Luke Skywalker", "172");

    let persist = |effects: Vec<Effect>| {
        for effect in effects {
            if let Effect::SaveFavorites { favorites } = effect {
                file_store.save(&favorites).unwrap();
            }
        }
    };

    persist(store.dispatch(Action::FavoriteToggle(luke.clone())).effects);
    assert_eq!(file_store.load(), FavoritesSet::new(vec![luke.clone()]));

    persist(store.dispatch(Action::FavoriteToggle(luke)).effects);
    assert!(file_store.load().is_empty());
}

#[test]
fn test_is_favorite_depends_on_name_only() {
    let mut store = EffectStore::new(AppState::default(), reducer);
    store.dispatch(Action::FavoriteToggle(character("Luke Skywalker", "172")));

    assert!(store
        .state()
        .is_favorite(&character("Luke Skywalker", "unknown")));
    assert!(!store.state().is_favorite(&character("Leia Organa", "172")));
}

#[test]
fn test_save_error_surfaces_message() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.complete_action(Action::FavoriteDidError("disk full".into()));
    harness.process_emitted();

    harness.assert_state(|s| {
        s.message
            .as_deref()
            .is_some_and(|m| m.contains("disk full"))
    });
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![
        Action::PageNext,
        Action::PageDidLoad {
            page: 2,
            characters: page_two(),
            has_next: true,
        },
    ];

    assert_emitted!(actions, Action::PageNext);
    assert_emitted!(actions, Action::PageDidLoad { .. });
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::PageDidError { .. });
}
