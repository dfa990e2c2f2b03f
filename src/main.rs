//! Star Wars character browser - tui-dispatch app

use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use starwars::action::Action;
use starwars::api::{DEFAULT_API_BASE, DEFAULT_TIMEOUT_SECS, SwapiClient, page_result_action};
use starwars::components::detail_overlay::overlay_area;
use starwars::components::{
    Component, DetailOverlay, DetailOverlayProps, ListView, ListViewProps,
};
use starwars::effect::Effect;
use starwars::persist::FavoritesStore;
use starwars::reducer::reducer;
use starwars::state::{AppState, SPINNER_TICK_MS};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Browse Star Wars characters from SWAPI
#[derive(Parser, Debug)]
#[command(name = "starwars")]
#[command(about = "Browse Star Wars characters, page by page, and keep favorites")]
struct Args {
    /// Base URL of the people API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Page to open first
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    /// Directory holding favorites.json (defaults to the local data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

/// Services the effect handler needs
#[derive(Clone, Debug)]
struct RuntimeConfig {
    client: SwapiClient,
    store: FavoritesStore,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum StarWarsComponentId {
    Grid,
    Detail,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum StarWarsContext {
    Grid,
    Detail,
}

impl EventRoutingState<StarWarsComponentId, StarWarsContext> for AppState {
    fn focused(&self) -> Option<StarWarsComponentId> {
        if self.overlay_open {
            Some(StarWarsComponentId::Detail)
        } else {
            Some(StarWarsComponentId::Grid)
        }
    }

    fn modal(&self) -> Option<StarWarsComponentId> {
        if self.overlay_open {
            Some(StarWarsComponentId::Detail)
        } else {
            None
        }
    }

    fn binding_context(&self, id: StarWarsComponentId) -> StarWarsContext {
        match id {
            StarWarsComponentId::Grid => StarWarsContext::Grid,
            StarWarsComponentId::Detail => StarWarsContext::Detail,
        }
    }

    fn default_context(&self) -> StarWarsContext {
        StarWarsContext::Grid
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        api_base,
        page,
        timeout_secs,
        data_dir,
        log_file,
        debug: debug_args,
    } = Args::parse();

    if let Some(path) = &log_file {
        init_tracing(path)?;
    }

    let debug = DebugSession::new(debug_args);
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let client = SwapiClient::new(api_base, Duration::from_secs(timeout_secs))
        .map_err(io::Error::other)?;
    let store = favorites_store(data_dir);
    tracing::info!(path = %store.path().display(), "favorites store");

    let config = RuntimeConfig { client, store };

    let state = debug
        .load_state_or_else_async(|| {
            let store = config.store.clone();
            async move { Ok::<AppState, io::Error>(AppState::new(page, store.load())) }
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, config).await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

/// Log to `path`; stdout belongs to the terminal UI.
fn init_tracing(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .init();
    Ok(())
}

fn favorites_store(data_dir: Option<PathBuf>) -> FavoritesStore {
    if let Some(dir) = data_dir {
        return FavoritesStore::in_dir(dir);
    }
    FavoritesStore::default_location().unwrap_or_else(|err| {
        tracing::warn!("{err}, keeping favorites in the working directory");
        FavoritesStore::in_dir(".")
    })
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

struct StarWarsUi {
    list: ListView,
    detail: DetailOverlay,
}

impl StarWarsUi {
    fn new() -> Self {
        Self {
            list: ListView::new(),
            detail: DetailOverlay::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<StarWarsComponentId>,
    ) {
        event_ctx.set_component_area(StarWarsComponentId::Grid, area);

        let props = ListViewProps {
            state,
            is_focused: render_ctx.is_focused() && !state.overlay_open,
        };
        self.list.render(frame, area, props);

        if let Some(character) = state.overlay_character() {
            let modal_area = overlay_area(area);
            event_ctx.set_component_area(StarWarsComponentId::Detail, modal_area);
            let props = DetailOverlayProps {
                character,
                is_favorite: state.is_favorite(character),
                is_focused: render_ctx.is_focused(),
            };
            self.detail.render(frame, area, props);
        } else {
            event_ctx
                .component_areas
                .remove(&StarWarsComponentId::Detail);
        }
    }

    fn handle_grid_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = ListViewProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.list.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }

    fn handle_detail_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let Some(character) = state.overlay_character() else {
            return HandlerResponse::ignored();
        };
        let props = DetailOverlayProps {
            character,
            is_favorite: state.is_favorite(character),
            is_focused: true,
        };
        let actions: Vec<_> = self.detail.handle_event(event, props).into_iter().collect();
        // Modal: swallow everything so the grid stays put underneath
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    config: RuntimeConfig,
) -> io::Result<DebugRunOutput<AppState>> {
    let config = Arc::new(config);
    let ui = Rc::new(RefCell::new(StarWarsUi::new()));
    let mut bus: EventBus<AppState, Action, StarWarsComponentId, StarWarsContext> =
        EventBus::new();
    let keybindings: Keybindings<StarWarsContext> = Keybindings::new();

    let ui_grid = Rc::clone(&ui);
    bus.register(StarWarsComponentId::Grid, move |event, state| {
        ui_grid.borrow_mut().handle_grid_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(StarWarsComponentId::Detail, move |event, state| {
        ui_detail
            .borrow_mut()
            .handle_detail_event(&event.kind, state)
    });

    // Re-render on terminal resize (grid columns follow the width)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(SPINNER_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &config),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, config: &RuntimeConfig) {
    match effect {
        Effect::FetchPage { page } => {
            let client = config.client.clone();
            // Same key: a newer page request replaces the one in flight
            ctx.tasks().spawn(TaskKey::new("page"), async move {
                page_result_action(page, client.fetch_people(page).await)
            });
        }
        Effect::SaveFavorites { favorites } => {
            let outcome = match config.store.save(&favorites) {
                Ok(()) => Action::FavoriteDidSave,
                Err(err) => {
                    tracing::error!("failed to save favorites: {err}");
                    Action::FavoriteDidError(err.to_string())
                }
            };
            ctx.tasks()
                .spawn(TaskKey::new("favorites_save"), async move { outcome });
        }
    }
}
