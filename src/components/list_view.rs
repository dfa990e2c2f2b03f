use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{CharacterGrid, CharacterGridProps, Component, PageHeader, PageHeaderProps};
use crate::action::Action;
use crate::state::{AppState, Character};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";

/// Props for ListView - read-only view of state
pub struct ListViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Character grid with paging, favorites and the fetch status
#[derive(Default)]
pub struct ListView {
    grid: CharacterGrid,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for ListView {
    type Props<'a> = ListViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        let EventKind::Key(key) = event else {
            return None;
        };

        let state = props.state;
        let row = i16::try_from(self.grid.columns()).unwrap_or(i16::MAX);
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(Action::GridMove(-1)),
            KeyCode::Right | KeyCode::Char('l') => Some(Action::GridMove(1)),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::GridMove(-row)),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::GridMove(row)),
            KeyCode::Enter => state.highlighted().cloned().map(Action::DetailOpen),
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                state.highlighted().cloned().map(Action::FavoriteToggle)
            }
            KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::PageDown => {
                state.can_go_next().then_some(Action::PageNext)
            }
            KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::PageUp => {
                state.can_go_prev().then_some(Action::PagePrev)
            }
            KeyCode::Char('r') | KeyCode::F(5) => Some(Action::PageRetry),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Error / message banner
            Constraint::Min(1),    // Grid
            Constraint::Length(1), // Help bar
        ])
        .split(area);

        let mut header = PageHeader;
        header.render(
            frame,
            chunks[0],
            PageHeaderProps {
                page: state.current_page,
                favorites: state.favorites.len(),
                spinner: state.loading.then(|| state.spinner_frame()),
            },
        );

        render_banner(frame, chunks[1], state);

        if state.characters.is_empty() {
            render_empty(frame, chunks[2], state);
        } else {
            let is_favorite = |character: &Character| state.is_favorite(character);
            self.grid.render(
                frame,
                chunks[2],
                CharacterGridProps {
                    characters: &state.characters,
                    cursor: state.cursor,
                    is_favorite: &is_favorite,
                    dimmed: state.loading,
                },
            );
        }

        let mut hints = vec![
            StatusBarHint::new("\u{2190}\u{2191}\u{2192}\u{2193}", "move"),
            StatusBarHint::new("enter", "detail"),
            StatusBarHint::new("f", "favorite"),
        ];
        if state.can_go_prev() {
            hints.push(StatusBarHint::new("p", "prev"));
        }
        if state.can_go_next() {
            hints.push(StatusBarHint::new("n", "next"));
        }
        hints.push(StatusBarHint::new("r", "retry"));
        hints.push(StatusBarHint::new("q", "quit"));

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&hints),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

fn render_banner(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = if let Some(error) = &state.error {
        Line::from(vec![
            Span::raw(format!(" {ERROR_ICON} ")),
            Span::styled(
                error.clone(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  press ", Style::default().fg(Color::DarkGray)),
            Span::styled("r", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
        ])
    } else if let Some(message) = &state.message {
        Line::from(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Gray),
        ))
    } else {
        return;
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_empty(frame: &mut Frame, area: Rect, state: &AppState) {
    let text = if state.loading {
        format!("{} Loading page {}...", state.spinner_frame(), state.current_page)
    } else if state.error.is_some() {
        String::from("Nothing loaded yet")
    } else {
        String::from("No characters on this page")
    };

    let [center] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);
    let line = Line::from(Span::styled(text, Style::default().fg(Color::DarkGray))).centered();
    frame.render_widget(Paragraph::new(line), center);
}
