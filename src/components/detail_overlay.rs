use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding,
};

use super::Component;
use crate::action::Action;
use crate::api::portrait_url;
use crate::state::Character;

pub const OVERLAY_WIDTH: u16 = 68;
pub const OVERLAY_HEIGHT: u16 = 13;

const LABEL_WIDTH: usize = 12;
const PANEL_BG: Color = Color::Rgb(24, 22, 28);

/// Fixed-size box centered in `area`, shrunk to fit small terminals
pub fn overlay_area(area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(OVERLAY_HEIGHT)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(OVERLAY_WIDTH)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Attribute rows in display order. Height and mass get their unit
/// suffix verbatim.
pub fn detail_rows(character: &Character) -> Vec<(&'static str, String)> {
    vec![
        ("Height", format!("{} cm", character.height)),
        ("Mass", format!("{} kg", character.mass)),
        ("Hair Color", character.hair_color.clone()),
        ("Skin Color", character.skin_color.clone()),
        ("Eye Color", character.eye_color.clone()),
        ("Birth Year", character.birth_year.clone()),
        ("Gender", character.gender.clone()),
    ]
}

pub struct DetailOverlayProps<'a> {
    pub character: &'a Character,
    pub is_favorite: bool,
    pub is_focused: bool,
}

/// Modal showing one character's attributes
#[derive(Default)]
pub struct DetailOverlay {
    modal: Modal,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }
}

fn close_overlay() -> Action {
    Action::DetailClose
}

fn modal_style() -> ModalStyle {
    ModalStyle {
        base: BaseStyle {
            bg: Some(PANEL_BG),
            padding: Padding::default(),
            border: None,
            fg: None,
        },
        ..Default::default()
    }
}

impl Component<Action> for DetailOverlay {
    type Props<'a> = DetailOverlayProps<'a>;

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

        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                Some(Action::DetailClose)
            }
            KeyCode::Char('f') | KeyCode::Char(' ') => {
                Some(Action::FavoriteToggle(props.character.clone()))
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = overlay_area(area);
        let character = props.character;

        let mut render_content = |frame: &mut Frame, content_area: Rect| {
            let star = if props.is_favorite { "\u{2605} " } else { "" };
            let block = Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Yellow))
                .title(Line::from(format!(" {star}{} ", character.name)).centered())
                .title_bottom(
                    Line::from(vec![
                        Span::styled(" esc", Style::default().fg(Color::Cyan)),
                        Span::styled(" close  ", Style::default().fg(Color::DarkGray)),
                        Span::styled("f", Style::default().fg(Color::Cyan)),
                        Span::styled(" favorite ", Style::default().fg(Color::DarkGray)),
                    ])
                    .centered(),
                );
            let inner = block.inner(content_area);
            frame.render_widget(block, content_area);

            let chunks = Layout::vertical([
                Constraint::Length(1), // Spacer
                Constraint::Min(1),    // Attributes
                Constraint::Length(1), // Portrait
            ])
            .split(inner);

            let lines: Vec<Line> = detail_rows(character)
                .into_iter()
                .map(|(label, value)| {
                    Line::from(vec![
                        Span::styled(
                            format!("  {label:<LABEL_WIDTH$}"),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(
                            value,
                            Style::default()
                                .fg(Color::White)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                })
                .collect();
            frame.render_widget(Paragraph::new(lines), chunks[1]);

            if let Some(url) = portrait_url(character) {
                let portrait = Line::from(Span::styled(
                    format!("  {url}"),
                    Style::default().fg(Color::DarkGray),
                ));
                frame.render_widget(Paragraph::new(portrait), chunks[2]);
            }
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: modal_style(),
                behavior: ModalBehavior::default(),
                on_close: close_overlay,
                render_content: &mut render_content,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stat;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use tui_dispatch::testing::*;

    fn luke() -> Character {
        Character {
            name: "Luke Skywalker".into(),
            height: "172".into(),
            mass: Stat::Number(77.0),
            hair_color: "blond".into(),
            skin_color: "fair".into(),
            eye_color: "blue".into(),
            birth_year: "19BBY".into(),
            gender: "male".into(),
            url: None,
        }
    }

    #[test]
    fn test_detail_rows_order_and_units() {
        let rows = detail_rows(&luke());
        let labels: Vec<_> = rows.iter().map(|(label, _)| *label).collect();

        assert_eq!(
            labels,
            vec![
                "Height",
                "Mass",
                "Hair Color",
                "Skin Color",
                "Eye Color",
                "Birth Year",
                "Gender"
            ]
        );
        assert_eq!(rows[0].1, "172 cm");
        assert_eq!(rows[1].1, "77 kg");
    }

    #[test]
    fn test_overlay_area_centered_and_clamped() {
        let area = overlay_area(Rect::new(0, 0, 100, 33));
        assert_eq!(area, Rect::new(16, 10, OVERLAY_WIDTH, OVERLAY_HEIGHT));

        let small = overlay_area(Rect::new(0, 0, 40, 8));
        assert_eq!(small, Rect::new(0, 0, 40, 8));
    }

    #[test]
    fn test_units_not_converted() {
        let character = Character {
            height: "unknown".into(),
            mass: "1,358".into(),
            ..Default::default()
        };
        let rows = detail_rows(&character);
        assert_eq!(rows[0].1, "unknown cm");
        assert_eq!(rows[1].1, "1,358 kg");
    }

    #[test]
    fn test_escape_closes() {
        let mut overlay = DetailOverlay::new();
        let character = luke();
        let props = DetailOverlayProps {
            character: &character,
            is_favorite: false,
            is_focused: true,
        };

        let actions: Vec<_> = overlay
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
                props,
            )
            .into_iter()
            .collect();
        actions.assert_first(Action::DetailClose);
    }

    #[test]
    fn test_favorite_key_toggles_shown_character() {
        let mut overlay = DetailOverlay::new();
        let character = luke();
        let props = DetailOverlayProps {
            character: &character,
            is_favorite: false,
            is_focused: true,
        };

        let actions: Vec<_> = overlay
            .handle_event(&EventKind::Key(key("f")), props)
            .into_iter()
            .collect();
        actions.assert_first(Action::FavoriteToggle(luke()));
    }
}
