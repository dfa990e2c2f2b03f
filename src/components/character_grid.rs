use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use super::Component;
use crate::action::Action;
use crate::state::Character;

pub const TILE_WIDTH: u16 = 28;
pub const TILE_HEIGHT: u16 = 4;

const FAVORITE_STAR: &str = "\u{2605}";

pub struct CharacterGridProps<'a> {
    pub characters: &'a [Character],
    pub cursor: usize,
    pub is_favorite: &'a dyn Fn(&Character) -> bool,
    /// Dim the tiles while the next page is loading
    pub dimmed: bool,
}

/// Wrapping grid of character tiles.
///
/// Remembers the column count from the last render so that up/down
/// navigation moves by one visual row.
pub struct CharacterGrid {
    columns: usize,
}

impl Default for CharacterGrid {
    fn default() -> Self {
        Self { columns: 3 }
    }
}

impl CharacterGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn columns_for_width(width: u16) -> usize {
        usize::from((width / TILE_WIDTH).max(1))
    }
}

fn tile_lines(character: &Character, favorite: bool, highlighted: bool) -> Vec<Line<'static>> {
    let name_style = if highlighted {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };
    let star = if favorite {
        Span::styled(format!("{FAVORITE_STAR} "), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(format!("{FAVORITE_STAR} "), Style::default().fg(Color::DarkGray))
    };

    vec![
        Line::from(vec![star, Span::styled(character.name.clone(), name_style)]),
        Line::from(Span::styled(
            format!("  {} \u{b7} {}", character.gender, character.birth_year),
            Style::default().fg(Color::Gray),
        )),
    ]
}

impl Component<Action> for CharacterGrid {
    type Props<'a> = CharacterGridProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.columns = Self::columns_for_width(area.width);
        if props.characters.is_empty() || area.height < TILE_HEIGHT {
            return;
        }

        let visible_rows = usize::from((area.height / TILE_HEIGHT).max(1));
        let cursor_row = props.cursor / self.columns;
        let first_row = cursor_row.saturating_sub(visible_rows - 1);

        let rows = Layout::vertical(vec![Constraint::Length(TILE_HEIGHT); visible_rows]).split(area);
        let columns = Layout::horizontal(vec![Constraint::Length(TILE_WIDTH); self.columns]);

        for (row_index, row_area) in rows.iter().enumerate() {
            let cells = columns.split(*row_area);
            for (col_index, cell) in cells.iter().enumerate() {
                let index = (first_row + row_index) * self.columns + col_index;
                let Some(character) = props.characters.get(index) else {
                    return;
                };

                let highlighted = index == props.cursor;
                let border_style = match (highlighted, props.dimmed) {
                    (true, _) => Style::default().fg(Color::Yellow),
                    (false, true) => Style::default().fg(Color::Rgb(60, 60, 60)),
                    (false, false) => Style::default().fg(Color::DarkGray),
                };
                let block = Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style);

                let mut paragraph = Paragraph::new(tile_lines(
                    character,
                    (props.is_favorite)(character),
                    highlighted,
                ))
                .block(block);
                if props.dimmed {
                    paragraph = paragraph.style(Style::default().add_modifier(Modifier::DIM));
                }
                frame.render_widget(paragraph, *cell);
            }
        }
    }
}
