use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;

pub const TITLE: &str = "STAR WARS";

pub struct PageHeaderProps<'a> {
    pub page: u32,
    pub favorites: usize,
    pub spinner: Option<&'a str>,
}

/// Title on the left, page and favorites count on the right
pub struct PageHeader;

impl Component<Action> for PageHeader {
    type Props<'a> = PageHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::horizontal([Constraint::Min(1), Constraint::Length(32)]).split(area);

        let title = Line::from(Span::styled(
            format!(" {TITLE}"),
            Style::default()
                .fg(Color::Rgb(255, 232, 31))
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(title), chunks[0]);

        let mut spans = Vec::new();
        if let Some(frame_str) = props.spinner {
            spans.push(Span::styled(
                format!("{frame_str} "),
                Style::default().fg(Color::Cyan),
            ));
        }
        spans.push(Span::styled(
            format!("Page {}", props.page),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::styled("  \u{2605} ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format!("{} favorites ", props.favorites),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(Line::from(spans).right_aligned()), chunks[1]);
    }
}
