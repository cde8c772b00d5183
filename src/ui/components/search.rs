use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::Stock;
use crate::ui::styles::{loading_badge, placeholder_span, suggestion_highlight};

const PLACEHOLDER: &str = "Search stocks...";

pub fn render_search_box(f: &mut Frame<'_>, area: Rect, query: &str, loading: bool) {
    let title = if loading {
        Line::from(vec![Span::raw("Search "), loading_badge()])
    } else {
        Line::from("Search")
    };

    let content = if query.is_empty() {
        Line::from(placeholder_span(PLACEHOLDER))
    } else {
        Line::from(query.to_string())
    };

    f.render_widget(
        Paragraph::new(content).block(Block::default().borders(Borders::ALL).title(title)),
        area,
    );

    let inner_width = area.width.saturating_sub(2);
    let offset = (query.width() as u16).min(inner_width.saturating_sub(1));
    f.set_cursor(area.x + 1 + offset, area.y + 1);
}

pub fn render_suggestions(f: &mut Frame<'_>, area: Rect, suggestions: &[Stock], highlight: usize) {
    if suggestions.is_empty() || area.height == 0 {
        return;
    }

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|stock| ListItem::new(stock.label()))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Suggestions"))
        .highlight_style(suggestion_highlight())
        .highlight_symbol("› ");

    let mut state = ListState::default();
    state.select(Some(highlight.min(suggestions.len() - 1)));
    f.render_stateful_widget(list, area, &mut state);
}
