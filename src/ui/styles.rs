use ratatui::prelude::Stylize;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Accent shared by the header, the loading badge and enabled interval buttons.
pub const ACCENT: Color = Color::Indexed(208);

/// Closing-price line.
pub const CHART_LINE: Color = Color::Rgb(75, 192, 192);

/// "Selected Stock: <name>" above the chart.
pub fn selected_stock_header(name: &str) -> Text<'static> {
    Text::from(format!("Selected Stock: {name}").bold().fg(ACCENT))
}

/// Key help at the bottom of the screen.
pub fn hint_line(text: &str) -> Line<'static> {
    Line::from(text.to_string().dim())
}

/// Grey text shown in the search box while it is empty.
pub fn placeholder_span(text: &str) -> Span<'static> {
    Span::from(text.to_string()).dim()
}

/// Badge appended to the search box title while a lookup is in flight.
pub fn loading_badge() -> Span<'static> {
    Span::styled("(loading…)", Style::default().fg(ACCENT))
}

pub fn suggestion_highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// The active interval's button reads as disabled.
pub fn interval_button_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_interval_button_is_dimmed() {
        assert_eq!(interval_button_style(true).fg, Some(Color::DarkGray));
        assert_eq!(interval_button_style(false).fg, Some(ACCENT));
    }

    #[test]
    fn header_names_the_selection() {
        let header = selected_stock_header("Apple Inc.");
        let text: String = header.lines[0]
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(text, "Selected Stock: Apple Inc.");
    }
}
