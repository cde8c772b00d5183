use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::domain::Interval;
use crate::ui::components::utils::split_horizontal;
use crate::ui::styles::interval_button_style;

/// One button per interval; the active one is drawn disabled.
pub fn render_interval_bar(f: &mut Frame<'_>, area: Rect, current: Interval) {
    let constraints = vec![Constraint::Ratio(1, Interval::ALL.len() as u32); Interval::ALL.len()];
    let cells = split_horizontal(area, &constraints);

    for (idx, (interval, cell)) in Interval::ALL.iter().zip(cells).enumerate() {
        let style = interval_button_style(*interval == current);
        let button = Paragraph::new(Line::from(vec![
            Span::styled(format!("F{} ", idx + 1), Style::default().fg(Color::Gray)),
            Span::styled(interval.label(), style),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style));
        f.render_widget(button, cell);
    }
}
