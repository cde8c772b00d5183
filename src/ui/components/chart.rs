use ratatui::prelude::Stylize;
use ratatui::text::Line as TextLine;
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap},
};

use crate::app::ViewerState;
use crate::chart::{ChartSeries, SeriesView, NO_DATA_MESSAGE};
use crate::ui::components::utils::split_vertical;
use crate::ui::styles::CHART_LINE;

const GRAPH_TITLE: &str = "Stock Price Graph";
const DATE_TICKS: usize = 6;

pub fn render_chart_panel(f: &mut Frame<'_>, area: Rect, state: &ViewerState) {
    let segments = split_vertical(area, &[Constraint::Min(3), Constraint::Length(1)]);
    let chart_area = segments[0];
    let footer_area = segments[1];

    let mut title = match &state.displayed {
        Some(request) => format!(
            "{} - {} ({})",
            GRAPH_TITLE,
            request.ticker.to_uppercase(),
            request.interval
        ),
        None => GRAPH_TITLE.to_string(),
    };
    if let Some(pending) = state.outstanding_request() {
        title.push_str(&format!(
            " [requested {} {}]",
            pending.ticker.to_uppercase(),
            pending.interval
        ));
    }
    let block = Block::default().borders(Borders::ALL).title(title);

    let footer = match SeriesView::from_series(state.series.as_ref()) {
        SeriesView::NothingYet => {
            f.render_widget(block, chart_area);
            String::new()
        }
        SeriesView::NoData => {
            f.render_widget(
                Paragraph::new(NO_DATA_MESSAGE)
                    .alignment(Alignment::Center)
                    .block(block),
                chart_area,
            );
            String::new()
        }
        SeriesView::Points(series) => {
            render_line_chart(f, chart_area, block, &series);
            footer_text(&series)
        }
    };

    f.render_widget(
        Paragraph::new(TextLine::from(footer).gray()).wrap(Wrap { trim: true }),
        footer_area,
    );
}

fn render_line_chart(f: &mut Frame<'_>, area: Rect, block: Block<'_>, series: &ChartSeries) {
    let points = series.xy();
    let last_x = points.len().saturating_sub(1).max(1) as f64;
    let [y_min, y_max] = series.y_bounds();

    let x_labels: Vec<Span> = series
        .date_ticks(DATE_TICKS)
        .into_iter()
        .map(|(_, label)| Span::raw(label))
        .collect();
    let y_labels: Vec<Span> = [y_min, (y_min + y_max) / 2.0, y_max]
        .iter()
        .map(|value| Span::raw(format!("{value:.2}")))
        .collect();

    let dataset = Dataset::default()
        .name(series.label)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(CHART_LINE))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, last_x])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn footer_text(series: &ChartSeries) -> String {
    let Some(summary) = series.summary() else {
        return String::new();
    };
    let pct = summary
        .change_pct
        .map(|pct| format!(" ({pct:+.2}%)"))
        .unwrap_or_default();
    format!(
        "{} sessions • {} -> {} • Low {:.2} • High {:.2} • Change {:+.2}{}",
        summary.sessions,
        summary.first_date,
        summary.last_date,
        summary.min_close,
        summary.max_close,
        summary.change,
        pct
    )
}
