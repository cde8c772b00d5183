use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::app::Orchestrator;
use crate::domain::Interval;
use crate::error::Result;
use crate::fetch::StockApi;
use crate::ui::components::{
    render_chart_panel, render_interval_bar, render_search_box, render_suggestions,
    utils::{list_height, split_vertical},
    TerminalGuard,
};
use crate::ui::styles::{hint_line, selected_stock_header};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const MAX_SUGGESTION_ROWS: usize = 6;
const HELP: &str =
    "type to search • ↑/↓ pick • Enter select • ←/→ or F1–F5 interval • Esc quit";

/// Input events understood by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    Input(char),
    Backspace,
    Up,
    Down,
    Select,
    Interval(Interval),
    Quit,
}

/// Translate a key press into a viewer action. `current` is the active interval.
pub fn map_key(key: KeyEvent, current: Interval) -> Option<ViewerAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(ViewerAction::Quit)
        }
        KeyCode::Esc => Some(ViewerAction::Quit),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(ViewerAction::Input(ch))
        }
        KeyCode::Backspace => Some(ViewerAction::Backspace),
        KeyCode::Up => Some(ViewerAction::Up),
        KeyCode::Down => Some(ViewerAction::Down),
        KeyCode::Enter => Some(ViewerAction::Select),
        KeyCode::Left => Some(ViewerAction::Interval(current.prev())),
        KeyCode::Right => Some(ViewerAction::Interval(current.next())),
        KeyCode::F(n @ 1..=5) => Some(ViewerAction::Interval(Interval::ALL[usize::from(n) - 1])),
        _ => None,
    }
}

/// Screen-level state layered over the orchestrator: the suggestion cursor.
pub struct ViewerApp<A: StockApi> {
    orchestrator: Orchestrator<A>,
    highlight: usize,
}

impl<A: StockApi> ViewerApp<A> {
    pub fn new(orchestrator: Orchestrator<A>) -> Self {
        Self {
            orchestrator,
            highlight: 0,
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator<A> {
        &self.orchestrator
    }

    pub fn orchestrator_mut(&mut self) -> &mut Orchestrator<A> {
        &mut self.orchestrator
    }

    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// Apply an action. Returns `false` when the viewer should exit.
    pub fn handle(&mut self, action: ViewerAction) -> bool {
        match action {
            ViewerAction::Quit => return false,
            ViewerAction::Input(ch) => {
                let mut query = self.orchestrator.state().query.clone();
                query.push(ch);
                self.orchestrator.on_query_changed(query);
                self.highlight = 0;
            }
            ViewerAction::Backspace => {
                let mut query = self.orchestrator.state().query.clone();
                if query.pop().is_some() {
                    self.orchestrator.on_query_changed(query);
                    self.highlight = 0;
                }
            }
            ViewerAction::Up => {
                let len = self.orchestrator.state().suggestions.len();
                if len > 0 {
                    self.highlight = (self.highlight.min(len - 1) + len - 1) % len;
                }
            }
            ViewerAction::Down => {
                let len = self.orchestrator.state().suggestions.len();
                if len > 0 {
                    self.highlight = (self.highlight.min(len - 1) + 1) % len;
                }
            }
            ViewerAction::Select => {
                let len = self.orchestrator.state().suggestions.len();
                if len > 0 {
                    self.orchestrator
                        .select_suggestion_at(self.highlight.min(len - 1));
                    self.highlight = 0;
                }
            }
            ViewerAction::Interval(interval) => {
                // Buttons exist only under a chart, and the active one is disabled.
                let state = self.orchestrator.state();
                if state.series.is_some() && interval != state.interval {
                    self.orchestrator.change_interval(interval);
                }
            }
        }
        true
    }

    pub fn render(&self, f: &mut Frame<'_>) {
        let state = self.orchestrator.state();
        let show_graph = state.series.is_some();

        let rows = split_vertical(
            f.size(),
            &[
                Constraint::Length(3),
                Constraint::Length(list_height(state.suggestions.len(), MAX_SUGGESTION_ROWS)),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(if show_graph { 3 } else { 0 }),
                Constraint::Length(1),
            ],
        );

        render_suggestions(f, rows[1], &state.suggestions, self.highlight);

        if let Some(name) = state.selected_name() {
            f.render_widget(
                Paragraph::new(selected_stock_header(name)),
                rows[2],
            );
        }

        if show_graph {
            render_chart_panel(f, rows[3], state);
            render_interval_bar(f, rows[4], state.interval);
        }

        f.render_widget(Paragraph::new(hint_line(HELP)), rows[5]);

        // Drawn last so the cursor ends up in the input.
        render_search_box(f, rows[0], &state.query, state.loading);
    }
}

/// Run the interactive viewer until the user quits.
pub async fn run_viewer<A: StockApi>(orchestrator: Orchestrator<A>) -> Result<()> {
    let mut app = ViewerApp::new(orchestrator);
    let mut guard = TerminalGuard::new()?;
    app.orchestrator_mut().mount();

    loop {
        app.orchestrator_mut().drain_completions();
        guard.draw(|f| app.render(f))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                let current = app.orchestrator().state().interval;
                if let Some(action) = map_key(key, current) {
                    if !app.handle(action) {
                        break;
                    }
                }
            }
        }

        tokio::task::yield_now().await;
    }

    guard.restore()?;
    Ok(())
}
