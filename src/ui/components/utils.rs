use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub fn split_vertical(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints.to_vec())
        .split(area)
        .to_vec()
}

pub fn split_horizontal(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints.to_vec())
        .split(area)
        .to_vec()
}

/// Height of the suggestion list for `count` rows, capped at `max_rows`, borders included.
pub fn list_height(count: usize, max_rows: usize) -> u16 {
    if count == 0 {
        0
    } else {
        (count.min(max_rows) as u16) + 2
    }
}
