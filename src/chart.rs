use chrono::NaiveDate;
use log::debug;

use crate::domain::{StockSeries, DATE_FMT};

pub const SERIES_LABEL: &str = "Closing Price";
pub const NO_DATA_MESSAGE: &str = "No data available to display the graph.";

/// What the chart panel should show for the current series.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesView {
    /// No series loaded yet; render nothing.
    NothingYet,
    /// The server returned an empty mapping; render [`NO_DATA_MESSAGE`].
    NoData,
    Points(ChartSeries),
}

impl SeriesView {
    pub fn from_series(series: Option<&StockSeries>) -> Self {
        match series {
            None => SeriesView::NothingYet,
            Some(series) if series.is_empty() => SeriesView::NoData,
            Some(series) => {
                let chart = ChartSeries::from_series(series);
                if chart.points.is_empty() {
                    SeriesView::NoData
                } else {
                    SeriesView::Points(chart)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
}

/// Closing prices in ascending date order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: &'static str,
    pub points: Vec<PricePoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub first_date: String,
    pub last_date: String,
    pub sessions: usize,
    pub min_close: f64,
    pub max_close: f64,
    pub change: f64,
    pub change_pct: Option<f64>,
}

impl ChartSeries {
    pub fn from_series(series: &StockSeries) -> Self {
        let points = series
            .iter()
            .filter_map(|(date, record)| match record.close_value() {
                Some(close) => Some(PricePoint {
                    date: date.clone(),
                    close,
                }),
                None => {
                    debug!("skipping {date}: close {:?} is not a number", record.close);
                    None
                }
            })
            .collect();

        Self {
            label: SERIES_LABEL,
            points,
        }
    }

    /// `(x, y)` pairs with x as the point index.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx as f64, point.close))
            .collect()
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        let first = self.points.first()?;
        let last = self.points.last()?;

        let (min_close, max_close) = self.points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), point| (lo.min(point.close), hi.max(point.close)),
        );
        let change = last.close - first.close;
        let change_pct = if first.close.abs() > f64::EPSILON {
            Some(change / first.close * 100.0)
        } else {
            None
        };

        Some(SeriesSummary {
            first_date: first.date.clone(),
            last_date: last.date.clone(),
            sessions: self.points.len(),
            min_close,
            max_close,
            change,
            change_pct,
        })
    }

    /// Up to `desired` evenly spaced `(index, label)` pairs for the x axis, always including
    /// both ends. Spans longer than a year are labelled `YYYY-MM`, shorter ones `MM-DD`.
    pub fn date_ticks(&self, desired: usize) -> Vec<(usize, String)> {
        if self.points.is_empty() {
            return Vec::new();
        }

        let last_index = self.points.len() - 1;
        if last_index == 0 {
            return vec![(0, self.points[0].date.clone())];
        }

        let desired = desired.max(2).min(self.points.len());
        let step = last_index as f64 / (desired - 1) as f64;
        let mut indices: Vec<usize> = (0..desired)
            .map(|i| ((i as f64 * step).round() as usize).min(last_index))
            .collect();
        indices.sort_unstable();
        indices.dedup();

        let span_days = match (
            parse_date(&self.points[0].date),
            parse_date(&self.points[last_index].date),
        ) {
            (Some(first), Some(last)) => (last - first).num_days().abs(),
            _ => 0,
        };
        let mid_format = if span_days > 365 { "%Y-%m" } else { "%m-%d" };

        indices
            .into_iter()
            .map(|idx| {
                let raw = &self.points[idx].date;
                let label = if idx == 0 || idx == last_index {
                    raw.clone()
                } else {
                    parse_date(raw)
                        .map(|date| date.format(mid_format).to_string())
                        .unwrap_or_else(|| raw.clone())
                };
                (idx, label)
            })
            .collect()
    }

    /// Price bounds padded by 5% so the line does not touch the frame.
    pub fn y_bounds(&self) -> [f64; 2] {
        let Some(summary) = self.summary() else {
            return [0.0, 1.0];
        };
        let span = summary.max_close - summary.min_close;
        let pad = if span.abs() < 1e-6 {
            summary.max_close.abs().max(1.0) * 0.05
        } else {
            span * 0.05
        };
        [summary.min_close - pad, summary.max_close + pad]
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FMT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceRecord;

    fn series(rows: &[(&str, &str)]) -> StockSeries {
        rows.iter()
            .map(|(date, close)| (date.to_string(), PriceRecord::with_close(*close)))
            .collect()
    }

    #[test]
    fn classifies_absent_empty_and_populated_series() {
        assert_eq!(SeriesView::from_series(None), SeriesView::NothingYet);
        assert_eq!(
            SeriesView::from_series(Some(&StockSeries::new())),
            SeriesView::NoData
        );
        let populated = series(&[("2024-03-15", "172.62")]);
        assert!(matches!(
            SeriesView::from_series(Some(&populated)),
            SeriesView::Points(_)
        ));
    }

    #[test]
    fn points_are_ascending_and_skip_bad_closes() {
        let data = series(&[
            ("2024-03-15", "172.62"),
            ("2024-03-13", "171.13"),
            ("2024-03-14", "n/a"),
        ]);
        let chart = ChartSeries::from_series(&data);

        let dates: Vec<&str> = chart.points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, ["2024-03-13", "2024-03-15"]);
        assert_eq!(chart.label, "Closing Price");
        assert_eq!(chart.xy(), vec![(0.0, 171.13), (1.0, 172.62)]);
    }

    #[test]
    fn summarises_change() {
        let data = series(&[
            ("2024-01-02", "100"),
            ("2024-01-03", "90"),
            ("2024-01-04", "110"),
        ]);
        let summary = ChartSeries::from_series(&data).summary().unwrap();

        assert_eq!(summary.first_date, "2024-01-02");
        assert_eq!(summary.last_date, "2024-01-04");
        assert_eq!(summary.sessions, 3);
        assert_eq!(summary.min_close, 90.0);
        assert_eq!(summary.max_close, 110.0);
        assert!((summary.change - 10.0).abs() < 1e-9);
        assert!((summary.change_pct.unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn only_unparseable_rows_render_as_no_data() {
        let data = series(&[("2024-01-02", "")]);
        assert_eq!(SeriesView::from_series(Some(&data)), SeriesView::NoData);
    }

    #[test]
    fn date_ticks_include_both_ends() {
        let data = series(&[
            ("2023-01-02", "1"),
            ("2023-06-01", "2"),
            ("2023-12-01", "3"),
            ("2024-06-03", "4"),
        ]);
        let ticks = ChartSeries::from_series(&data).date_ticks(3);

        assert_eq!(ticks.first().unwrap(), &(0, "2023-01-02".to_string()));
        assert_eq!(ticks.last().unwrap(), &(3, "2024-06-03".to_string()));
        assert!(ticks.iter().any(|(_, label)| label.len() == 7));
    }

    #[test]
    fn flat_series_still_has_vertical_room() {
        let data = series(&[("2024-01-02", "50"), ("2024-01-03", "50")]);
        let [lo, hi] = ChartSeries::from_series(&data).y_bounds();
        assert!(lo < 50.0 && hi > 50.0);
    }
}
