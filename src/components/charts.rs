use season_stats::{ComparisonSeries, Metric, Snapshot};
use tui::style::{Color, Style};
use tui::text::Line;
use tui::widgets::{Bar, BarGroup};

/// Bar/line colours by season position: baseline grey, current green.
pub const SEASON_COLORS: [Color; 2] = [Color::Gray, Color::Green];

pub fn season_color(index: usize) -> Color {
    SEASON_COLORS.get(index).copied().unwrap_or(Color::White)
}

// ---------------------------------------------------------------------------
// Bar chart: one group per metric, one bar per season
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct BarCell {
    pub season: u16,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarCluster {
    pub metric: Metric,
    pub cells: Vec<BarCell>,
}

impl BarCluster {
    /// Bars can't go below the axis, so negatives are drawn by magnitude in
    /// red with the signed value as text.
    pub fn to_group(&self, color_of: impl Fn(u16) -> Color) -> BarGroup<'static> {
        let bars: Vec<Bar<'static>> = self
            .cells
            .iter()
            .map(|cell| {
                let color = if cell.value < 0 { Color::Red } else { color_of(cell.season) };
                Bar::default()
                    .value(cell.value.unsigned_abs())
                    .text_value(compact_number(cell.value))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color))
            })
            .collect();
        BarGroup::default()
            .label(Line::from(short_label(self.metric)))
            .bars(&bars)
    }
}

/// Regroup per-season snapshots into per-metric clusters, seasons in snapshot order.
pub fn bar_clusters(snapshots: &[Snapshot]) -> Vec<BarCluster> {
    if snapshots.is_empty() {
        return Vec::new();
    }
    Metric::ALL
        .into_iter()
        .map(|metric| BarCluster {
            metric,
            cells: snapshots
                .iter()
                .map(|s| BarCell { season: s.season, value: s.value(metric).unwrap_or(0) })
                .collect(),
        })
        .collect()
}

/// Axis-sized metric names for narrow bar groups.
pub fn short_label(metric: Metric) -> &'static str {
    match metric {
        Metric::RushYards => "Rush",
        Metric::PassYards => "Pass",
        Metric::TotalYards => "Total",
        Metric::PointsFor => "PF",
        Metric::PointsAgainst => "PA",
        Metric::PointDiff => "Diff",
    }
}

/// "2.6k" style value text so numbers fit inside a bar. Units are picked after
/// rounding to one decimal, so 999_960 reads "1.0M".
pub fn compact_number(value: i64) -> String {
    let abs = value.unsigned_abs();
    if abs < 1000 {
        return value.to_string();
    }
    let sign = if value < 0 { "-" } else { "" };
    let tenths_k = (abs + 50) / 100;
    if tenths_k < 10_000 {
        return format!("{sign}{}.{}k", tenths_k / 10, tenths_k % 10);
    }
    let tenths_m = (abs + 50_000) / 100_000;
    format!("{sign}{}.{}M", tenths_m / 10, tenths_m % 10)
}

// ---------------------------------------------------------------------------
// Line chart: one line per season
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SeasonLine {
    pub season: u16,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineData {
    pub label: String,
    pub lines: Vec<SeasonLine>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl LineData {
    pub fn x_labels(&self) -> Vec<String> {
        axis_labels(self.x_bounds)
    }

    pub fn y_labels(&self) -> Vec<String> {
        axis_labels(self.y_bounds)
    }
}

pub fn line_data(series: &ComparisonSeries) -> LineData {
    let lines: Vec<SeasonLine> = series
        .seasons()
        .into_iter()
        .map(|season| SeasonLine {
            season,
            points: series
                .season_points(season)
                .map(|p| (f64::from(p.week), p.value as f64))
                .collect(),
        })
        .collect();

    let max_week = series.points.iter().map(|p| p.week).max().unwrap_or(1);
    let min_value = series.points.iter().map(|p| p.value).min().unwrap_or(0).min(0);
    let max_value = series.points.iter().map(|p| p.value).max().unwrap_or(0).max(0);
    let y_max = if max_value == min_value { min_value + 1 } else { max_value };

    LineData {
        label: series.label.clone(),
        lines,
        x_bounds: [1.0, f64::from(max_week.max(2))],
        y_bounds: [min_value as f64, y_max as f64],
    }
}

fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let [lo, hi] = bounds;
    [lo, (lo + hi) / 2.0, hi]
        .into_iter()
        .map(|v| format!("{}", v.round() as i64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use season_stats::ComparisonPoint;

    fn snapshot(season: u16, diff: i64) -> Snapshot {
        Snapshot {
            season,
            week: 4,
            values: Metric::ALL
                .into_iter()
                .map(|m| (m, if m == Metric::PointDiff { diff } else { 100 }))
                .collect(),
        }
    }

    fn series(values: &[(u16, u32, i64)]) -> ComparisonSeries {
        ComparisonSeries {
            metric: Metric::PointDiff,
            label: "Cumulative Point Diff".into(),
            points: values
                .iter()
                .map(|&(season, week, value)| ComparisonPoint { week, season, value })
                .collect(),
        }
    }

    #[test]
    fn clusters_follow_metric_order_with_one_cell_per_season() {
        let clusters = bar_clusters(&[snapshot(2017, 12), snapshot(2022, -3)]);
        let metrics: Vec<_> = clusters.iter().map(|c| c.metric).collect();
        assert_eq!(metrics, Metric::ALL.to_vec());
        let diff = clusters.last().unwrap();
        assert_eq!(
            diff.cells,
            vec![BarCell { season: 2017, value: 12 }, BarCell { season: 2022, value: -3 }]
        );
    }

    #[test]
    fn clusters_with_one_omitted_season_have_single_cells() {
        let clusters = bar_clusters(&[snapshot(2022, 5)]);
        assert!(clusters.iter().all(|c| c.cells.len() == 1));
        assert!(bar_clusters(&[]).is_empty());
    }

    #[test]
    fn compact_number_shortens_thousands() {
        assert_eq!(compact_number(999), "999");
        assert_eq!(compact_number(2615), "2.6k");
        assert_eq!(compact_number(-1200), "-1.2k");
        assert_eq!(compact_number(-7), "-7");
    }

    #[test]
    fn compact_number_switches_unit_after_rounding() {
        assert_eq!(compact_number(999_949), "999.9k");
        assert_eq!(compact_number(999_950), "1.0M");
        assert_eq!(compact_number(-999_999), "-1.0M");
        assert_eq!(compact_number(12_345_678), "12.3M");
        assert_eq!(compact_number(i64::MIN), "-9223372036854.8M");
    }

    #[test]
    fn line_data_splits_by_season() {
        let data = line_data(&series(&[(2017, 1, 13), (2017, 2, 6), (2022, 1, 3), (2022, 2, 20)]));
        assert_eq!(data.lines.len(), 2);
        assert_eq!(data.lines[0].season, 2017);
        assert_eq!(data.lines[0].points, vec![(1.0, 13.0), (2.0, 6.0)]);
        assert_eq!(data.lines[1].points, vec![(1.0, 3.0), (2.0, 20.0)]);
        assert_eq!(data.x_bounds, [1.0, 2.0]);
        assert_eq!(data.y_bounds, [0.0, 20.0]);
        assert_eq!(data.label, "Cumulative Point Diff");
    }

    #[test]
    fn line_bounds_include_negative_values() {
        let data = line_data(&series(&[(2017, 1, -7), (2017, 2, -10), (2017, 3, 4)]));
        assert_eq!(data.y_bounds, [-10.0, 4.0]);
        assert_eq!(data.y_labels(), vec!["-10", "-3", "4"]);
        assert_eq!(data.x_labels(), vec!["1", "2", "3"]);
    }

    #[test]
    fn flat_series_gets_nonempty_range() {
        let data = line_data(&series(&[(2017, 1, 0)]));
        assert_eq!(data.x_bounds, [1.0, 2.0]);
        assert_eq!(data.y_bounds, [0.0, 1.0]);
    }
}
