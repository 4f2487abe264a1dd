use crate::app::MenuItem;
use crate::state::dashboard::Dashboard;
use season_stats::{ComparisonSeries, InvalidMetric, Metric};

// ---------------------------------------------------------------------------
// Metric dropdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MetricSelector {
    /// The metric the line chart currently shows.
    pub selected: Metric,
    /// Index into `Metric::ALL` of the highlighted entry while open.
    pub highlighted: usize,
    pub open: bool,
}

impl MetricSelector {
    pub fn new(selected: Metric) -> Self {
        Self { selected, highlighted: index_of(selected), open: false }
    }

    pub fn open(&mut self) {
        self.highlighted = index_of(self.selected);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self) {
        self.highlighted = (self.highlighted + 1) % Metric::ALL.len();
    }

    pub fn prev(&mut self) {
        self.highlighted = (self.highlighted + Metric::ALL.len() - 1) % Metric::ALL.len();
    }

    pub fn highlighted_label(&self) -> &'static str {
        Metric::ALL[self.highlighted].label()
    }
}

fn index_of(metric: Metric) -> usize {
    Metric::ALL.iter().position(|m| *m == metric).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Games table
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct GamesViewState {
    /// 0 = baseline season, 1 = current season.
    pub season_index: usize,
    pub scroll_offset: u16,
}

impl GamesViewState {
    pub fn switch_season(&mut self) {
        self.season_index = (self.season_index + 1) % 2;
        self.scroll_offset = 0;
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub dashboard: Dashboard,
    pub selector: MetricSelector,
    /// Line-chart data for `selector.selected`.
    pub line: ComparisonSeries,
    pub games: GamesViewState,
}

impl AppState {
    pub fn new(dashboard: Dashboard, initial_metric: Metric) -> Result<Self, InvalidMetric> {
        let line = dashboard.comparison(initial_metric.label())?;
        Ok(Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            dashboard,
            selector: MetricSelector::new(initial_metric),
            line,
            games: GamesViewState::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_wraps_in_both_directions() {
        let mut sel = MetricSelector::new(Metric::PointDiff);
        sel.open();
        sel.next();
        assert_eq!(sel.highlighted_label(), "Rush Yds");
        sel.prev();
        sel.prev();
        assert_eq!(sel.highlighted_label(), "Points Against");
    }

    #[test]
    fn reopening_highlights_the_selected_metric() {
        let mut sel = MetricSelector::new(Metric::PassYards);
        sel.open();
        sel.next();
        sel.next();
        sel.close();
        assert_eq!(sel.selected, Metric::PassYards);
        sel.open();
        assert_eq!(sel.highlighted_label(), "Pass Yds");
    }

    #[test]
    fn switching_season_resets_scroll() {
        let mut games = GamesViewState { season_index: 0, scroll_offset: 4 };
        games.switch_season();
        assert_eq!((games.season_index, games.scroll_offset), (1, 0));
        games.switch_season();
        assert_eq!(games.season_index, 0);
    }
}
