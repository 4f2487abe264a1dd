use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::dashboard::Dashboard;
use log::{error, info};
use season_stats::DerivedTable;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Dashboard,
    Games,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, dashboard: Dashboard) -> anyhow::Result<Self> {
        let state = AppState::new(dashboard, settings.initial_metric)?;
        Ok(Self { settings, state })
    }

    // -----------------------------------------------------------------------
    // Metric selection: the dropdown's change handler
    // -----------------------------------------------------------------------

    /// Rebuild the line chart for `label`. An unrecognized label leaves the
    /// current chart in place and is reported through `last_error`.
    pub fn select_metric(&mut self, label: &str) -> bool {
        match self.state.dashboard.comparison(label) {
            Ok(series) => {
                info!("line chart now shows {}", series.label);
                self.state.selector.selected = series.metric;
                self.state.line = series;
                self.state.last_error = None;
                true
            }
            Err(e) => {
                error!("metric selection failed: {e}");
                self.state.last_error = Some(e.to_string());
                false
            }
        }
    }

    pub fn open_selector(&mut self) {
        self.state.selector.open();
    }

    pub fn close_selector(&mut self) {
        self.state.selector.close();
    }

    pub fn selector_next(&mut self) {
        self.state.selector.next();
    }

    pub fn selector_prev(&mut self) {
        self.state.selector.prev();
    }

    /// Close the dropdown and apply the highlighted entry.
    pub fn commit_selector(&mut self) {
        let label = self.state.selector.highlighted_label();
        self.state.selector.close();
        if label != self.state.selector.selected.label() {
            self.select_metric(label);
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.selector.close();
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Games table
    // -----------------------------------------------------------------------

    pub fn games_table(&self) -> &DerivedTable {
        self.state.dashboard.seasons()[self.state.games.season_index]
    }

    pub fn games_switch_season(&mut self) {
        self.state.games.switch_season();
    }

    pub fn games_scroll_down(&mut self) {
        let max = self.games_table().rows.len().saturating_sub(1) as u16;
        self.state.games.scroll_offset = (self.state.games.scroll_offset + 1).min(max);
    }

    pub fn games_scroll_up(&mut self) {
        self.state.games.scroll_offset = self.state.games.scroll_offset.saturating_sub(1);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::state::dashboard::fixtures::sample_dashboard;
    use season_stats::Metric;

    pub fn sample_app() -> App {
        App::new(AppSettings::default(), sample_dashboard(10, false)).unwrap()
    }

    #[test]
    fn starts_on_dashboard_with_initial_metric() {
        let app = sample_app();
        assert_eq!(app.state.active_tab, MenuItem::Dashboard);
        assert_eq!(app.state.line.metric, Metric::TotalYards);
        assert_eq!(app.state.line.points.len(), 20);
    }

    #[test]
    fn select_metric_replaces_line_chart() {
        let mut app = sample_app();
        assert!(app.select_metric("Point Diff"));
        assert_eq!(app.state.selector.selected, Metric::PointDiff);
        assert_eq!(app.state.line.label, "Cumulative Point Diff");
        assert!(app.state.last_error.is_none());
    }

    #[test]
    fn invalid_selection_keeps_previous_chart() {
        let mut app = sample_app();
        let before = app.state.line.clone();
        assert!(!app.select_metric("Sacks"));
        assert_eq!(app.state.line, before);
        assert_eq!(app.state.selector.selected, Metric::TotalYards);
        assert!(app.state.last_error.as_deref().unwrap().contains("Sacks"));
    }

    #[test]
    fn commit_applies_highlighted_metric() {
        let mut app = sample_app();
        app.open_selector();
        app.selector_next();
        app.commit_selector();
        assert!(!app.state.selector.open);
        assert_eq!(app.state.selector.selected, Metric::PointsFor);
        assert_eq!(app.state.line.metric, Metric::PointsFor);
    }

    #[test]
    fn leaving_dashboard_closes_selector() {
        let mut app = sample_app();
        app.open_selector();
        app.update_tab(MenuItem::Games);
        assert!(!app.state.selector.open);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Games);
    }

    #[test]
    fn games_scroll_is_bounded() {
        let mut app = sample_app();
        for _ in 0..50 {
            app.games_scroll_down();
        }
        assert_eq!(app.state.games.scroll_offset, 9);
        app.games_switch_season();
        assert_eq!(app.games_table().season, 2022);
        app.games_scroll_up();
        assert_eq!(app.state.games.scroll_offset, 0);
    }
}
