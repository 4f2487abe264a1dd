use crate::state::app_settings::AppSettings;
use chrono::Local;
use log::info;
use season_stats::{
    ComparisonSeries, DerivedTable, InvalidMetric, LoadError, SeasonTable, Snapshot,
};

/// Everything computed once at startup. Read-only for the life of the process.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub week: u32,
    pub baseline: DerivedTable,
    pub current: DerivedTable,
    /// Bar-chart input; a season short of `week` rows has no entry.
    pub snapshots: Vec<Snapshot>,
    pub loaded_at: String,
}

impl Dashboard {
    /// Load both seasons and run the bar-chart half of the pipeline.
    pub fn init(settings: &AppSettings) -> Result<Self, LoadError> {
        let baseline =
            season_stats::load_season(&settings.data_dir, &settings.team, settings.baseline_season)?;
        let current =
            season_stats::load_season(&settings.data_dir, &settings.team, settings.current_season)?;
        Ok(Self::from_tables(baseline, current, settings.week, settings.full_season))
    }

    pub fn from_tables(baseline: SeasonTable, current: SeasonTable, week: u32, full_season: bool) -> Self {
        let (baseline, current) = if full_season {
            (baseline, current)
        } else {
            let weeks = week as usize;
            (baseline.truncated(weeks), current.truncated(weeks))
        };

        let baseline = season_stats::derive(&baseline);
        let current = season_stats::derive(&current);

        let mut rows = season_stats::cumulative(&baseline);
        rows.extend(season_stats::cumulative(&current));
        let snapshots = season_stats::snapshots(&rows, week);
        info!(
            "week {week}: {} snapshot(s) from {} and {}",
            snapshots.len(),
            baseline.season,
            current.season
        );

        Self {
            week,
            baseline,
            current,
            snapshots,
            loaded_at: Local::now().format("%H:%M").to_string(),
        }
    }

    /// Line-chart data for a selector label, rebuilt from the derived tables.
    pub fn comparison(&self, selector: &str) -> Result<ComparisonSeries, InvalidMetric> {
        season_stats::comparison_series(&self.baseline, &self.current, selector)
    }

    pub fn seasons(&self) -> [&DerivedTable; 2] {
        [&self.baseline, &self.current]
    }

    /// 0 for the baseline season, 1 otherwise; picks chart colours.
    pub fn season_index(&self, season: u16) -> usize {
        usize::from(season != self.baseline.season)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use season_stats::Metric;
    use std::path::PathBuf;

    #[test]
    fn truncates_to_target_week_by_default() {
        let dash = sample_dashboard(10, false);
        assert_eq!(dash.baseline.rows.len(), 10);
        assert_eq!(dash.current.rows.len(), 10);
        assert_eq!(dash.snapshots.len(), 2);
    }

    #[test]
    fn full_season_keeps_every_row() {
        let dash = sample_dashboard(10, true);
        assert_eq!(dash.baseline.rows.len(), 17);
        assert_eq!(dash.current.rows.len(), 18);
        let series = dash.comparison("Point Diff").unwrap();
        assert_eq!(series.points.len(), 35);
    }

    #[test]
    fn week_past_baseline_season_omits_its_bar() {
        let dash = sample_dashboard(18, true);
        assert_eq!(dash.snapshots.len(), 1);
        assert_eq!(dash.snapshots[0].season, 2022);
    }

    #[test]
    fn bye_as_last_week_still_has_totals() {
        // 2017 week 10 is the bye; the snapshot equals week 9's totals.
        let dash = sample_dashboard(10, false);
        let snap = &dash.snapshots[0];
        assert_eq!(snap.season, 2017);
        assert_eq!(snap.value(Metric::PointsFor), Some(283));
    }

    #[test]
    fn comparison_rejects_unknown_label() {
        let dash = sample_dashboard(10, false);
        assert!(dash.comparison("Sacks").is_err());
    }

    #[test]
    fn init_reports_missing_files() {
        let settings = AppSettings {
            data_dir: PathBuf::from("does/not/exist"),
            ..AppSettings::default()
        };
        let err = Dashboard::init(&settings).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn init_reads_shipped_data() {
        let settings = AppSettings {
            data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"),
            ..AppSettings::default()
        };
        let dash = Dashboard::init(&settings).unwrap();
        assert_eq!(dash.seasons().map(|t| t.season), [2017, 2022]);
        assert_eq!(dash.week, 10);
    }
}
