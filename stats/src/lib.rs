pub mod error;
pub mod loader;
pub mod pipeline;

use serde::{Deserialize, Serialize};

pub use error::{InvalidMetric, LoadError};
pub use loader::{load_season, read_table, season_path};
pub use pipeline::{comparison_series, cumulative, derive, snapshots};

// ---------------------------------------------------------------------------
// Domain types: one explicit record per header category
// ---------------------------------------------------------------------------

/// Two-level column name as stored in the header: `"Category, SubField"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnKey {
    pub category: String,
    pub field: String,
}

impl ColumnKey {
    pub fn new(category: impl Into<String>, field: impl Into<String>) -> Self {
        Self { category: category.into(), field: field.into() }
    }

    pub fn is(&self, category: &str, field: &str) -> bool {
        self.category == category && self.field == field
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Offense {
    pub first_downs: Option<i64>, // "1stD"
    pub total_yards: Option<i64>, // "TotYd"
    pub pass_yards: Option<i64>,  // "PassY"
    pub rush_yards: Option<i64>,  // "RushY"
    pub turnovers: Option<i64>,   // "TO"
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub points_for: Option<i64>,     // "Tm"
    pub points_against: Option<i64>, // "Opp"
}

/// One row of a season table. A bye week keeps its row with every numeric
/// field set to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameRow {
    pub week: Option<u32>,
    pub opponent: Option<String>,
    pub offense: Offense,
    pub score: Score,
}

impl GameRow {
    pub fn is_bye(&self) -> bool {
        self.score.points_for.is_none() && self.score.points_against.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeasonTable {
    pub team: String,
    pub season: u16,
    pub columns: Vec<ColumnKey>,
    pub games: Vec<GameRow>,
}

impl SeasonTable {
    /// Keep only the first `weeks` rows.
    pub fn truncated(&self, weeks: usize) -> Self {
        Self {
            team: self.team.clone(),
            season: self.season,
            columns: self.columns.clone(),
            games: self.games.iter().take(weeks).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedRow {
    pub game: GameRow,
    pub point_diff: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedTable {
    pub team: String,
    pub season: u16,
    pub rows: Vec<DerivedRow>,
}

// ---------------------------------------------------------------------------
// Tracked metrics
// ---------------------------------------------------------------------------

/// The six columns the dashboard accumulates. Serialized by display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "Rush Yds")]
    RushYards,
    #[serde(rename = "Pass Yds")]
    PassYards,
    #[serde(rename = "Total Off. Yds")]
    TotalYards,
    #[serde(rename = "Points For")]
    PointsFor,
    #[serde(rename = "Points Against")]
    PointsAgainst,
    #[serde(rename = "Point Diff")]
    PointDiff,
}

impl Metric {
    /// Selector order, also the bar-chart order.
    pub const ALL: [Metric; 6] = [
        Metric::RushYards,
        Metric::PassYards,
        Metric::TotalYards,
        Metric::PointsFor,
        Metric::PointsAgainst,
        Metric::PointDiff,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::RushYards => "Rush Yds",
            Metric::PassYards => "Pass Yds",
            Metric::TotalYards => "Total Off. Yds",
            Metric::PointsFor => "Points For",
            Metric::PointsAgainst => "Points Against",
            Metric::PointDiff => "Point Diff",
        }
    }

    /// Resolve a selector label. Matching is exact.
    pub fn from_label(label: &str) -> Result<Self, InvalidMetric> {
        Metric::ALL
            .into_iter()
            .find(|m| m.label() == label)
            .ok_or_else(|| InvalidMetric(label.to_string()))
    }

    /// Value of this metric in one derived row; `None` for a null cell.
    pub fn value(&self, row: &DerivedRow) -> Option<i64> {
        let game = &row.game;
        match self {
            Metric::RushYards => game.offense.rush_yards,
            Metric::PassYards => game.offense.pass_yards,
            Metric::TotalYards => game.offense.total_yards,
            Metric::PointsFor => game.score.points_for,
            Metric::PointsAgainst => game.score.points_against,
            Metric::PointDiff => row.point_diff,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Aggregated outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub rush_yards: i64,
    pub pass_yards: i64,
    pub total_yards: i64,
    pub points_for: i64,
    pub points_against: i64,
    pub point_diff: i64,
}

impl Totals {
    pub fn get(&self, metric: Metric) -> i64 {
        match metric {
            Metric::RushYards => self.rush_yards,
            Metric::PassYards => self.pass_yards,
            Metric::TotalYards => self.total_yards,
            Metric::PointsFor => self.points_for,
            Metric::PointsAgainst => self.points_against,
            Metric::PointDiff => self.point_diff,
        }
    }

    /// Running total after one more row. Null cells count as zero; sums
    /// saturate at the `i64` bounds.
    pub fn plus(self, row: &DerivedRow) -> Self {
        let add = |acc: i64, metric: Metric| acc.saturating_add(metric.value(row).unwrap_or(0));
        Self {
            rush_yards: add(self.rush_yards, Metric::RushYards),
            pass_yards: add(self.pass_yards, Metric::PassYards),
            total_yards: add(self.total_yards, Metric::TotalYards),
            points_for: add(self.points_for, Metric::PointsFor),
            points_against: add(self.points_against, Metric::PointsAgainst),
            point_diff: add(self.point_diff, Metric::PointDiff),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativeRow {
    pub season: u16,
    /// 1-based output position, not the source week label.
    pub week: u32,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub season: u16,
    pub week: u32,
    pub values: Vec<(Metric, i64)>,
}

impl Snapshot {
    pub fn value(&self, metric: Metric) -> Option<i64> {
        self.values.iter().find(|(m, _)| *m == metric).map(|(_, v)| *v)
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.values.iter().map(|(m, _)| *m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComparisonPoint {
    pub week: u32,
    pub season: u16,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonSeries {
    pub metric: Metric,
    /// Axis label, e.g. "Cumulative Rush Yds".
    pub label: String,
    pub points: Vec<ComparisonPoint>,
}

impl ComparisonSeries {
    /// Points for one season, in week order.
    pub fn season_points(&self, season: u16) -> impl Iterator<Item = &ComparisonPoint> + '_ {
        self.points.iter().filter(move |p| p.season == season)
    }

    /// Seasons in the order they appear in the series.
    pub fn seasons(&self) -> Vec<u16> {
        let mut seasons: Vec<u16> = Vec::new();
        for point in &self.points {
            if !seasons.contains(&point.season) {
                seasons.push(point.season);
            }
        }
        seasons
    }
}
