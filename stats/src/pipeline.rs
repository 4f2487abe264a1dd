//! Season-comparison pipeline: derive → cumulative → snapshots for the bar
//! chart, and the per-metric comparison series for the line chart.

use crate::error::InvalidMetric;
use crate::{
    ComparisonPoint, ComparisonSeries, CumulativeRow, DerivedRow, DerivedTable, Metric,
    SeasonTable, Snapshot, Totals,
};
use log::debug;

/// Append `point_diff = Score.Tm - Score.Opp`. A null operand gives a null diff.
pub fn derive(table: &SeasonTable) -> DerivedTable {
    let rows = table
        .games
        .iter()
        .map(|game| DerivedRow {
            point_diff: game
                .score
                .points_for
                .zip(game.score.points_against)
                .map(|(tm, opp)| tm.saturating_sub(opp)),
            game: game.clone(),
        })
        .collect();

    DerivedTable {
        team: table.team.clone(),
        season: table.season,
        rows,
    }
}

/// Running totals of every tracked metric, one row per input row.
///
/// Weeks are numbered 1.. by position; source week labels are ignored so a
/// gap in the labels never produces a gap here.
pub fn cumulative(table: &DerivedTable) -> Vec<CumulativeRow> {
    table
        .rows
        .iter()
        .scan(Totals::default(), |totals, row| {
            *totals = totals.plus(row);
            Some(*totals)
        })
        .zip(1u32..)
        .map(|(totals, week)| CumulativeRow {
            season: table.season,
            week,
            totals,
        })
        .collect()
}

/// Totals at `week` for each season in `rows`, in order of first appearance.
///
/// A season with fewer than `week` rows is left out rather than reported as an
/// error; early in a season the comparison is expected to be lopsided.
pub fn snapshots(rows: &[CumulativeRow], week: u32) -> Vec<Snapshot> {
    let mut seasons: Vec<u16> = Vec::new();
    for row in rows {
        if !seasons.contains(&row.season) {
            seasons.push(row.season);
        }
    }

    seasons
        .into_iter()
        .filter_map(|season| {
            let row = rows.iter().find(|r| r.season == season && r.week == week);
            if row.is_none() {
                debug!("no cumulative row for {season} at week {week}; omitting");
            }
            row
        })
        .map(|row| Snapshot {
            season: row.season,
            week: row.week,
            values: Metric::ALL
                .into_iter()
                .map(|metric| (metric, row.totals.get(metric)))
                .collect(),
        })
        .collect()
}

/// Week-by-week running sum of the metric named `selector` for both seasons,
/// `first` then `second`. Recomputed from the derived rows on every call.
pub fn comparison_series(
    first: &DerivedTable,
    second: &DerivedTable,
    selector: &str,
) -> Result<ComparisonSeries, InvalidMetric> {
    let metric = Metric::from_label(selector)?;

    let points = [first, second]
        .into_iter()
        .flat_map(|table| running_values(table, metric))
        .collect();

    Ok(ComparisonSeries {
        metric,
        label: format!("Cumulative {}", metric.label()),
        points,
    })
}

fn running_values(table: &DerivedTable, metric: Metric) -> impl Iterator<Item = ComparisonPoint> + '_ {
    table
        .rows
        .iter()
        .scan(0i64, move |sum, row| {
            *sum = sum.saturating_add(metric.value(row).unwrap_or(0));
            Some(*sum)
        })
        .zip(1u32..)
        .map(move |(value, week)| ComparisonPoint {
            week,
            season: table.season,
            value,
        })
}
