use crate::error::LoadError;
use crate::{ColumnKey, GameRow, Offense, Score, SeasonTable};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Separator between the two header levels, e.g. `"Offense, RushY"`.
pub const HEADER_SEPARATOR: &str = ", ";

/// Storage location of one season: `<dir>/<season>_<team>_schedule_results.csv`.
pub fn season_path(data_dir: &Path, team: &str, season: u16) -> PathBuf {
    data_dir.join(format!("{season}_{team}_schedule_results.csv"))
}

/// Load one season of one team from `data_dir`.
pub fn load_season(data_dir: &Path, team: &str, season: u16) -> Result<SeasonTable, LoadError> {
    let path = season_path(data_dir, team, season);
    debug!("loading {team} {season} from {}", path.display());
    let file = File::open(&path).map_err(|source| LoadError::Io { path: path.clone(), source })?;
    let table = read_table(file, &path, team, season)?;
    info!(
        "loaded {} rows ({} byes) for {team} {season}",
        table.games.len(),
        table.games.iter().filter(|g| g.is_bye()).count()
    );
    Ok(table)
}

/// Parse a season table from any reader. `source` only labels errors.
pub fn read_table<R: Read>(
    reader: R,
    source: &Path,
    team: &str,
    season: u16,
) -> Result<SeasonTable, LoadError> {
    let csv_err = |source_err: csv::Error| LoadError::Csv { path: source.to_path_buf(), source: source_err };

    let mut rdr = ReaderBuilder::new().from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();
    let columns = split_headers(&headers, source)?;
    let layout = ColumnLayout::resolve(&columns, source)?;

    let mut games = Vec::new();
    let mut previous_week: Option<u32> = None;
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(csv_err)?;
        // Header is line 1, so the first data row is line 2.
        let row = idx + 2;
        let game = layout.game_row(&record, &columns, source, row)?;

        if let Some(week) = game.week {
            if let Some(previous) = previous_week
                && week <= previous
            {
                return Err(LoadError::WeekOrder {
                    path: source.to_path_buf(),
                    row,
                    week,
                    previous,
                });
            }
            previous_week = Some(week);
        }
        games.push(game);
    }

    Ok(SeasonTable {
        team: team.to_string(),
        season,
        columns,
        games,
    })
}

fn split_headers(headers: &StringRecord, source: &Path) -> Result<Vec<ColumnKey>, LoadError> {
    headers
        .iter()
        .map(|header| {
            header
                .split_once(HEADER_SEPARATOR)
                .map(|(category, field)| ColumnKey::new(category, field))
                .ok_or_else(|| LoadError::Header {
                    path: source.to_path_buf(),
                    header: header.to_string(),
                })
        })
        .collect()
}

/// Column indices of the fields the record types care about.
struct ColumnLayout {
    week: Option<usize>,
    opponent: Option<usize>,
    first_downs: Option<usize>,
    total_yards: usize,
    pass_yards: usize,
    rush_yards: usize,
    turnovers: Option<usize>,
    points_for: usize,
    points_against: usize,
}

impl ColumnLayout {
    fn resolve(columns: &[ColumnKey], source: &Path) -> Result<Self, LoadError> {
        let find = |category: &str, field: &str| columns.iter().position(|c| c.is(category, field));
        let require = |category: &'static str, field: &'static str| {
            find(category, field).ok_or_else(|| LoadError::MissingColumn {
                path: source.to_path_buf(),
                category,
                field,
            })
        };

        Ok(Self {
            week: columns.iter().position(|c| c.field == "Week"),
            opponent: columns
                .iter()
                .position(|c| c.field == "Opp" && c.category != "Score"),
            first_downs: find("Offense", "1stD"),
            total_yards: require("Offense", "TotYd")?,
            pass_yards: require("Offense", "PassY")?,
            rush_yards: require("Offense", "RushY")?,
            turnovers: find("Offense", "TO"),
            points_for: require("Score", "Tm")?,
            points_against: require("Score", "Opp")?,
        })
    }

    fn game_row(
        &self,
        record: &StringRecord,
        columns: &[ColumnKey],
        source: &Path,
        row: usize,
    ) -> Result<GameRow, LoadError> {
        let number = |idx: usize| -> Result<Option<i64>, LoadError> {
            let raw = record.get(idx).unwrap_or("");
            parse_number(raw).ok_or_else(|| LoadError::Value {
                path: source.to_path_buf(),
                row,
                column: columns
                    .get(idx)
                    .map(|c| format!("{}{HEADER_SEPARATOR}{}", c.category, c.field))
                    .unwrap_or_default(),
                value: raw.to_string(),
            })
        };
        let optional = |idx: Option<usize>| idx.map(number).transpose().map(Option::flatten);

        Ok(GameRow {
            // Playoff rows carry text labels ("Division"); only numeric labels count.
            week: self
                .week
                .and_then(|idx| record.get(idx))
                .and_then(|w| w.trim().parse().ok()),
            opponent: self
                .opponent
                .and_then(|idx| record.get(idx))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string),
            offense: Offense {
                first_downs: optional(self.first_downs)?,
                total_yards: number(self.total_yards)?,
                pass_yards: number(self.pass_yards)?,
                rush_yards: number(self.rush_yards)?,
                turnovers: optional(self.turnovers)?,
            },
            score: Score {
                points_for: number(self.points_for)?,
                points_against: number(self.points_against)?,
            },
        })
    }
}

/// `Some(None)` for an empty cell, `Some(Some(n))` for an integer, `None` when
/// the cell is not a number. Whole floats ("120.0") are accepted since exports
/// with null cells write integer columns that way. Values must fit in `i32`,
/// which keeps every season sum well inside `i64`.
fn parse_number(raw: &str) -> Option<Option<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(None);
    }
    if let Ok(n) = raw.parse::<i32>() {
        return Some(Some(i64::from(n)));
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_nan() => Some(None),
        Ok(f) if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) => {
            Some(Some(f as i64))
        }
        _ => None,
    }
}
