use anyhow::{Context, bail};
use log::LevelFilter;
use season_stats::Metric;
use std::path::PathBuf;

/// Highest regular-season week a target week may name.
pub const MAX_WEEK: u32 = 18;

pub const ENV_DATA_DIR: &str = "SEASONDASH_DATA_DIR";
pub const ENV_TEAM: &str = "SEASONDASH_TEAM";
pub const ENV_BASELINE: &str = "SEASONDASH_BASELINE";
pub const ENV_SEASON: &str = "SEASONDASH_SEASON";
pub const ENV_WEEK: &str = "SEASONDASH_WEEK";
pub const ENV_FULL_SEASON: &str = "SEASONDASH_FULL_SEASON";
pub const ENV_METRIC: &str = "SEASONDASH_METRIC";
pub const ENV_LOG: &str = "SEASONDASH_LOG";

static TEAMS: &[(&str, &str)] = &[
    ("ari", "Arizona Cardinals"),
    ("atl", "Atlanta Falcons"),
    ("bal", "Baltimore Ravens"),
    ("buf", "Buffalo Bills"),
    ("car", "Carolina Panthers"),
    ("chi", "Chicago Bears"),
    ("cin", "Cincinnati Bengals"),
    ("cle", "Cleveland Browns"),
    ("dal", "Dallas Cowboys"),
    ("den", "Denver Broncos"),
    ("det", "Detroit Lions"),
    ("gnb", "Green Bay Packers"),
    ("htx", "Houston Texans"),
    ("clt", "Indianapolis Colts"),
    ("jax", "Jacksonville Jaguars"),
    ("kan", "Kansas City Chiefs"),
    ("rai", "Las Vegas Raiders"),
    ("sdg", "Los Angeles Chargers"),
    ("ram", "Los Angeles Rams"),
    ("mia", "Miami Dolphins"),
    ("min", "Minnesota Vikings"),
    ("nwe", "New England Patriots"),
    ("nor", "New Orleans Saints"),
    ("nyg", "New York Giants"),
    ("nyj", "New York Jets"),
    ("phi", "Philadelphia Eagles"),
    ("pit", "Pittsburgh Steelers"),
    ("sfo", "San Francisco 49ers"),
    ("sea", "Seattle Seahawks"),
    ("tam", "Tampa Bay Buccaneers"),
    ("oti", "Tennessee Titans"),
    ("was", "Washington Commanders"),
];

/// Full team name for a schedule-file abbreviation.
pub fn team_name(abbrev: &str) -> Option<&'static str> {
    TEAMS
        .iter()
        .find(|(a, _)| *a == abbrev)
        .map(|(_, name)| *name)
}

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub data_dir: PathBuf,
    pub team: String,
    pub baseline_season: u16,
    pub current_season: u16,
    /// Target week of the bar chart; also where tables are cut unless `full_season`.
    pub week: u32,
    pub full_season: bool,
    pub initial_metric: Metric,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: Some(LevelFilter::Info),
            data_dir: PathBuf::from("data"),
            team: "phi".to_string(),
            baseline_season: 2017,
            current_season: 2022,
            week: 10,
            full_season: false,
            initial_metric: Metric::TotalYards,
        }
    }
}

impl AppSettings {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from a key lookup; unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut settings = Self::default();

        if let Some(dir) = get(ENV_DATA_DIR) {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(team) = get(ENV_TEAM) {
            settings.team = team.to_lowercase();
        }
        if team_name(&settings.team).is_none() {
            bail!("{ENV_TEAM}: unknown team abbreviation {:?}", settings.team);
        }

        if let Some(year) = get(ENV_BASELINE) {
            settings.baseline_season = year
                .parse()
                .with_context(|| format!("{ENV_BASELINE}: {year:?} is not a season year"))?;
        }
        if let Some(year) = get(ENV_SEASON) {
            settings.current_season = year
                .parse()
                .with_context(|| format!("{ENV_SEASON}: {year:?} is not a season year"))?;
        }
        if settings.baseline_season == settings.current_season {
            bail!("baseline and current season are both {}", settings.current_season);
        }

        if let Some(week) = get(ENV_WEEK) {
            settings.week = week
                .parse()
                .with_context(|| format!("{ENV_WEEK}: {week:?} is not a week number"))?;
        }
        if !(1..=MAX_WEEK).contains(&settings.week) {
            bail!("{ENV_WEEK}: week {} is outside 1..={MAX_WEEK}", settings.week);
        }

        if let Some(flag) = get(ENV_FULL_SEASON) {
            settings.full_season = match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => bail!("{ENV_FULL_SEASON}: expected true/false, got {other:?}"),
            };
        }

        if let Some(label) = get(ENV_METRIC) {
            settings.initial_metric =
                Metric::from_label(&label).with_context(|| format!("{ENV_METRIC} is not a selectable metric"))?;
        }

        if let Some(level) = get(ENV_LOG) {
            settings.log_level = Some(
                level
                    .parse()
                    .with_context(|| format!("{ENV_LOG}: {level:?} is not a log level"))?,
            );
        }

        Ok(settings)
    }

    pub fn team_name(&self) -> &'static str {
        team_name(&self.team).unwrap_or("Team")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> anyhow::Result<AppSettings> {
        let env: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        AppSettings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_compare_2022_eagles_to_2017_through_week_10() {
        let s = settings_from(&[]).unwrap();
        assert_eq!(s.team, "phi");
        assert_eq!(s.team_name(), "Philadelphia Eagles");
        assert_eq!((s.baseline_season, s.current_season), (2017, 2022));
        assert_eq!(s.week, 10);
        assert!(!s.full_season);
        assert_eq!(s.initial_metric, Metric::TotalYards);
        assert_eq!(s.data_dir, PathBuf::from("data"));
        assert_eq!(s.log_level, Some(LevelFilter::Info));
    }

    #[test]
    fn overrides_are_applied() {
        let s = settings_from(&[
            (ENV_DATA_DIR, "/tmp/seasons"),
            (ENV_TEAM, "DAL"),
            (ENV_BASELINE, "2016"),
            (ENV_SEASON, "2023"),
            (ENV_WEEK, "17"),
            (ENV_FULL_SEASON, "true"),
            (ENV_METRIC, "Point Diff"),
            (ENV_LOG, "debug"),
        ])
        .unwrap();
        assert_eq!(s.data_dir, PathBuf::from("/tmp/seasons"));
        assert_eq!(s.team, "dal");
        assert_eq!(s.team_name(), "Dallas Cowboys");
        assert_eq!((s.baseline_season, s.current_season), (2016, 2023));
        assert_eq!(s.week, 17);
        assert!(s.full_season);
        assert_eq!(s.initial_metric, Metric::PointDiff);
        assert_eq!(s.log_level, Some(LevelFilter::Debug));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let s = settings_from(&[(ENV_WEEK, "  "), (ENV_TEAM, "")]).unwrap();
        assert_eq!(s.week, 10);
        assert_eq!(s.team, "phi");
    }

    #[test]
    fn week_outside_season_is_rejected() {
        assert!(settings_from(&[(ENV_WEEK, "0")]).is_err());
        assert!(settings_from(&[(ENV_WEEK, "19")]).is_err());
        assert!(settings_from(&[(ENV_WEEK, "ten")]).is_err());
        assert!(settings_from(&[(ENV_WEEK, "18")]).is_ok());
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let err = settings_from(&[(ENV_METRIC, "Turnovers")]).unwrap_err();
        assert!(format!("{err:#}").contains("Turnovers"));
    }

    #[test]
    fn unknown_team_and_equal_seasons_are_rejected() {
        assert!(settings_from(&[(ENV_TEAM, "xyz")]).is_err());
        assert!(settings_from(&[(ENV_BASELINE, "2022")]).is_err());
        assert!(settings_from(&[(ENV_FULL_SEASON, "maybe")]).is_err());
        assert!(settings_from(&[(ENV_LOG, "loud")]).is_err());
    }
}
