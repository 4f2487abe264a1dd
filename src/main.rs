mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::keys::Flow;
use crate::state::app_settings::{
    AppSettings, ENV_BASELINE, ENV_DATA_DIR, ENV_FULL_SEASON, ENV_LOG, ENV_METRIC, ENV_SEASON,
    ENV_TEAM, ENV_WEEK,
};
use crate::state::dashboard::Dashboard;
use crate::state::messages::UiEvent;
use anyhow::Context;
use crossterm::event::{Event, EventStream};
use crossterm::{cursor, execute, terminal};
use futures_util::StreamExt;
use log::{LevelFilter, error, info};
use season_stats::{ComparisonSeries, Snapshot};
use serde::Serialize;
use std::io::Stdout;
use std::{io, panic};
use tokio::sync::mpsc;
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunMode {
    Tui,
    Json,
}

/// `--json` output: what the two charts would show at startup.
#[derive(Serialize)]
struct Report<'a> {
    team: &'a str,
    week: u32,
    snapshots: &'a [Snapshot],
    comparison: &'a ComparisonSeries,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let Some(mode) = handle_cli_args() else {
        return Ok(());
    };

    let settings = AppSettings::load().context("invalid SEASONDASH_* configuration")?;

    if mode == RunMode::Json {
        return print_report(&settings);
    }

    better_panic::install();

    tui_logger::init_logger(LevelFilter::Trace)?;
    tui_logger::set_default_level(settings.log_level.unwrap_or(LevelFilter::Info));

    // Load before touching the terminal so data errors print normally.
    let dashboard = Dashboard::init(&settings).with_context(|| {
        format!("could not load season data from {}", settings.data_dir.display())
    })?;
    let app = App::new(settings, dashboard)?;

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx).await;

    input_handler.abort();
    cleanup_terminal()?;
    Ok(())
}

fn print_report(settings: &AppSettings) -> anyhow::Result<()> {
    let dashboard = Dashboard::init(settings).with_context(|| {
        format!("could not load season data from {}", settings.data_dir.display())
    })?;
    let comparison = dashboard.comparison(settings.initial_metric.label())?;
    let report = Report {
        team: settings.team_name(),
        week: dashboard.week,
        snapshots: &dashboard.snapshots,
        comparison: &comparison,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn handle_cli_args() -> Option<RunMode> {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Some(RunMode::Tui);
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            None
        }
        "-V" | "--version" => {
            println!("seasondash {}", env!("CARGO_PKG_VERSION"));
            None
        }
        "--json" => Some(RunMode::Json),
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> String {
    format!(
        "seasondash - compare two seasons of a team, week by week

Usage:
  seasondash
  seasondash --json
  seasondash --help
  seasondash --version

Environment:
  {ENV_DATA_DIR:<24} Directory holding {{season}}_{{team}}_schedule_results.csv (default data)
  {ENV_TEAM:<24} Team abbreviation (default phi)
  {ENV_BASELINE:<24} Baseline season (default 2017)
  {ENV_SEASON:<24} Current season (default 2022)
  {ENV_WEEK:<24} Bar chart week, 1-18 (default 10)
  {ENV_FULL_SEASON:<24} Keep games past the bar chart week (default false)
  {ENV_METRIC:<24} Initial line chart metric (default \"Total Off. Yds\")
  {ENV_LOG:<24} Log level (default info)"
    )
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
    mut ui_events: mpsc::Receiver<UiEvent>,
) {
    while let Some(ui_event) = ui_events.recv().await {
        match ui_event {
            UiEvent::AppStarted => {
                info!("showing {} {}", app.settings.team_name(), app.state.dashboard.current.season);
            }
            UiEvent::KeyPressed(key_event) => {
                if keys::handle_key_bindings(key_event, &mut app) == Flow::Quit {
                    break;
                }
            }
            UiEvent::Resize => {}
        }
        if let Err(e) = draw::draw(&mut terminal, &app) {
            error!("draw failed: {e}");
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        let ui_event = match event {
            Ok(Event::Key(key_event)) => UiEvent::KeyPressed(key_event),
            Ok(Event::Resize(_, _)) => UiEvent::Resize,
            Ok(_) => continue,
            Err(e) => {
                error!("terminal input error: {e}");
                continue;
            }
        };
        if ui_events.send(ui_event).await.is_err() {
            break;
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::MoveTo(0, 0))?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    execute!(stdout, terminal::LeaveAlternateScreen)?;
    execute!(stdout, cursor::Show)?;
    terminal::disable_raw_mode()
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let _ = cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::dashboard::fixtures::sample_dashboard;
    use season_stats::Metric;

    #[test]
    fn usage_lists_every_setting() {
        let text = usage_text();
        for key in [
            ENV_DATA_DIR, ENV_TEAM, ENV_BASELINE, ENV_SEASON, ENV_WEEK, ENV_FULL_SEASON, ENV_METRIC,
            ENV_LOG,
        ] {
            assert!(text.contains(key), "missing {key}");
        }
        assert!(text.contains("{season}_{team}_schedule_results.csv"));
    }

    #[test]
    fn report_serializes_both_charts() {
        let dash = sample_dashboard(10, false);
        let comparison = dash.comparison(Metric::PointDiff.label()).unwrap();
        let report = Report {
            team: "Philadelphia Eagles",
            week: dash.week,
            snapshots: &dash.snapshots,
            comparison: &comparison,
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["week"], 10);
        assert_eq!(json["snapshots"].as_array().unwrap().len(), 2);
        assert_eq!(json["comparison"]["points"].as_array().unwrap().len(), 20);
    }
}
