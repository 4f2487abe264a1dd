use std::io::{self, Stdout};

use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::symbols;
use tui::text::{Line, Span};
use tui::widgets::{
    Axis, BarChart, Block, BorderType, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row,
    Table, Tabs,
};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::charts::{bar_clusters, line_data, season_color};
use crate::components::selector::{MetricDropdown, SELECTOR_HEIGHT};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 2] = &["Dashboard", "Games"];

pub fn draw(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &App) -> io::Result<()> {
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return Ok(());
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
            draw_header(f, layout.header, app);
        }

        match app.state.active_tab {
            MenuItem::Dashboard => draw_dashboard(f, layout.main, app),
            MenuItem::Games => draw_games(f, layout.main, app),
            MenuItem::Help => draw_placeholder(
                f,
                layout.main,
                "Help: q=quit  1=Dashboard  2=Games  Enter/m=choose metric  j/k=move  Esc=cancel  s=switch season  f=full screen  \"=logs",
            ),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
    })?;
    Ok(())
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Dashboard => 0,
        MenuItem::Games => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let dash = &app.state.dashboard;
    let team = app.settings.team_name();
    let nickname = team.rsplit(' ').next().unwrap_or(team);

    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(36)]).areas(area);

    let title = vec![
        Line::from(Span::styled(
            format!(" {nickname} Comparison Dashboard"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                " Comparing the {} {team} to the {} team",
                dash.current.season, dash.baseline.season
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(title), left);

    let status = match app.state.last_error.as_deref() {
        Some(err) => Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))),
        None => Line::from(Span::styled(
            format!("loaded {}", dash.loaded_at),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(status).alignment(Alignment::Right), right);
}

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
    let [bar_area, line_column] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let [line_area, selector_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(SELECTOR_HEIGHT)]).areas(line_column);

    draw_bar_chart(f, bar_area, app);
    draw_line_chart(f, line_area, app);

    let dropdown = MetricDropdown { selector: &app.state.selector };
    if app.state.selector.open {
        let list_area = MetricDropdown::list_area(selector_area, line_column);
        dropdown.render_list(list_area, f.buffer_mut());
    }
    f.render_widget(dropdown, selector_area);
}

fn season_legend(seasons: &[u16], app: &App) -> Line<'static> {
    let mut spans = Vec::new();
    for season in seasons {
        let color = season_color(app.state.dashboard.season_index(*season));
        spans.push(Span::styled("■ ", Style::default().fg(color)));
        spans.push(Span::raw(format!("{season}   ")));
    }
    Line::from(spans)
}

fn draw_bar_chart(f: &mut Frame, area: Rect, app: &App) {
    let dash = &app.state.dashboard;
    let block = default_border(Color::White)
        .title(format!(" Performance Comparison through Week {} ", dash.week));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let clusters = bar_clusters(&dash.snapshots);
    if clusters.is_empty() {
        f.render_widget(
            Paragraph::new(format!("Neither season has reached week {}", dash.week))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [legend_area, chart_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    let seasons: Vec<u16> = dash.snapshots.iter().map(|s| s.season).collect();
    f.render_widget(Paragraph::new(season_legend(&seasons, app)), legend_area);

    let bars_per_group = seasons.len() as u16;
    let group_gap = 2;
    let group_count = clusters.len() as u16;
    let bar_width = (chart_area.width.saturating_sub(group_gap * group_count)
        / (group_count * bars_per_group).max(1))
    .clamp(1, 9);

    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(group_gap);
    for cluster in &clusters {
        chart = chart.data(cluster.to_group(|season| season_color(dash.season_index(season))));
    }
    f.render_widget(chart, chart_area);
}

fn draw_line_chart(f: &mut Frame, area: Rect, app: &App) {
    let data = line_data(&app.state.line);

    let datasets: Vec<Dataset> = data
        .lines
        .iter()
        .map(|line| {
            let color = season_color(app.state.dashboard.season_index(line.season));
            Dataset::default()
                .name(line.season.to_string())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(&line.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(default_border(Color::White).title(" Week by Week Performance "))
        .x_axis(
            Axis::default()
                .title("Week")
                .style(Style::default().fg(Color::DarkGray))
                .bounds(data.x_bounds)
                .labels(data.x_labels()),
        )
        .y_axis(
            Axis::default()
                .title(data.label.clone())
                .style(Style::default().fg(Color::DarkGray))
                .bounds(data.y_bounds)
                .labels(data.y_labels()),
        );
    f.render_widget(chart, area);
}

fn draw_games(f: &mut Frame, area: Rect, app: &App) {
    let table = app.games_table();
    let block = default_border(Color::White).title(format!(
        " {} {} | s=switch season  j/k=scroll ",
        table.season,
        app.settings.team_name()
    ));

    let header = Row::new(["Wk", "Opponent", "Tm", "Opp", "Diff", "RushY", "PassY", "TotYd", "TO"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let cell = |v: Option<i64>| Cell::from(v.map(|n| n.to_string()).unwrap_or_default());

    let rows: Vec<Row> = table
        .rows
        .iter()
        .enumerate()
        .skip(app.state.games.scroll_offset as usize)
        .map(|(idx, row)| {
            let game = &row.game;
            let style = if game.is_bye() {
                Style::default().fg(Color::DarkGray)
            } else {
                match row.point_diff {
                    Some(d) if d > 0 => Style::default().fg(Color::Green),
                    Some(d) if d < 0 => Style::default().fg(Color::Red),
                    _ => Style::default(),
                }
            };
            let week = game
                .week
                .map(|w| w.to_string())
                .unwrap_or_else(|| format!("#{}", idx + 1));
            Row::new(vec![
                Cell::from(week),
                Cell::from(game.opponent.clone().unwrap_or_default()),
                cell(game.score.points_for),
                cell(game.score.points_against),
                cell(row.point_diff),
                cell(game.offense.rush_yards),
                cell(game.offense.pass_yards),
                cell(game.offense.total_yards),
                cell(game.offense.turnovers),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(3),
    ];
    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}
