use crate::app::{App, MenuItem};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn handle_key_bindings(key_event: KeyEvent, app: &mut App) -> Flow {
    if key_event.kind == KeyEventKind::Release {
        return Flow::Continue;
    }

    // An open dropdown captures navigation until committed or cancelled.
    if app.state.selector.open {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => return Flow::Quit,
            (Char('j') | KeyCode::Down, _) => app.selector_next(),
            (Char('k') | KeyCode::Up, _) => app.selector_prev(),
            (KeyCode::Enter, _) => app.commit_selector(),
            (KeyCode::Esc | Char('q'), _) => app.close_selector(),
            _ => {}
        }
        return Flow::Continue;
    }

    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => return Flow::Quit,

        // Tab switching
        (_, Char('1'), _) => app.update_tab(MenuItem::Dashboard),
        (_, Char('2'), _) => app.update_tab(MenuItem::Games),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => app.exit_help(),

        // Dashboard
        (MenuItem::Dashboard, KeyCode::Enter | Char('m'), _) => app.open_selector(),

        // Games table
        (MenuItem::Games, Char('j') | KeyCode::Down, _) => app.games_scroll_down(),
        (MenuItem::Games, Char('k') | KeyCode::Up, _) => app.games_scroll_up(),
        (MenuItem::Games, Char('s') | KeyCode::Tab, _) => app.games_switch_season(),
        (MenuItem::Games, KeyCode::Esc, _) => app.update_tab(MenuItem::Dashboard),

        // Global
        (_, Char('f'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }
    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_app;
    use season_stats::Metric;

    fn press(app: &mut App, code: KeyCode) -> Flow {
        handle_key_bindings(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    #[test]
    fn dropdown_flow_changes_metric() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Enter);
        assert!(app.state.selector.open);
        press(&mut app, Char('j'));
        press(&mut app, Char('j'));
        press(&mut app, KeyCode::Enter);
        assert!(!app.state.selector.open);
        assert_eq!(app.state.line.metric, Metric::PointsAgainst);
    }

    #[test]
    fn escape_cancels_dropdown_without_change() {
        let mut app = sample_app();
        press(&mut app, Char('m'));
        press(&mut app, KeyCode::Up);
        assert_eq!(press(&mut app, KeyCode::Esc), Flow::Continue);
        assert!(!app.state.selector.open);
        assert_eq!(app.state.line.metric, Metric::TotalYards);
    }

    #[test]
    fn q_closes_dropdown_before_quitting() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(press(&mut app, Char('q')), Flow::Continue);
        assert_eq!(press(&mut app, Char('q')), Flow::Quit);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = sample_app();
        press(&mut app, KeyCode::Enter);
        let flow = handle_key_bindings(KeyEvent::new(Char('c'), KeyModifiers::CONTROL), &mut app);
        assert_eq!(flow, Flow::Quit);
    }

    #[test]
    fn tab_keys_switch_views() {
        let mut app = sample_app();
        press(&mut app, Char('2'));
        assert_eq!(app.state.active_tab, MenuItem::Games);
        press(&mut app, Char('s'));
        assert_eq!(app.state.games.season_index, 1);
        press(&mut app, Char('?'));
        assert_eq!(app.state.active_tab, MenuItem::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.active_tab, MenuItem::Games);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.active_tab, MenuItem::Dashboard);
    }

    #[test]
    fn toggles() {
        let mut app = sample_app();
        press(&mut app, Char('"'));
        press(&mut app, Char('f'));
        assert!(app.state.show_logs);
        assert!(app.settings.full_screen);
    }
}
