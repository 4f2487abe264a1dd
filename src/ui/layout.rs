use tui::layout::{Constraint, Layout, Rect, Size};
pub const TAB_BAR_HEIGHT: u16 = 3;
pub const HEADER_HEIGHT: u16 = 3;
pub const LOG_PANEL_HEIGHT: u16 = 8;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub header: Rect,
    pub main: Rect,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (body, logs) = if show_logs {
            let [body, logs] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_PANEL_HEIGHT)]).areas(area);
            (body, Some(logs))
        } else {
            (area, None)
        };

        if full_screen {
            return LayoutAreas {
                tab_bar: [Rect::ZERO, Rect::ZERO],
                header: Rect::ZERO,
                main: body,
                logs,
            };
        }

        let [tab, header, main] = Layout::vertical([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(body);

        LayoutAreas {
            tab_bar: Self::split_tab_bar(tab),
            header,
            main,
            logs,
        }
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_screen_gives_main_the_whole_area() {
        let mut layout = LayoutAreas::new(Size::new(100, 40));
        layout.update(Rect::new(0, 0, 100, 40), true, false);
        assert_eq!(layout.main, Rect::new(0, 0, 100, 40));
        assert_eq!(layout.header, Rect::ZERO);
        assert!(layout.logs.is_none());
    }

    #[test]
    fn log_panel_takes_the_bottom_rows() {
        let mut layout = LayoutAreas::new(Size::new(100, 40));
        layout.update(Rect::new(0, 0, 100, 40), false, true);
        assert_eq!(layout.logs, Some(Rect::new(0, 32, 100, LOG_PANEL_HEIGHT)));
        assert_eq!(layout.tab_bar[0].y, 0);
        assert_eq!(layout.header.y, TAB_BAR_HEIGHT);
        assert_eq!(layout.main.y, TAB_BAR_HEIGHT + HEADER_HEIGHT);
        assert_eq!(layout.main.height, 32 - TAB_BAR_HEIGHT - HEADER_HEIGHT);
    }
}
