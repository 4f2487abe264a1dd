use crate::state::app_state::MetricSelector;
use season_stats::Metric;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget};

/// Height of the closed dropdown, borders included.
pub const SELECTOR_HEIGHT: u16 = 3;

/// The metric dropdown. Closed it shows the current choice; open it also
/// renders the full list directly above its own area.
pub struct MetricDropdown<'a> {
    pub selector: &'a MetricSelector,
}

impl MetricDropdown<'_> {
    /// Area the open list occupies, given the closed dropdown's area and the
    /// area it may grow into.
    pub fn list_area(area: Rect, bounds: Rect) -> Rect {
        let height = (Metric::ALL.len() as u16 + 2).min(area.y.saturating_sub(bounds.y));
        Rect::new(area.x, area.y.saturating_sub(height), area.width, height)
    }

    pub fn render_list(&self, list_area: Rect, buf: &mut Buffer) {
        if list_area.height < 3 {
            return;
        }
        Clear.render(list_area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Metric ");
        let inner = block.inner(list_area);
        block.render(list_area, buf);

        let lines: Vec<Line> = Metric::ALL
            .iter()
            .enumerate()
            .map(|(idx, metric)| {
                let marker = if *metric == self.selector.selected { "✓ " } else { "  " };
                let style = if idx == self.selector.highlighted {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(format!("{marker}{}", metric.label()), style))
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for MetricDropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.selector.open { Color::Yellow } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);

        let arrow = if self.selector.open { "▲" } else { "▼" };
        let line = Line::from(vec![
            Span::styled(
                self.selector.selected.label(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(arrow, Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
