//! # Filter Panel Component
//!
//! Left-hand panel of the list view: search box, sort key, region toggles
//! and status toggles. Stateless. The criteria are props, and every change
//! goes back through `core::action::update`.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::criteria::{Criteria, REGIONS};
use crate::tui::component::Component;

const SEARCH_PLACEHOLDER: &str = "Search by Name, Region, Subregion";

pub struct FilterPanel<'a> {
    pub criteria: &'a Criteria,
    /// Place the terminal cursor at the end of the search text.
    pub show_cursor: bool,
}

impl<'a> FilterPanel<'a> {
    pub fn new(criteria: &'a Criteria, show_cursor: bool) -> Self {
        Self {
            criteria,
            show_cursor,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD);
        let value = Style::default().fg(Color::Gray);
        let on = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

        let search = if self.criteria.search.is_empty() {
            Span::styled(SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(self.criteria.search.clone(), value)
        };

        let mut lines = vec![
            Line::from(Span::styled("Search", label)),
            Line::from(search),
            Line::default(),
            Line::from(Span::styled("Sort by (Ctrl+S)", label)),
            Line::from(Span::styled(self.criteria.sort_by.description(), value)),
            Line::default(),
            Line::from(Span::styled("Region", label)),
        ];

        for (i, region) in REGIONS.iter().enumerate() {
            let selected = self.criteria.region_selected(region);
            lines.push(toggle_line(selected, i + 1, region, on, value));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled("Status", label)));
        lines.push(toggle_line(
            self.criteria.un_member,
            7,
            "Member of the United Nations",
            on,
            value,
        ));
        lines.push(toggle_line(self.criteria.independent, 8, "Independent", on, value));
        lines
    }
}

fn toggle_line<'a>(checked: bool, key: usize, text: &'a str, on: Style, off: Style) -> Line<'a> {
    let (mark, style) = if checked { ("[x]", on) } else { ("[ ]", off) };
    Line::from(vec![
        Span::styled(mark, style),
        Span::styled(format!(" F{key} "), Style::default().fg(Color::DarkGray)),
        Span::styled(text, style),
    ])
}

impl Component for FilterPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut block = Block::bordered()
            .title(" Filters ")
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        if !self.criteria.is_unfiltered() {
            block = block.title_bottom(Line::from(" Ctrl+L Reset ").centered());
        }
        let inner = block.inner(area);

        frame.render_widget(Paragraph::new(self.lines()).block(block), area);

        if self.show_cursor && inner.height > 1 {
            // Search text is on the second line of the panel.
            let width = u16::try_from(self.criteria.search.width()).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(width).min(inner.right().saturating_sub(1));
            frame.set_cursor_position(Position::new(x, inner.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(criteria: &Criteria) -> String {
        let backend = TestBackend::new(44, 22);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| FilterPanel::new(criteria, true).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_placeholder_when_search_empty() {
        let text = rendered(&Criteria::default());
        assert!(text.contains(SEARCH_PLACEHOLDER));
        assert!(text.contains("Population (High to Low)"));
        assert!(text.contains("[ ] F1 Americas"));
        assert!(text.contains("[ ] F7 Member of the United Nations"));
        assert!(!text.contains("Ctrl+L Reset"));
    }

    #[test]
    fn test_checked_toggles() {
        let mut criteria = Criteria {
            search: "isl".to_string(),
            independent: true,
            ..Default::default()
        };
        criteria.toggle_region("Oceania");
        let text = rendered(&criteria);
        assert!(text.contains("isl"));
        assert!(!text.contains(SEARCH_PLACEHOLDER));
        assert!(text.contains("[x] F6 Oceania"));
        assert!(text.contains("[ ] F5 Europe"));
        assert!(text.contains("[x] F8 Independent"));
        assert!(text.contains("Ctrl+L Reset"));
    }
}
