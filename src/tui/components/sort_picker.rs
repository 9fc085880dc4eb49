//! # Sort Picker Component
//!
//! Small overlay for choosing the sort key. Opened with Ctrl+S, closes after
//! a choice or on Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SortPickerState` lives in `TuiState` while the overlay is open
//! - `SortPicker` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding};

use crate::core::criteria::SortBy;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the sort picker overlay.
pub struct SortPickerState {
    pub selected: usize,
    pub list_state: ListState,
}

impl SortPickerState {
    /// Opens with the active key highlighted.
    pub fn new(current: SortBy) -> Self {
        let selected = SortBy::ALL.iter().position(|s| *s == current).unwrap_or(0);
        Self {
            selected,
            list_state: ListState::default().with_selected(Some(selected)),
        }
    }
}

/// Events emitted by the sort picker.
#[derive(Debug, PartialEq, Eq)]
pub enum SortPickerEvent {
    Select(SortBy),
    Dismiss,
}

impl EventHandler for SortPickerState {
    type Event = SortPickerEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SortPickerEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::OpenSortPicker => Some(SortPickerEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(SortBy::ALL.len() - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => SortBy::ALL
                .get(self.selected)
                .map(|sort_by| SortPickerEvent::Select(*sort_by)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the sort picker overlay.
pub struct SortPicker<'a> {
    state: &'a mut SortPickerState,
    current: SortBy,
}

impl<'a> SortPicker<'a> {
    pub fn new(state: &'a mut SortPickerState, current: SortBy) -> Self {
        Self { state, current }
    }
}

impl Component for SortPicker<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(40, 7, area);

        // Clear underlying content
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Sort by ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" Enter Select  Esc Back ").centered())
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = SortBy::ALL
            .iter()
            .enumerate()
            .map(|(i, sort_by)| {
                let is_active = *sort_by == self.current;
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else if is_active {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let marker = if is_active { " *" } else { "" };
                ListItem::new(Line::from(vec![
                    Span::styled(sort_by.description(), style),
                    Span::styled(marker, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

/// A `width` x `height` rect centered in `outer`, clipped to fit.
fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(outer.width)),
        Constraint::Fill(1),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_opens_on_current_key() {
        let state = SortPickerState::new(SortBy::Area);
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut state = SortPickerState::new(SortBy::Name);
        assert_eq!(state.handle_event(&TuiEvent::CursorUp), None);
        assert_eq!(state.selected, 0);
        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, 2);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SortPickerEvent::Select(SortBy::Area))
        );
    }

    #[test]
    fn test_escape_dismisses() {
        let mut state = SortPickerState::new(SortBy::Population);
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(SortPickerEvent::Dismiss)
        );
    }

    #[test]
    fn test_renders_options() {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = SortPickerState::new(SortBy::Population);

        terminal
            .draw(|f| {
                SortPicker::new(&mut state, SortBy::Population).render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Name (A-Z)"));
        assert!(text.contains("Population (High to Low) *"));
        assert!(text.contains("Area (High to Low)"));
    }
}
