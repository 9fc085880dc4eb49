//! # Country List Component
//!
//! Right-hand side of the list view: "Found N countries" plus a table of the
//! derived list, or a spinner / error / empty message depending on the fetch
//! status.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountryListState` (cursor, table offset) lives in `TuiState`
//! - `CountryList` is created each frame with borrowed props

use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table, TableState, Wrap};

use crate::core::country::Country;
use crate::core::detail::{NOT_APPLICABLE, format_area, group_thousands};
use crate::core::state::FetchStatus;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const PAGE_SIZE: usize = 10;
const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Persistent cursor over the derived list.
#[derive(Default)]
pub struct CountryListState {
    pub selected: usize,
    pub len: usize,
    pub table_state: TableState,
}

impl CountryListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called whenever the derived list is replaced. Keeps the cursor in range.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.selected = self.selected.min(len.saturating_sub(1));
        self.table_state
            .select(if len == 0 { None } else { Some(self.selected) });
    }

    /// Back to the top, e.g. after the criteria change.
    pub fn reset(&mut self, len: usize) {
        self.selected = 0;
        *self.table_state.offset_mut() = 0;
        self.set_len(len);
    }

    fn move_to(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.selected = index.min(self.len - 1);
        self.table_state.select(Some(self.selected));
    }
}

/// Events emitted by the country list.
#[derive(Debug, PartialEq, Eq)]
pub enum CountryListEvent {
    /// Open the detail view for the row at this index of the derived list.
    Open(usize),
}

impl EventHandler for CountryListState {
    type Event = CountryListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<CountryListEvent> {
        match event {
            TuiEvent::CursorUp => self.move_to(self.selected.saturating_sub(1)),
            TuiEvent::CursorDown => self.move_to(self.selected + 1),
            TuiEvent::PageUp => self.move_to(self.selected.saturating_sub(PAGE_SIZE)),
            TuiEvent::PageDown => self.move_to(self.selected + PAGE_SIZE),
            TuiEvent::Home => self.move_to(0),
            TuiEvent::End => self.move_to(self.len.saturating_sub(1)),
            TuiEvent::Submit if self.len > 0 => {
                return Some(CountryListEvent::Open(self.selected));
            }
            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the list.
pub struct CountryList<'a> {
    pub state: &'a mut CountryListState,
    pub countries: &'a [Arc<Country>],
    pub status: FetchStatus,
    pub error: Option<&'a str>,
    pub spinner_frame: usize,
}

impl Component for CountryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
        let held = !self.countries.is_empty();
        let title = match self.status {
            FetchStatus::Succeeded => format!(" Found {} countries ", self.countries.len()),
            // Records from the previous load stay on screen until the new list arrives.
            FetchStatus::Idle | FetchStatus::Loading if held => {
                format!(" {spinner} Reloading... ({} countries) ", self.countries.len())
            }
            FetchStatus::Failed if held => format!(
                " Reload failed: {} ",
                self.error.unwrap_or("unknown error")
            ),
            _ => " Countries ".to_string(),
        };
        let block = Block::bordered()
            .title(title)
            .title_bottom(Line::from(" ↑/↓ Move  Enter Details  Ctrl+R Reload  Esc Quit ").centered())
            .border_style(Style::default().fg(Color::DarkGray));

        match self.status {
            _ if held && self.status != FetchStatus::Succeeded => {
                let table = country_table(self.countries).block(block);
                frame.render_stateful_widget(table, area, &mut self.state.table_state);
            }
            FetchStatus::Idle | FetchStatus::Loading => {
                let loading = Paragraph::new(format!("{spinner} Loading countries..."))
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow))
                    .block(block);
                frame.render_widget(loading, area);
            }
            FetchStatus::Failed => {
                let message = self.error.unwrap_or("unknown error");
                let error = Paragraph::new(format!(
                    "Could not load countries: {message}\n\nPress Ctrl+R to try again."
                ))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block.title(" ERROR "));
                frame.render_widget(error, area);
            }
            FetchStatus::Succeeded if self.countries.is_empty() => {
                let empty = Paragraph::new("No countries match your search.")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                frame.render_widget(empty, area);
            }
            FetchStatus::Succeeded => {
                let table = country_table(self.countries).block(block);
                frame.render_stateful_widget(table, area, &mut self.state.table_state);
            }
        }
    }
}

fn country_table(countries: &[Arc<Country>]) -> Table<'_> {
    let header = Row::new(["Flag", "Name", "Population", "Area (km²)", "Region"])
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows = countries.iter().map(|c| {
        let flag = c.flag_emoji.clone().unwrap_or_else(|| c.cca3.clone());
        let area = c
            .area
            .filter(|a| *a > 0.0)
            .map_or_else(|| NOT_APPLICABLE.to_string(), format_area);
        Row::new(vec![
            Cell::from(flag),
            Cell::from(c.name.common.as_str()),
            Cell::from(group_thousands(c.population)),
            Cell::from(area),
            Cell::from(c.region.as_str()),
        ])
    });

    Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Fill(2),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Fill(1),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ")
}
