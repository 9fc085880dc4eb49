//! # Detail View Component
//!
//! Per-country card: names, population and area, capital, subregion,
//! languages, currencies, continents, and the neighbouring countries as a
//! row of selectable chips. Enter on a chip navigates to that neighbour.
//!
//! The view model (`core::detail::CountryDetail`) has already replaced
//! missing fields with placeholders, so this file only lays things out.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::detail::{CountryDetail, NO_NEIGHBOURS, NOT_AVAILABLE};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const CHIP_WIDTH: usize = 18;

/// Persistent state: which neighbour chip is highlighted.
#[derive(Default)]
pub struct DetailState {
    pub neighbour: usize,
    pub neighbour_count: usize,
}

impl DetailState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called whenever the shown country changes.
    pub fn reset(&mut self, neighbour_count: usize) {
        self.neighbour = 0;
        self.neighbour_count = neighbour_count;
    }

    /// Same country, new neighbour list. Keeps the cursor where it can.
    pub fn set_count(&mut self, neighbour_count: usize) {
        self.neighbour_count = neighbour_count;
        self.neighbour = self.neighbour.min(neighbour_count.saturating_sub(1));
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum DetailEvent {
    Back,
    /// Open the neighbour at this index of `CountryDetail::neighbours`.
    OpenNeighbour(usize),
}

impl EventHandler for DetailState {
    type Event = DetailEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Backspace => Some(DetailEvent::Back),
            TuiEvent::CursorLeft | TuiEvent::CursorUp => {
                self.neighbour = self.neighbour.saturating_sub(1);
                None
            }
            TuiEvent::CursorRight | TuiEvent::CursorDown => {
                if self.neighbour_count > 0 {
                    self.neighbour = (self.neighbour + 1).min(self.neighbour_count - 1);
                }
                None
            }
            TuiEvent::Submit if self.neighbour_count > 0 => {
                Some(DetailEvent::OpenNeighbour(self.neighbour))
            }
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct DetailView<'a> {
    pub state: &'a DetailState,
    /// `None` when the route's code resolves to nothing.
    pub detail: Option<&'a CountryDetail>,
    /// Code from the route, shown in the placeholder.
    pub code: &'a str,
    /// The dataset is still on its way; a miss may not be final.
    pub loading: bool,
}

impl Component for DetailView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(
                Line::from(" ←/→ Neighbour  Enter Open  Esc Back ").centered(),
            )
            .padding(Padding::new(2, 2, 1, 0));

        let Some(detail) = self.detail else {
            let message = if self.loading {
                format!("Loading {}...", self.code)
            } else {
                format!("{NOT_AVAILABLE}\n\nNo country with code \"{}\".", self.code)
            };
            let placeholder = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .block(block.title(format!(" {} ", self.code)));
            frame.render_widget(placeholder, area);
            return;
        };

        let title = if detail.flag.is_empty() {
            format!(" {} ", detail.cca3)
        } else {
            format!(" {} {} ", detail.flag, detail.cca3)
        };
        let inner = block.clone().title(title.clone()).inner(area);
        frame.render_widget(block.title(title), area);

        let [header_area, facts_area, neighbours_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(8),
            Constraint::Min(3),
        ])
        .areas(inner);

        render_header(frame, header_area, detail);
        render_facts(frame, facts_area, detail);
        render_neighbours(frame, neighbours_area, detail, self.state.neighbour);
    }
}

fn render_header(frame: &mut Frame, area: Rect, detail: &CountryDetail) {
    let bold = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::Gray);
    let lines = vec![
        Line::from(Span::styled(detail.common_name.clone(), bold)),
        Line::from(Span::styled(detail.official_name.clone(), dim)),
        Line::from(vec![
            Span::styled("Population ", Style::default().fg(Color::DarkGray)),
            Span::styled(detail.population.clone(), bold),
            Span::raw("   "),
            Span::styled("Area (km²) ", Style::default().fg(Color::DarkGray)),
            Span::styled(detail.area.clone(), bold),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_facts(frame: &mut Frame, area: Rect, detail: &CountryDetail) {
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Gray);
    let rows = [
        ("Capital", &detail.capital),
        ("Subregion", &detail.subregion),
        ("Language(s)", &detail.languages),
        ("Currencies", &detail.currencies),
        ("Continent(s)", &detail.continents),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(name, text)| {
            Line::from(vec![
                Span::styled(format!("{name:<14}"), label),
                Span::styled(text.as_str(), value),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_neighbours(frame: &mut Frame, area: Rect, detail: &CountryDetail, highlighted: usize) {
    let mut lines = vec![Line::from(Span::styled(
        "Neighbouring Countries",
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
    ))];

    if detail.neighbours.is_empty() {
        lines.push(Line::from(Span::styled(
            NO_NEIGHBOURS,
            Style::default().fg(Color::Gray),
        )));
    } else {
        let chips: Vec<Span> = detail
            .neighbours
            .iter()
            .enumerate()
            .flat_map(|(i, n)| {
                let label = match n.flag_emoji.as_deref() {
                    Some(flag) => format!("{flag} {}", n.name.common),
                    None => n.name.common.clone(),
                };
                let style = if i == highlighted {
                    Style::default().fg(Color::White).add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                [
                    Span::styled(format!(" {} ", truncate_str(&label, CHIP_WIDTH)), style),
                    Span::raw(" "),
                ]
            })
            .collect();
        lines.push(Line::from(chips));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Truncate to fit within `max_width` display columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}
