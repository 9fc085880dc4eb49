//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, terminal resize,
//!   or when the fetch task reports back.

mod component;
mod components;
mod event;
mod ui;

use chrono::Local;
use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{CountrySource, RestCountriesClient, SnapshotSource};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::criteria::REGIONS;
use crate::core::navigation::Route;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CountryListEvent, CountryListState, DetailEvent, DetailState, SortPickerEvent,
    SortPickerState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub country_list: CountryListState,
    pub detail: DetailState,
    // Sort picker overlay (None = hidden)
    pub sort_picker: Option<SortPickerState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            country_list: CountryListState::new(),
            detail: DetailState::new(),
            sort_picker: None,
        }
    }

    /// Re-syncs cursors after the core state changed underneath them.
    ///
    /// `reloaded` means the full list was replaced: a detail view that stays
    /// open (deep link, reload) may now resolve different neighbours.
    fn sync(&mut self, app: &App, list_changed: bool, route_changed: bool, reloaded: bool) {
        if list_changed {
            self.country_list.reset(app.countries.len());
        } else {
            self.country_list.set_len(app.countries.len());
        }
        let neighbours = || app.detail().map_or(0, |d| d.neighbours.len());
        if route_changed {
            self.detail.reset(neighbours());
        } else if reloaded {
            self.detail.set_count(neighbours());
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Cursor marks the search box
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Build a source from the resolved config: a local snapshot if one is
/// configured, the HTTP endpoint otherwise.
pub fn build_source(config: &ResolvedConfig) -> Arc<dyn CountrySource> {
    match config.data_file.as_deref() {
        Some(path) => Arc::new(SnapshotSource::new(path.to_path_buf())),
        None => Arc::new(RestCountriesClient::new(Some(config.endpoint.clone()))),
    }
}

/// Runs the terminal UI until the user quits.
///
/// `deep_link` opens the detail view for a cca3 code straight away, before
/// any record has been selected.
pub fn run(config: ResolvedConfig, deep_link: Option<String>) -> std::io::Result<()> {
    let source = build_source(&config);
    let mut app = App::from_config(source, &config);
    let mut tui = TuiState::new();

    // Channel for actions from the fetch task
    let (tx, rx) = mpsc::channel();

    dispatch(&mut app, &mut tui, Action::Load, &tx);
    if let Some(code) = deep_link {
        dispatch(&mut app, &mut tui, Action::OpenDetails(code), &tx);
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new().inspect_err(|e| {
        warn!("Failed to enable terminal modes: {}", e);
    });

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in actions_for_event(&app, &mut tui, &event) {
                if dispatch(&mut app, &mut tui, action, &tx) {
                    should_quit = true;
                }
            }
        }

        // Handle the fetch task's completion
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action_name(&action));
            if dispatch(&mut app, &mut tui, action, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Applies an action, performs its effect and re-syncs presentation state.
/// Returns true when the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    let list_changed = rederives(&action);
    let reloaded = matches!(action, Action::FetchSucceeded { .. });
    let route_before = app.route.clone();

    let effect = update(app, action);
    tui.sync(app, list_changed, app.route != route_before, reloaded);

    match effect {
        Effect::Quit => true,
        Effect::SpawnFetch => {
            spawn_fetch(app.source.clone(), tx.clone());
            false
        }
        Effect::None => false,
    }
}

/// Whether an action replaces the derived list wholesale.
fn rederives(action: &Action) -> bool {
    !matches!(
        action,
        Action::Load
            | Action::FetchFailed(_)
            | Action::Select(_)
            | Action::OpenDetails(_)
            | Action::BackToList
            | Action::Quit
    )
}

/// Translates one terminal event into core actions for the current view.
fn actions_for_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    // Global shortcuts work everywhere
    match event {
        TuiEvent::ForceQuit => return vec![Action::Quit],
        TuiEvent::Reload => return vec![Action::Load],
        TuiEvent::Resize => return Vec::new(),
        _ => {}
    }

    // When the sort picker is open, route all events to it
    if let Some(ref mut picker) = tui.sort_picker {
        return match picker.handle_event(event) {
            Some(SortPickerEvent::Select(sort_by)) => {
                tui.sort_picker = None;
                vec![Action::SetSortBy(sort_by)]
            }
            Some(SortPickerEvent::Dismiss) => {
                tui.sort_picker = None;
                Vec::new()
            }
            None => Vec::new(),
        };
    }

    match app.route {
        Route::List => list_actions(app, tui, event),
        Route::Details(_) => detail_actions(app, tui, event),
    }
}

fn list_actions(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    let search = &app.criteria.search;
    match event {
        TuiEvent::InputChar(c) => vec![Action::SetSearch(format!("{search}{c}"))],
        TuiEvent::Paste(text) => {
            let line = text.lines().next().unwrap_or_default();
            vec![Action::SetSearch(format!("{search}{line}"))]
        }
        TuiEvent::Backspace => {
            let mut shorter = search.clone();
            if shorter.pop().is_some() {
                vec![Action::SetSearch(shorter)]
            } else {
                Vec::new()
            }
        }
        // Esc clears the search first, quits on an empty one
        TuiEvent::Escape if !search.is_empty() => vec![Action::SetSearch(String::new())],
        TuiEvent::Escape => vec![Action::Quit],
        TuiEvent::ToggleRegion(i) => REGIONS
            .get(*i)
            .map(|region| vec![Action::ToggleRegion((*region).to_string())])
            .unwrap_or_default(),
        TuiEvent::ToggleUnMember => vec![Action::ToggleUnMember],
        TuiEvent::ToggleIndependent => vec![Action::ToggleIndependent],
        TuiEvent::ResetFilters => vec![Action::ResetCriteria],
        TuiEvent::OpenSortPicker => {
            tui.sort_picker = Some(SortPickerState::new(app.criteria.sort_by));
            Vec::new()
        }
        _ => match tui.country_list.handle_event(event) {
            Some(CountryListEvent::Open(index)) => app
                .countries
                .get(index)
                .map(|country| {
                    vec![
                        Action::Select(country.clone()),
                        Action::OpenDetails(country.cca3.clone()),
                    ]
                })
                .unwrap_or_default(),
            None => Vec::new(),
        },
    }
}

fn detail_actions(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Vec<Action> {
    match tui.detail.handle_event(event) {
        Some(DetailEvent::Back) => vec![Action::BackToList],
        Some(DetailEvent::OpenNeighbour(index)) => app
            .detail()
            .and_then(|d| d.neighbours.get(index).cloned())
            .map(|neighbour| {
                let code = neighbour.cca3.clone();
                vec![Action::Select(neighbour), Action::OpenDetails(code)]
            })
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

/// Action variant name for logging, without dumping whole record lists.
fn action_name(action: &Action) -> &'static str {
    match action {
        Action::FetchSucceeded { .. } => "FetchSucceeded",
        Action::FetchFailed(_) => "FetchFailed",
        _ => "Other",
    }
}

fn spawn_fetch(source: Arc<dyn CountrySource>, tx: mpsc::Sender<Action>) {
    info!("Spawning fetch from {}", source.name());
    tokio::spawn(async move {
        let action = match source.fetch_countries().await {
            Ok(countries) => Action::FetchSucceeded {
                countries,
                fetched_at: Local::now(),
            },
            Err(e) => Action::FetchFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Failed to send fetch result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::criteria::SortBy;
    use crate::core::state::FetchStatus;
    use crate::test_support::{fixture_records, loaded_app, test_app};

    /// Feeds events through the same path as the event loop, minus the fetch.
    fn feed(app: &mut App, tui: &mut TuiState, events: &[TuiEvent]) -> bool {
        let (tx, _rx) = mpsc::channel();
        let mut quit = false;
        for event in events {
            for action in actions_for_event(app, tui, event) {
                if let Action::Load = action {
                    // Avoid spawning outside a runtime; apply the state change only.
                    update(app, action);
                    continue;
                }
                quit |= dispatch(app, tui, action, &tx);
            }
        }
        quit
    }

    fn loaded() -> (App, TuiState) {
        let app = loaded_app();
        let mut tui = TuiState::new();
        tui.country_list.reset(app.countries.len());
        (app, tui)
    }

    #[test]
    fn test_typing_filters_list() {
        let (mut app, mut tui) = loaded();
        let typed: Vec<_> = "unit".chars().map(TuiEvent::InputChar).collect();
        feed(&mut app, &mut tui, &typed);
        assert_eq!(app.criteria.search, "unit");
        assert_eq!(app.countries.len(), 3);
        assert_eq!(tui.country_list.len, 3);

        feed(&mut app, &mut tui, &[TuiEvent::Backspace]);
        assert_eq!(app.criteria.search, "uni");
    }

    #[test]
    fn test_escape_clears_search_then_quits() {
        let (mut app, mut tui) = loaded();
        feed(&mut app, &mut tui, &[TuiEvent::InputChar('x')]);
        assert!(!feed(&mut app, &mut tui, &[TuiEvent::Escape]));
        assert!(app.criteria.search.is_empty());
        assert!(feed(&mut app, &mut tui, &[TuiEvent::Escape]));
    }

    #[test]
    fn test_enter_selects_and_opens_details() {
        let (mut app, mut tui) = loaded();
        feed(&mut app, &mut tui, &[TuiEvent::CursorDown, TuiEvent::Submit]);

        // Second most populous fixture record.
        let expected = app.countries[1].clone();
        assert_eq!(app.route, Route::Details(expected.cca3.clone()));
        assert!(
            app.selection
                .current()
                .is_some_and(|c| Arc::ptr_eq(c, &expected))
        );
    }

    #[test]
    fn test_neighbour_navigation_and_back() {
        let (mut app, mut tui) = loaded();
        dispatch(&mut app, &mut tui, Action::OpenDetails("USA".into()), &mpsc::channel().0);
        assert_eq!(tui.detail.neighbour_count, 2);

        feed(&mut app, &mut tui, &[TuiEvent::CursorRight, TuiEvent::Submit]);
        assert_eq!(app.route, Route::Details("MEX".into()));

        feed(&mut app, &mut tui, &[TuiEvent::Escape]);
        assert_eq!(app.route, Route::List);
    }

    #[test]
    fn test_deep_link_before_fetch_enables_neighbours() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let tx = mpsc::channel().0;
        update(&mut app, Action::Load);
        dispatch(&mut app, &mut tui, Action::OpenDetails("USA".into()), &tx);
        assert_eq!(tui.detail.neighbour_count, 0);

        dispatch(
            &mut app,
            &mut tui,
            Action::FetchSucceeded {
                countries: fixture_records(),
                fetched_at: Local::now(),
            },
            &tx,
        );
        assert_eq!(tui.detail.neighbour_count, 2);

        feed(&mut app, &mut tui, &[TuiEvent::Submit]);
        assert_eq!(app.route, Route::Details("CAN".into()));
    }

    #[test]
    fn test_reload_keeps_neighbour_cursor_in_range() {
        let (mut app, mut tui) = loaded();
        let tx = mpsc::channel().0;
        dispatch(&mut app, &mut tui, Action::OpenDetails("USA".into()), &tx);
        feed(&mut app, &mut tui, &[TuiEvent::CursorRight]);
        assert_eq!(tui.detail.neighbour, 1);

        // Mexico disappears from the refreshed dataset.
        let countries = fixture_records()
            .into_iter()
            .filter(|c| c.cca3 != "MEX")
            .collect();
        dispatch(
            &mut app,
            &mut tui,
            Action::FetchSucceeded {
                countries,
                fetched_at: Local::now(),
            },
            &tx,
        );
        assert_eq!(tui.detail.neighbour_count, 1);
        assert_eq!(tui.detail.neighbour, 0);
    }

    #[test]
    fn test_function_keys_toggle_filters() {
        let (mut app, mut tui) = loaded();
        // F3 is Africa
        feed(&mut app, &mut tui, &[TuiEvent::ToggleRegion(2), TuiEvent::ToggleUnMember]);
        assert!(app.criteria.region_selected("Africa"));
        assert!(app.criteria.un_member);
        assert_eq!(app.countries.len(), 1);
        assert_eq!(app.countries[0].cca3, "NGA");

        feed(&mut app, &mut tui, &[TuiEvent::ResetFilters]);
        assert_eq!(app.countries.len(), fixture_records().len());
    }

    #[test]
    fn test_sort_picker_flow() {
        let (mut app, mut tui) = loaded();
        feed(&mut app, &mut tui, &[TuiEvent::OpenSortPicker]);
        assert!(tui.sort_picker.is_some());

        // Typing while the picker is open does not reach the search box.
        feed(
            &mut app,
            &mut tui,
            &[TuiEvent::InputChar('q'), TuiEvent::CursorUp, TuiEvent::Submit],
        );
        assert!(tui.sort_picker.is_none());
        assert!(app.criteria.search.is_empty());
        assert_eq!(app.criteria.sort_by, SortBy::Name);
    }

    #[test]
    fn test_reload_sets_loading() {
        let (mut app, mut tui) = loaded();
        feed(&mut app, &mut tui, &[TuiEvent::Reload]);
        assert_eq!(app.status, FetchStatus::Loading);
    }

    #[test]
    fn test_build_source_prefers_snapshot() {
        let config = ResolvedConfig {
            endpoint: "http://localhost/all".into(),
            data_file: Some("/tmp/countries.json".into()),
            criteria: Default::default(),
        };
        assert_eq!(build_source(&config).name(), "snapshot");

        let config = ResolvedConfig {
            data_file: None,
            ..config
        };
        assert_eq!(build_source(&config).name(), "restcountries");
    }
}
