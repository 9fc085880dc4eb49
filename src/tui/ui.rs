use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::navigation::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CountryList, DetailView, FilterPanel, SortPicker, TitleBar};

const FILTER_PANEL_WIDTH: u16 = 44;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    TitleBar::new(
        app.source.name().to_string(),
        app.status_message.clone(),
        app.loaded_at.map(|t| t.format("%H:%M").to_string()),
    )
    .render(frame, title_area);

    match &app.route {
        Route::List => {
            let [filter_area, list_area] =
                Layout::horizontal([Length(FILTER_PANEL_WIDTH), Min(0)]).areas(main_area);

            FilterPanel::new(&app.criteria, tui.sort_picker.is_none()).render(frame, filter_area);

            CountryList {
                state: &mut tui.country_list,
                countries: &app.countries,
                status: app.status,
                error: app.error.as_deref(),
                spinner_frame,
            }
            .render(frame, list_area);
        }
        Route::Details(code) => {
            let detail = app.detail();
            DetailView {
                state: &tui.detail,
                detail: detail.as_ref(),
                code,
                loading: app.is_loading(),
            }
            .render(frame, main_area);
        }
    }

    if let Some(ref mut picker) = tui.sort_picker {
        SortPicker::new(picker, app.criteria.sort_by).render(frame, main_area);
    }
}
