//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top status bar showing source, status and load time
//! - `FilterPanel`: Search text, sort key, region and status toggles
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep presentation state and emit events:
//! - `CountryList`: Table over the derived list with a cursor
//! - `DetailView`: Country card with a neighbour cursor
//! - `SortPicker`: Overlay for choosing the sort key
//!
//! Components receive core data as props instead of reaching into `App`,
//! so every render path can be exercised with a `TestBackend`:
//!
//! ```rust,ignore
//! FilterPanel::new(&app.criteria, true).render(frame, area);
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── filter_panel.rs  (Criteria panel)
//! ├── country_list.rs  (Derived list table)
//! ├── detail_view.rs   (Per-country card)
//! └── sort_picker.rs   (Sort key overlay)
//! ```

pub mod country_list;
pub mod detail_view;
pub mod filter_panel;
pub mod sort_picker;
mod title_bar;

pub use country_list::{CountryList, CountryListEvent, CountryListState};
pub use detail_view::{DetailEvent, DetailState, DetailView};
pub use filter_panel::FilterPanel;
pub use sort_picker::{SortPicker, SortPickerEvent, SortPickerState};
pub use title_bar::TitleBar;
