//! # TitleBar Component
//!
//! Top status bar: data source, status message and when the data arrived.
//!
//! Stateless. It receives all data as props and has no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(
//!     app.source.name().to_string(),
//!     app.status_message.clone(),
//!     app.loaded_at.map(|t| t.format("%H:%M").to_string()),
//! );
//! title_bar.render(frame, title_area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Loaded**: `"Atlas (source: restcountries) | Loaded 250 countries | 14:02"`
//! 2. **Status only**: `"Atlas (source: restcountries) | Loading..."`
//! 3. **Default**: `"Atlas (source: restcountries)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;

pub struct TitleBar {
    /// Name of the fetch source (e.g., "restcountries", "snapshot")
    pub source_name: String,
    /// Status message (e.g., "Loading countries...", "Sorted by Name (A-Z)")
    pub status_message: String,
    /// Preformatted time the full list arrived
    pub loaded_at: Option<String>,
}

impl TitleBar {
    pub fn new(source_name: String, status_message: String, loaded_at: Option<String>) -> Self {
        Self {
            source_name,
            status_message,
            loaded_at,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Atlas (source: {})", self.source_name);
        if !self.status_message.is_empty() {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if let Some(ref at) = self.loaded_at {
            text.push_str(" | ");
            text.push_str(at);
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let span = Span::styled(self.text(), Style::default().fg(Color::Gray));
        frame.render_widget(span, area);
    }
}
