//! UI components.
//!
//! Components are pure renderers: props carry a read-only view of state,
//! `handle_event` returns actions and never mutates anything outside the
//! component's own cursor/scroll bookkeeping.

pub mod alerts_panel;
pub mod coordinate_form;
pub mod dashboard;
pub mod forecast_board;
pub mod help_bar;
pub mod location_header;
pub mod number_input;
pub mod status_bar;

pub use alerts_panel::{AlertsPanel, AlertsPanelProps};
pub use coordinate_form::{CoordinateForm, CoordinateFormProps};
pub use dashboard::{Dashboard, DashboardProps};
pub use forecast_board::{ForecastBoard, ForecastBoardProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use number_input::{NumberInput, NumberInputProps};
pub use status_bar::{StatusBar, StatusBarProps};

use ratatui::layout::Rect;
use ratatui::Frame;

use pointcast_core::Action;

use crate::event::EventKind;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// A pure UI component that renders based on props and emits actions.
pub trait Component {
    /// Data required to render the component (read-only).
    type Props<'a>;

    /// Handle an event and return actions to dispatch. Default: none
    /// (render-only components).
    #[allow(unused_variables)]
    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        Vec::new()
    }

    /// Render the component to the frame.
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}

/// A centered rect of fixed size within `area`, clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
