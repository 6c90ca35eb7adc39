//! Root component: layout, key routing, and the coordinate form overlay.

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;

use pointcast_core::{Action, AppState, NUDGE_STEP};

use super::alerts_panel::{AlertsPanel, AlertsPanelProps};
use super::coordinate_form::{CoordinateForm, CoordinateFormProps};
use super::forecast_board::{ForecastBoard, ForecastBoardProps};
use super::help_bar::{HelpBar, HelpBarProps};
use super::location_header::{LocationHeader, LocationHeaderProps};
use super::status_bar::{StatusBar, StatusBarProps};
use super::{Component, SPINNERS};
use crate::event::EventKind;

pub struct DashboardProps<'a> {
    pub state: &'a AppState,
}

#[derive(Default)]
pub struct Dashboard {
    form: CoordinateForm,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        let state = props.state;

        // While the form is open it owns the keyboard.
        if let Some(entry) = &state.entry {
            return self.form.handle_event(event, CoordinateFormProps { entry });
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            KeyCode::Char('r') | KeyCode::F(5) => vec![Action::Refresh],
            KeyCode::Char('e') => vec![Action::EntryOpen],
            KeyCode::Up => vec![Action::PointNudge {
                dlat: NUDGE_STEP,
                dlon: 0.0,
            }],
            KeyCode::Down => vec![Action::PointNudge {
                dlat: -NUDGE_STEP,
                dlon: 0.0,
            }],
            KeyCode::Left => vec![Action::PointNudge {
                dlat: 0.0,
                dlon: -NUDGE_STEP,
            }],
            KeyCode::Right => vec![Action::PointNudge {
                dlat: 0.0,
                dlon: NUDGE_STEP,
            }],
            KeyCode::Char('j') => vec![Action::PeriodNext],
            KeyCode::Char('k') => vec![Action::PeriodPrev],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let loading_indicator = if state.is_fetching() {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            format!(" {} ", spinner)
        } else {
            String::new()
        };

        let outer_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" ☁ pointcast{}", loading_indicator))
            .title_style(Style::default().fg(Color::Cyan).bold());
        let inner = outer_block.inner(area);
        frame.render_widget(outer_block, area);

        let rows = Layout::vertical([
            Constraint::Length(LocationHeader::HEIGHT),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        LocationHeader.render(frame, rows[0], LocationHeaderProps { state });

        let panels =
            Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(rows[1]);
        ForecastBoard.render(frame, panels[0], ForecastBoardProps { state });
        AlertsPanel.render(frame, panels[1], AlertsPanelProps { state });

        StatusBar.render(frame, rows[2], StatusBarProps { state });
        HelpBar.render(
            frame,
            rows[3],
            HelpBarProps {
                entry_open: state.entry.is_some(),
            },
        );

        // Overlay last so it draws above the panels.
        self.form.set_open(state.entry.as_ref());
        if let Some(entry) = &state.entry {
            self.form.render(frame, inner, CoordinateFormProps { entry });
        }
    }
}
