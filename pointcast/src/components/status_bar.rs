//! One-line status: what is currently in flight, or the freshest failure.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use pointcast_core::AppState;

use super::{Component, SPINNERS};

pub struct StatusBar;

pub struct StatusBarProps<'a> {
    pub state: &'a AppState,
}

impl Component for StatusBar {
    type Props<'a> = StatusBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let line = if let Some(activity) = activity(state) {
            let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
            Line::from(vec![
                Span::styled(format!(" {} ", spinner), Style::default().fg(Color::Cyan)),
                Span::styled(activity, Style::default().fg(Color::Gray)),
            ])
        } else if let Some(error) = freshest_error(state) {
            Line::from(Span::styled(
                format!(" ✗ {}", error),
                Style::default().fg(Color::Red),
            ))
        } else if let Some(updated) = state
            .forecast
            .payload()
            .and_then(|forecast| forecast.updated.as_deref())
        {
            Line::from(Span::styled(
                format!(" updated {}", updated),
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from("")
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn activity(state: &AppState) -> Option<String> {
    if state.gridpoint.is_loading() {
        return Some(format!("resolving {}", state.point));
    }
    if state.forecast.is_loading() {
        let cell = state
            .forecast
            .key()
            .map(|key| key.to_string())
            .unwrap_or_default();
        return Some(format!("fetching forecast {}", cell));
    }
    if state.alerts.is_loading() {
        return Some(format!("fetching alerts for {}", state.alert_area));
    }
    None
}

/// Errors in resolution-chain order; the gridpoint one blocks the most.
fn freshest_error(state: &AppState) -> Option<String> {
    if let Some(error) = state.gridpoint.error() {
        return Some(format!("gridpoint: {}", error));
    }
    if let Some(error) = state.forecast.error() {
        return Some(format!("forecast: {}", error));
    }
    state.alerts.error().map(|error| format!("alerts: {}", error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RenderHarness;
    use pointcast_core::{reduce, Action};

    #[test]
    fn shows_resolution_activity_while_gridpoint_is_in_flight() {
        let mut render = RenderHarness::new(60, 1);
        let mut state = AppState::default();
        reduce(
            &mut state,
            Action::PointSet {
                lat: 34.0522,
                lon: -118.2437,
            },
        );

        let output = render.render_to_string_plain(|frame| {
            StatusBar.render(frame, frame.area(), StatusBarProps { state: &state });
        });

        assert!(output.contains("resolving 34.0522, -118.2437"));
    }

    #[test]
    fn surfaces_the_gridpoint_error() {
        let mut render = RenderHarness::new(60, 1);
        let mut state = AppState::default();
        reduce(&mut state, Action::PointSet { lat: 34.0, lon: -118.0 });
        let key = state.point.key();
        reduce(
            &mut state,
            Action::GridpointDidError {
                key,
                error: "request failed: dns".to_string(),
            },
        );

        let output = render.render_to_string_plain(|frame| {
            StatusBar.render(frame, frame.area(), StatusBarProps { state: &state });
        });

        assert!(output.contains("gridpoint: request failed: dns"));
    }
}
