//! Active alerts panel, colored by severity.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use pointcast_core::{Alert, AppState, RequestState};

use super::{Component, SPINNERS};

pub struct AlertsPanel;

pub struct AlertsPanelProps<'a> {
    pub state: &'a AppState,
}

impl Component for AlertsPanel {
    type Props<'a> = AlertsPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" Alerts · {} ", state.alert_area))
            .title_style(Style::default().fg(Color::Yellow).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = match &state.alerts {
            RequestState::Ready { payload, .. } if payload.is_empty() => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No active alerts",
                    Style::default().fg(Color::DarkGray),
                ))
                .centered(),
            ],
            RequestState::Ready { payload, .. } => alert_lines(payload),
            RequestState::Failed { error, .. } => vec![
                Line::from(""),
                Line::from(Span::styled("Error", Style::default().fg(Color::Red).bold()))
                    .centered(),
                Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(Color::Rgb(200, 100, 100)),
                ))
                .centered(),
            ],
            RequestState::InFlight { .. } => {
                let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
                vec![
                    Line::from(""),
                    Line::from(vec![
                        Span::styled(spinner, Style::default().fg(Color::Cyan)),
                        Span::styled(" Fetching alerts", Style::default().fg(Color::Gray)),
                    ])
                    .centered(),
                ]
            }
            RequestState::Idle => vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No alerts loaded yet",
                    Style::default().fg(Color::DarkGray),
                ))
                .centered(),
            ],
        };

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}

fn alert_lines(alerts: &[Alert]) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(alerts.len() * 3);
    for alert in alerts {
        lines.push(Line::from(vec![
            Span::styled("⚠ ", Style::default().fg(severity_color(&alert.severity))),
            Span::styled(
                alert.event.clone(),
                Style::default()
                    .fg(severity_color(&alert.severity))
                    .bold(),
            ),
            Span::styled(
                format!("  [{}]", alert.severity),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        if let Some(headline) = &alert.headline {
            lines.push(Line::from(Span::styled(
                format!("  {}", headline),
                Style::default().fg(Color::Gray),
            )));
        }
        lines.push(Line::from(Span::styled(
            format!("  {}", alert.area_desc),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn severity_color(severity: &str) -> Color {
    match severity {
        "Extreme" => Color::Magenta,
        "Severe" => Color::Red,
        "Moderate" => Color::Yellow,
        "Minor" => Color::Blue,
        _ => Color::Gray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RenderHarness;
    use pointcast_core::testing::alert;

    fn state_with_alerts(alerts: Vec<Alert>) -> AppState {
        let mut state = AppState::default();
        state.alerts.begin("CA".to_string());
        state.alerts.settle_ok("CA".to_string(), alerts);
        state
    }

    #[test]
    fn lists_alerts_with_severity() {
        let mut render = RenderHarness::new(50, 12);
        let state = state_with_alerts(vec![
            alert("Red Flag Warning", "Severe"),
            alert("Flood Watch", "Moderate"),
        ]);

        let output = render.render_to_string_plain(|frame| {
            AlertsPanel.render(frame, frame.area(), AlertsPanelProps { state: &state });
        });

        assert!(output.contains("Red Flag Warning"));
        assert!(output.contains("[Severe]"));
        assert!(output.contains("Flood Watch"));
        assert!(output.contains("Alerts · CA"));
    }

    #[test]
    fn empty_payload_reads_as_all_clear() {
        let mut render = RenderHarness::new(40, 8);
        let state = state_with_alerts(vec![]);

        let output = render.render_to_string_plain(|frame| {
            AlertsPanel.render(frame, frame.area(), AlertsPanelProps { state: &state });
        });

        assert!(output.contains("No active alerts"));
    }

    #[test]
    fn failure_shows_only_in_this_panel() {
        let mut render = RenderHarness::new(40, 8);
        let mut state = AppState::default();
        state.alerts.begin("CA".to_string());
        state
            .alerts
            .settle_err("CA".to_string(), "request failed".to_string());

        let output = render.render_to_string_plain(|frame| {
            AlertsPanel.render(frame, frame.area(), AlertsPanelProps { state: &state });
        });

        assert!(output.contains("Error"));
        assert!(output.contains("request failed"));
    }
}
