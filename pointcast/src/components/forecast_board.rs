//! Forecast panel: one card per period, detailed text for the selection.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use pointcast_core::{AppState, Forecast, ForecastPeriod, RequestState};

use super::{Component, SPINNERS};

pub struct ForecastBoard;

pub struct ForecastBoardProps<'a> {
    pub state: &'a AppState,
}

/// Lines each period card occupies in the list.
const CARD_HEIGHT: usize = 2;
const DETAIL_HEIGHT: u16 = 6;

enum ForecastView<'a> {
    Ready(&'a Forecast),
    Failed(&'a str),
    Loading,
    Empty,
}

impl<'a> ForecastView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match &state.forecast {
            RequestState::Ready { payload, .. } => ForecastView::Ready(payload),
            RequestState::Failed { error, .. } => ForecastView::Failed(error),
            RequestState::InFlight { .. } => ForecastView::Loading,
            RequestState::Idle => ForecastView::Empty,
        }
    }
}

impl Component for ForecastBoard {
    type Props<'a> = ForecastBoardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(" Forecast ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match ForecastView::from_state(state) {
            ForecastView::Ready(forecast) => {
                render_periods(frame, inner, forecast, state.selected_period)
            }
            ForecastView::Failed(error) => {
                let lines = vec![
                    Line::from(""),
                    Line::from(Span::styled("Error", Style::default().fg(Color::Red).bold()))
                        .centered(),
                    Line::from(Span::styled(
                        error.to_string(),
                        Style::default().fg(Color::Rgb(200, 100, 100)),
                    ))
                    .centered(),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
                        Span::styled("r", Style::default().fg(Color::Cyan).bold()),
                        Span::styled(" to retry", Style::default().fg(Color::DarkGray)),
                    ])
                    .centered(),
                ];
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
            }
            ForecastView::Loading => {
                let spinner = SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()];
                let dots = ".".repeat((state.tick_count as usize / 3) % 4);
                let line = Line::from(vec![
                    Span::styled(spinner, Style::default().fg(Color::Cyan)),
                    Span::styled(
                        format!(" Fetching forecast{:<3}", dots),
                        Style::default().fg(Color::Gray),
                    ),
                ])
                .centered();
                frame.render_widget(Paragraph::new(vec![Line::from(""), line]), inner);
            }
            ForecastView::Empty => {
                let line = Line::from(Span::styled(
                    "Waiting for the grid cell to resolve",
                    Style::default().fg(Color::DarkGray),
                ))
                .centered();
                frame.render_widget(Paragraph::new(vec![Line::from(""), line]), inner);
            }
        }
    }
}

fn render_periods(frame: &mut Frame, area: Rect, forecast: &Forecast, selected: usize) {
    if forecast.periods.is_empty() {
        let line = Line::from(Span::styled(
            "Forecast contained no periods",
            Style::default().fg(Color::DarkGray),
        ))
        .centered();
        frame.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
        return;
    }

    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(DETAIL_HEIGHT)])
        .split(area);
    let list_area = chunks[0];

    // Keep the selected card visible: scroll the window so it sits roughly
    // in the middle of the list area.
    let visible = (list_area.height as usize / CARD_HEIGHT).max(1);
    let first = selected
        .saturating_sub(visible / 2)
        .min(forecast.periods.len().saturating_sub(visible));

    let mut lines = Vec::with_capacity(visible * CARD_HEIGHT);
    for (index, period) in forecast.periods.iter().enumerate().skip(first).take(visible) {
        lines.extend(period_card(period, index == selected));
    }
    frame.render_widget(Paragraph::new(lines), list_area);

    if let Some(period) = forecast.periods.get(selected) {
        let detail_block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::Rgb(60, 60, 75)));
        let detail_area = detail_block.inner(chunks[1]);
        frame.render_widget(detail_block, chunks[1]);
        frame.render_widget(
            Paragraph::new(period.detailed_forecast.as_str())
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
            detail_area,
        );
    }
}

fn period_card(period: &ForecastPeriod, is_selected: bool) -> Vec<Line<'static>> {
    let marker = if is_selected { "▶ " } else { "  " };
    let name_style = if is_selected {
        Style::default().fg(Color::White).bold()
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut first = vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:<18}", period.name), name_style),
        Span::styled(
            format!("{:>4}°{}", period.temperature, period.temperature_unit),
            Style::default().fg(temp_color(period)).bold(),
        ),
    ];
    if let Some(chance) = period.precip_chance() {
        first.push(Span::styled(
            format!("  ☂ {}%", chance),
            Style::default().fg(Color::Blue),
        ));
    }

    let second = vec![
        Span::raw("    "),
        Span::styled(
            period.short_forecast.clone(),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  {} {}", period.wind_direction, period.wind_speed),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    vec![Line::from(first), Line::from(second)]
}

/// Temperature color, assuming the API's default Fahrenheit units.
fn temp_color(period: &ForecastPeriod) -> Color {
    match period.temperature {
        ..=15 => Color::Rgb(150, 200, 255),
        16..=32 => Color::Rgb(100, 180, 255),
        33..=50 => Color::Rgb(100, 220, 200),
        51..=68 => Color::Rgb(150, 230, 150),
        69..=86 => Color::Rgb(255, 220, 100),
        87..=104 => Color::Rgb(255, 150, 80),
        _ => Color::Rgb(255, 100, 100),
    }
}
