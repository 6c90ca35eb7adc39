//! Two-line header: the current coordinate and what it resolved to.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use pointcast_core::AppState;

use super::Component;

pub const LOCATION_ICON: &str = "📍 ";

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub state: &'a AppState,
}

impl LocationHeader {
    pub const HEIGHT: u16 = 2;
}

impl Component for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(area);

        let mut coordinate_spans = vec![
            Span::raw(LOCATION_ICON),
            Span::styled(
                state.point.to_string(),
                Style::default().fg(Color::White).bold(),
            ),
        ];
        if let Some(locality) = state
            .gridpoint
            .payload()
            .and_then(|info| info.locality.as_deref())
        {
            coordinate_spans.push(Span::styled(
                format!("  near {}", locality),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(
            Paragraph::new(Line::from(coordinate_spans).centered()),
            chunks[0],
        );

        let resolution_line = match (&state.station, state.gridpoint.payload()) {
            (Some(station), Some(info)) => Line::from(vec![
                Span::styled("station ", Style::default().fg(Color::DarkGray)),
                Span::styled(station.clone(), Style::default().fg(Color::Cyan).bold()),
                Span::styled(
                    format!("  grid {},{}", info.grid_x, info.grid_y),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            (Some(station), None) => Line::from(vec![
                Span::styled("station ", Style::default().fg(Color::DarkGray)),
                Span::styled(station.clone(), Style::default().fg(Color::Cyan).bold()),
            ]),
            _ => Line::from(Span::styled(
                "station unresolved",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(resolution_line.centered()), chunks[1]);
    }
}
