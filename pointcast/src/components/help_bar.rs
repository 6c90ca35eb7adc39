use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Component;

pub struct HelpBar;

pub struct HelpBarProps {
    pub entry_open: bool,
}

impl Component for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let bindings: &[(&str, &str)] = if props.entry_open {
            &[("Tab", "field"), ("Enter", "apply"), ("Esc", "close")]
        } else {
            &[
                ("←↑↓→", "move"),
                ("e", "edit"),
                ("j/k", "period"),
                ("r", "refresh"),
                ("q", "quit"),
            ]
        };

        let mut spans = Vec::with_capacity(bindings.len() * 2);
        for (key, label) in bindings {
            spans.push(Span::styled(
                format!(" {}", key),
                Style::default().fg(Color::Cyan).bold(),
            ));
            spans.push(Span::styled(
                format!(" {}  ", label),
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
