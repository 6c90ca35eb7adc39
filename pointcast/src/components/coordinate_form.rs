//! Coordinate entry form.
//!
//! A small modal with one numeric input per coordinate half. Tab switches
//! the focused field, Enter commits both halves as one point update, Esc
//! closes without applying.

use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use pointcast_core::{Action, CoordinateEntry, CoordinateField};

use super::number_input::{NumberInput, NumberInputProps};
use super::{centered_rect, Component};
use crate::event::EventKind;

pub struct CoordinateFormProps<'a> {
    pub entry: &'a CoordinateEntry,
}

pub struct CoordinateForm {
    lat_input: NumberInput,
    lon_input: NumberInput,
    was_open: bool,
}

impl CoordinateForm {
    pub const WIDTH: u16 = 40;
    pub const HEIGHT: u16 = 7;

    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the input cursors when the form (re)opens.
    pub fn set_open(&mut self, entry: Option<&CoordinateEntry>) {
        match entry {
            Some(entry) if !self.was_open => {
                self.lat_input.cursor_to_end(&entry.lat);
                self.lon_input.cursor_to_end(&entry.lon);
                self.was_open = true;
            }
            Some(_) => {}
            None => self.was_open = false,
        }
    }

    fn active_input(&mut self, field: CoordinateField) -> &mut NumberInput {
        match field {
            CoordinateField::Latitude => &mut self.lat_input,
            CoordinateField::Longitude => &mut self.lon_input,
        }
    }
}

impl Default for CoordinateForm {
    fn default() -> Self {
        Self {
            lat_input: NumberInput::new(),
            lon_input: NumberInput::new(),
            was_open: false,
        }
    }
}

impl Component for CoordinateForm {
    type Props<'a> = CoordinateFormProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => return vec![Action::EntryCancel],
            KeyCode::Enter => return vec![Action::EntrySubmit],
            KeyCode::Tab | KeyCode::BackTab => {
                return vec![Action::EntryFocus(props.entry.field.next())];
            }
            _ => {}
        }

        let field = props.entry.field;
        let input_props = NumberInputProps {
            label: field_label(field),
            value: props.entry.active(),
            is_focused: true,
            on_change: Action::EntryInput,
        };
        self.active_input(field).handle_event(event, input_props)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        if area.width < Self::WIDTH || area.height < Self::HEIGHT {
            return;
        }

        let modal_area = centered_rect(Self::WIDTH, Self::HEIGHT, area);
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Set coordinate ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        let inner = block.inner(modal_area);
        frame.render_widget(block, modal_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // latitude
            Constraint::Length(1), // longitude
            Constraint::Length(1), // spacer / error
            Constraint::Length(1), // hint
        ])
        .split(inner);

        let entry = props.entry;
        self.lat_input.render(
            frame,
            rows[0],
            NumberInputProps {
                label: "Latitude",
                value: &entry.lat,
                is_focused: entry.field == CoordinateField::Latitude,
                on_change: Action::EntryInput,
            },
        );
        self.lon_input.render(
            frame,
            rows[1],
            NumberInputProps {
                label: "Longitude",
                value: &entry.lon,
                is_focused: entry.field == CoordinateField::Longitude,
                on_change: Action::EntryInput,
            },
        );

        if entry.invalid {
            frame.render_widget(
                Paragraph::new(Line::from("invalid coordinate").centered())
                    .style(Style::default().fg(Color::Red)),
                rows[2],
            );
        }

        frame.render_widget(
            Paragraph::new(Line::from("Tab field · Enter apply · Esc close").centered())
                .style(Style::default().fg(Color::DarkGray)),
            rows[3],
        );
    }
}

fn field_label(field: CoordinateField) -> &'static str {
    match field {
        CoordinateField::Latitude => "Latitude",
        CoordinateField::Longitude => "Longitude",
    }
}
