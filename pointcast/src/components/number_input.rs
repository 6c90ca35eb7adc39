//! Single-line numeric input with cursor editing.
//!
//! Accepts only the characters a signed decimal number can contain; the
//! actual range check happens on submit, in the reducer. Emits `on_change`
//! with the full new value for each edit.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use pointcast_core::Action;

use super::Component;
use crate::event::EventKind;

pub struct NumberInputProps<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub is_focused: bool,
    pub on_change: fn(String) -> Action,
}

/// Cursor position is a byte index into the (ASCII) value.
#[derive(Default)]
pub struct NumberInput {
    cursor: usize,
}

impl NumberInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the cursor at the end of the current value (form open/focus).
    pub fn cursor_to_end(&mut self, value: &str) {
        self.cursor = value.len();
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + 1);
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    fn delete_char_before(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..self.cursor - 1]);
        new_value.push_str(&value[self.cursor..]);
        self.cursor -= 1;
        Some(new_value)
    }

    fn delete_char_at(&self, value: &str) -> Option<String> {
        if self.cursor >= value.len() {
            return None;
        }
        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..self.cursor]);
        new_value.push_str(&value[self.cursor + 1..]);
        Some(new_value)
    }
}

impl Component for NumberInput {
    type Props<'a> = NumberInputProps<'a>;

    fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> Vec<Action> {
        if !props.is_focused {
            return Vec::new();
        }

        self.clamp_cursor(props.value);

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    Vec::new()
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    Vec::new()
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    vec![(props.on_change)(String::new())]
                }
                _ => Vec::new(),
            };
        }

        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                let new_value = self.insert_char(props.value, c);
                vec![(props.on_change)(new_value)]
            }
            KeyCode::Backspace => self
                .delete_char_before(props.value)
                .map(|v| vec![(props.on_change)(v)])
                .unwrap_or_default(),
            KeyCode::Delete => self
                .delete_char_at(props.value)
                .map(|v| vec![(props.on_change)(v)])
                .unwrap_or_default(),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(props.value.len());
                Vec::new()
            }
            KeyCode::Home => {
                self.cursor = 0;
                Vec::new()
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);

        let label_style = if props.is_focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![Span::styled(format!("{:<10}", props.label), label_style)];

        if props.is_focused {
            let (before, rest) = props.value.split_at(self.cursor);
            let (at, after) = if rest.is_empty() {
                (" ", "")
            } else {
                rest.split_at(1)
            };
            spans.push(Span::raw(before.to_string()));
            spans.push(Span::styled(
                at.to_string(),
                Style::default().add_modifier(Modifier::REVERSED),
            ));
            spans.push(Span::raw(after.to_string()));
        } else {
            spans.push(Span::styled(
                props.value.to_string(),
                Style::default().fg(Color::Gray),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
