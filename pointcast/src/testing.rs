//! Render test harness over ratatui's `TestBackend`.
//!
//! Components draw into an in-memory buffer; tests assert against the plain
//! text it contains.

use ratatui::backend::TestBackend;
use ratatui::{Frame, Terminal};

pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("failed to build test terminal");
        Self { terminal }
    }

    /// Draw one frame and return the buffer contents as plain text, rows
    /// separated by newlines, styling discarded.
    pub fn render_to_string_plain(&mut self, render: impl FnOnce(&mut Frame)) -> String {
        self.terminal.draw(render).expect("draw failed");

        let buffer = self.terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                match buffer.cell((x, y)) {
                    Some(cell) => out.push_str(cell.symbol()),
                    None => out.push(' '),
                }
            }
            out.push('\n');
        }
        out
    }
}
