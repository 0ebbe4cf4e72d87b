// Keyslots Console
// Terminal rendering of the action history and slot listing

use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use keyslots_core::config::SlotLabels;
use keyslots_core::display::render_text;
use keyslots_core::{ActionHistory, DisplayLog, SlotRecord};

/// Status console drawn on a terminal.
///
/// Hiding clears the screen; nothing is drawn until it is shown again.
pub struct ConsoleDisplay<W: Write> {
    out: W,
    visible: bool,
}

impl ConsoleDisplay<Stdout> {
    pub fn stdout(visible: bool) -> Self {
        Self::new(io::stdout(), visible)
    }
}

impl<W: Write> ConsoleDisplay<W> {
    pub fn new(out: W, visible: bool) -> Self {
        Self { out, visible }
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn draw(&mut self, text: &str) -> io::Result<()> {
        self.clear()?;
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    #[cfg(test)]
    fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> DisplayLog for ConsoleDisplay<W> {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible && !visible {
            if let Err(e) = self.clear() {
                log::warn!("Failed to clear console: {}", e);
            }
        }
        self.visible = visible;
    }

    fn render(&mut self, history: &ActionHistory, slots: Option<&[SlotRecord]>, labels: &SlotLabels) {
        if !self.visible {
            return;
        }
        let text = render_text(history, slots, labels);
        if let Err(e) = self.draw(&text) {
            log::warn!("Failed to draw console: {}", e);
        }
    }
}
