//! Terminal setup, drawing and the host event loop.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use tracing::debug;

use super::focus::FocusRing;
use super::input::{read_command, HostCommand};
use super::render::{render_lines, Line};
use crate::dom::Document;
use crate::pipeline::App;
use crate::types::Attr;

/// How long the loop waits for input before repainting.
const TICK: Duration = Duration::from_millis(250);

const HELP: &str = "Tab: focus  Enter: click  r: refresh  q: quit";

// =============================================================================
// Terminal View
// =============================================================================

/// Raw-mode, alternate-screen view. Restores the terminal on drop.
pub struct TerminalView {
    out: Stdout,
    active: bool,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            active: false,
        }
    }

    /// Enter raw mode and the alternate screen.
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        execute!(self.out, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen)?;
        terminal::disable_raw_mode()?;
        self.active = false;
        Ok(())
    }

    /// Repaint the whole screen: `lines` from the top, `status` on the last row.
    pub fn draw(&mut self, lines: &[Line], status: &str) -> io::Result<()> {
        let (_, rows) = terminal::size()?;
        queue!(self.out, Clear(ClearType::All))?;

        for (row, line) in lines.iter().take(rows.saturating_sub(1) as usize).enumerate() {
            queue!(self.out, MoveTo(0, row as u16))?;
            for span in &line.spans {
                apply_attr(&mut self.out, span.attr)?;
                queue!(self.out, Print(&span.text), SetAttribute(Attribute::Reset))?;
            }
        }

        queue!(
            self.out,
            MoveTo(0, rows.saturating_sub(1)),
            SetAttribute(Attribute::Dim),
            Print(status),
            SetAttribute(Attribute::Reset)
        )?;
        self.out.flush()
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

fn apply_attr(out: &mut Stdout, attr: Attr) -> io::Result<()> {
    if attr.contains(Attr::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if attr.contains(Attr::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if attr.contains(Attr::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if attr.contains(Attr::INVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

// =============================================================================
// Event Loop
// =============================================================================

/// Drive `app` interactively until the user quits.
///
/// `document` must be the document `app` was mounted into. Every iteration
/// repaints from the document, so anchors written by push effects show up
/// without further bookkeeping.
pub fn run(app: &App, document: &Document) -> io::Result<()> {
    let mut view = TerminalView::new();
    view.enter()?;
    let mut focus = FocusRing::new();

    loop {
        focus.sync(document.clickable_elements(app.host()));
        let lines = render_lines(document, app.host(), focus.focused());
        view.draw(&lines, HELP)?;

        let Some(command) = read_command(TICK)? else {
            continue;
        };
        debug!(?command, "host command");

        match command {
            HostCommand::Quit => break,
            HostCommand::FocusNext => {
                focus.next();
            }
            HostCommand::FocusPrevious => {
                focus.previous();
            }
            HostCommand::Activate => {
                if let Some(node) = focus.focused() {
                    document.click(node).map_err(io::Error::other)?;
                }
            }
            HostCommand::Refresh => {
                app.refresh();
            }
            HostCommand::Redraw => {}
        }
    }

    view.leave()
}
