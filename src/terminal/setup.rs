//! Entering and leaving TUI mode.

use crossterm::{
    cursor::Show,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Switch to the alternate screen with bracketed paste, so a pasted email
/// or password arrives as one event.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, EnableBracketedPaste)
}

/// Undo [`enter_tui_mode`] and raw mode. Safe to call more than once;
/// errors are ignored.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, DisableBracketedPaste, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Restore stdout from any state. Used by the panic hook.
pub fn emergency_restore() {
    leave_tui_mode(&mut io::stdout());
}
