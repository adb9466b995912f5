//! Terminal rendering of the chat surface.

use std::io::Write;

use nexchat_client::ChatView;
use nexchat_core::Role;

const REPLY_PREFIX: &str = "assistant> ";
const PROMPT: &str = "you> ";
const PENDING_INDICATOR: &str = "\u{2026}";
/// Backspace, overwrite with a space, backspace again: erases the one
/// column occupied by the pending indicator.
const ERASE_INDICATOR: &str = "\u{8} \u{8}";

/// A [`ChatView`] that renders into a terminal-style writer.
///
/// The typewriter effect prints only the suffix the last update added;
/// flushing after every write is the terminal's version of scrolling to
/// the latest content. Write errors are swallowed: a chat surface that
/// cannot be written to has nowhere to report the failure anyway.
pub struct TerminalView<W: Write> {
    out: W,
    /// Bytes of the in-progress reply already printed.
    printed: usize,
    pending_shown: bool,
    input_enabled: bool,
}

impl<W: Write> TerminalView<W> {
    /// Wraps a writer, typically stdout.
    pub fn new(out: W) -> Self {
        Self {
            out,
            printed: 0,
            pending_shown: false,
            input_enabled: true,
        }
    }

    /// Prints the input prompt if submissions are currently enabled.
    pub fn prompt(&mut self) {
        if self.input_enabled {
            let _ = write!(self.out, "{PROMPT}");
            let _ = self.out.flush();
        }
    }

    fn erase_pending_indicator(&mut self) {
        if self.pending_shown {
            let _ = write!(self.out, "{ERASE_INDICATOR}");
            self.pending_shown = false;
        }
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn show_message(&mut self, role: &Role, content: &str) {
        // The user's own line is already on screen from typing it.
        if *role != Role::User {
            let _ = writeln!(self.out, "{role:?}> {content}");
            let _ = self.out.flush();
        }
    }

    fn begin_reply(&mut self) {
        self.printed = 0;
        self.pending_shown = true;
        let _ = write!(self.out, "{REPLY_PREFIX}{PENDING_INDICATOR}");
        let _ = self.out.flush();
    }

    fn update_reply(&mut self, accumulated: &str) {
        self.erase_pending_indicator();
        // The reply grows append-only, so the unprinted part is a suffix.
        if let Some(suffix) = accumulated.get(self.printed..) {
            let _ = write!(self.out, "{suffix}");
            self.printed = accumulated.len();
        }
        let _ = self.out.flush();
    }

    fn finish_reply(&mut self) {
        self.erase_pending_indicator();
        let _ = writeln!(self.out);
        let _ = self.out.flush();
        self.printed = 0;
    }

    fn fail_reply(&mut self, notice: &str) {
        self.erase_pending_indicator();
        // A partially printed reply cannot be unprinted on a plain
        // terminal; the notice goes on its own line instead.
        if self.printed > 0 {
            let _ = writeln!(self.out);
        }
        let _ = writeln!(self.out, "{notice}");
        let _ = self.out.flush();
        self.printed = 0;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }
}
