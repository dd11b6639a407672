//! OS side effects: clipboard and opening links.

use std::io::{self, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use crossterm::execute;
use crossterm::style::Print;

/// Something that can put text on the system clipboard.
pub trait Clipboard {
    /// Copies `text`; returns the mechanism used, for the status line.
    fn copy(&mut self, text: &str) -> io::Result<&'static str>;
}

/// Copies via the OSC 52 terminal escape, which works over SSH and inside
/// tmux (with `set-clipboard on`) without any native clipboard access.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl Osc52Clipboard<io::Stderr> {
    /// Writes to stderr, the stream the TUI draws on.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> io::Result<&'static str> {
        execute!(self.out, Print(osc52_sequence(text)))?;
        Ok("osc52")
    }
}

fn osc52_sequence(text: &str) -> String {
    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}

/// Opens `url` in the default browser.
///
/// Graphical browsers are launched in the background. A text-mode browser
/// runs in the foreground and blocks until it exits.
pub fn open_link(url: &str) -> io::Result<()> {
    webbrowser::open(url)
}
