//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("build"; "wrote {} modules", count);
//! ```
//!
//! Watch mode uses [`WatchStatus`] instead, which keeps one timestamped
//! status block on screen and overwrites it on every event.

use chrono::Local;
use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use std::{
    io::{Write, stdout},
    sync::OnceLock,
};

/// Terminal width, detected once.
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Columns used when the terminal size is unknown (pipes, CI).
const FALLBACK_WIDTH: u16 = 120;

/// `"[module] "` → module length plus brackets and a space.
#[inline]
const fn prefix_len(module_len: usize) -> usize {
    module_len + 3
}

fn terminal_width() -> u16 {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(FALLBACK_WIDTH))
}

/// Log a message with a colored module prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print `[module] message`, truncating single-line messages to the
/// terminal width.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();
    execute!(stdout, Clear(ClearType::UntilNewLine)).ok();

    let message = if message.contains('\n') {
        message
    } else {
        let max_len = (terminal_width() as usize).saturating_sub(prefix_len(module.len()));
        truncate_str(message, max_len)
    };

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "serve" => prefix.bright_blue().bold(),
        "watch" => prefix.bright_green().bold(),
        "reload" => prefix.bright_cyan().bold(),
        "error" => prefix.bright_red().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Cut `s` to at most `max_len` bytes on a char boundary.
fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Watch Status
// ============================================================================

/// Single-block status display for watch mode.
///
/// Each message replaces the previous one, so a long session leaves one
/// status block on screen rather than a scrolling log.
///
/// ```ignore
/// let mut status = WatchStatus::new();
/// status.success("regenerated skills (12 records)");
/// status.unchanged("projects");
/// status.error("failed to write skills-data.js", "permission denied");
/// ```
#[derive(Debug, Default)]
pub struct WatchStatus {
    /// Lines printed by the previous message.
    last_lines: usize,
}

impl WatchStatus {
    pub const fn new() -> Self {
        Self { last_lines: 0 }
    }

    pub fn success(&mut self, message: &str) {
        self.display(&"✓".green().to_string(), message);
    }

    pub fn unchanged(&mut self, what: &str) {
        self.display("", &format!("unchanged: {what}").dimmed().to_string());
    }

    pub fn warning(&mut self, message: &str) {
        self.display(&"!".yellow().to_string(), message);
    }

    pub fn error(&mut self, summary: &str, detail: &str) {
        let message = if detail.is_empty() {
            summary.to_owned()
        } else {
            format!("{summary}\n{detail}")
        };
        self.display(&"✗".red().to_string(), &message);
    }

    fn display(&mut self, symbol: &str, message: &str) {
        let mut stdout = stdout().lock();

        if self.last_lines > 0 {
            #[allow(clippy::cast_possible_truncation)]
            let lines = self.last_lines as u16;
            execute!(stdout, cursor::MoveUp(lines)).ok();
            execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
        }

        let line = format_status(&timestamp(), symbol, message);
        writeln!(stdout, "{line}").ok();
        stdout.flush().ok();

        self.last_lines = line_count(message);
    }
}

fn timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

fn format_status(time: &str, symbol: &str, message: &str) -> String {
    let time = format!("[{time}]").dimmed();
    if symbol.is_empty() {
        format!("{time} {message}")
    } else {
        format!("{time} {symbol} {message}")
    }
}

fn line_count(message: &str) -> usize {
    message.matches('\n').count() + 1
}
