// Console sink and color styling used by reporters

use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use console::Style;

/// Named color styles. Styling is forced on or off so output does not
/// depend on whether stdout is a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colors {
    enabled: bool,
}

impl Default for Colors {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colors that never emit escape codes
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, style: Style, text: impl Display) -> String {
        style
            .force_styling(self.enabled)
            .apply_to(text)
            .to_string()
    }

    pub fn dim(&self, text: impl Display) -> String {
        self.paint(Style::new().dim(), text)
    }

    pub fn red(&self, text: impl Display) -> String {
        self.paint(Style::new().red(), text)
    }

    pub fn green(&self, text: impl Display) -> String {
        self.paint(Style::new().green(), text)
    }

    pub fn yellow(&self, text: impl Display) -> String {
        self.paint(Style::new().yellow(), text)
    }

    pub fn cyan(&self, text: impl Display) -> String {
        self.paint(Style::new().cyan(), text)
    }

    pub fn magenta(&self, text: impl Display) -> String {
        self.paint(Style::new().magenta(), text)
    }

    pub fn black_on_red(&self, text: impl Display) -> String {
        self.paint(Style::new().black().on_red(), text)
    }

    pub fn black_on_green(&self, text: impl Display) -> String {
        self.paint(Style::new().black().on_green(), text)
    }

    pub fn black_on_yellow(&self, text: impl Display) -> String {
        self.paint(Style::new().black().on_yellow(), text)
    }
}

#[derive(Debug, Default)]
struct Buffer {
    lines: Vec<String>,
    partial: String,
}

/// Handle on the lines captured by a memory logger
#[derive(Debug, Clone, Default)]
pub struct MemoryOutput {
    buffer: Arc<Mutex<Buffer>>,
}

impl MemoryOutput {
    fn lock(&self) -> MutexGuard<'_, Buffer> {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Captured lines, including an unterminated trailing line
    pub fn lines(&self) -> Vec<String> {
        let buffer = self.lock();
        let mut lines = buffer.lines.clone();
        if !buffer.partial.is_empty() {
            lines.push(buffer.partial.clone());
        }
        lines
    }

    /// Captured output joined with newlines
    pub fn text(&self) -> String {
        self.lines().join("\n")
    }

    pub fn clear(&self) {
        let mut buffer = self.lock();
        buffer.lines.clear();
        buffer.partial.clear();
    }
}

#[derive(Debug, Clone)]
enum Target {
    Stdout,
    Memory(MemoryOutput),
}

/// Line-based output sink shared by a reporter and its error printer
#[derive(Debug, Clone)]
pub struct Logger {
    target: Target,
    colors: Colors,
}

impl Default for Logger {
    fn default() -> Self {
        Self::stdout(Colors::default())
    }
}

impl Logger {
    pub fn stdout(colors: Colors) -> Self {
        Self {
            target: Target::Stdout,
            colors,
        }
    }

    /// Logger writing into memory with styling disabled
    pub fn memory() -> (Self, MemoryOutput) {
        Self::memory_with_colors(Colors::plain())
    }

    pub fn memory_with_colors(colors: Colors) -> (Self, MemoryOutput) {
        let output = MemoryOutput::default();
        let logger = Self {
            target: Target::Memory(output.clone()),
            colors,
        };
        (logger, output)
    }

    pub fn colors(&self) -> &Colors {
        &self.colors
    }

    /// Write a full line
    pub fn log(&self, line: impl Display) {
        match &self.target {
            Target::Stdout => {
                let mut stdout = io::stdout().lock();
                let _ = writeln!(stdout, "{}", line);
            }
            Target::Memory(output) => {
                let mut buffer = output.lock();
                let text = format!("{}{}", std::mem::take(&mut buffer.partial), line);
                buffer.lines.extend(text.split('\n').map(str::to_string));
            }
        }
    }

    /// Write without a line terminator
    pub fn write(&self, text: impl Display) {
        match &self.target {
            Target::Stdout => {
                let mut stdout = io::stdout().lock();
                let _ = write!(stdout, "{}", text);
                let _ = stdout.flush();
            }
            Target::Memory(output) => {
                output.lock().partial.push_str(&text.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_colors_emit_no_escapes() {
        let colors = Colors::plain();
        assert_eq!(colors.red("boom"), "boom");
        assert_eq!(colors.black_on_green(" PASSED "), " PASSED ");
    }

    #[test]
    fn test_enabled_colors_emit_escapes() {
        let colors = Colors::new(true);
        let painted = colors.green("ok");
        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains("ok"));
    }

    #[test]
    fn test_memory_logger_lines() {
        let (logger, output) = Logger::memory();
        logger.log("");
        logger.log("a\nb");
        logger.write(".");
        logger.write(".");
        assert_eq!(output.lines(), vec!["", "a", "b", ".."]);

        logger.log("");
        assert_eq!(output.lines(), vec!["", "a", "b", ".."]);
        logger.log("done");
        assert_eq!(output.text(), "\na\nb\n..\ndone");

        output.clear();
        assert!(output.lines().is_empty());
    }
}
