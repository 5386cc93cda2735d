//! Colored terminal output for the nd commands.
//!
//! Everything is written to stderr so that rendered documents and JSON on
//! stdout stay clean.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    label: Style,
    title: Style,
}

impl Output {
    /// Create a new output formatter writing to stderr.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            label: Style::new().dim(),
            title: Style::new().cyan().bold(),
        }
    }

    /// Print a progress message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a page title (cyan bold).
    pub(crate) fn title(&self, title: &str) {
        let _ = self.term.write_line(&self.title.apply_to(title).to_string());
    }

    /// Print a `label: value` metadata line with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: &str) {
        let label = self.label.apply_to(format!("{label}:"));
        let _ = self.term.write_line(&format!("{label} {value}"));
    }

    /// Print render warnings (yellow) under a count header. Prints nothing
    /// when there are none.
    pub(crate) fn warnings(&self, warnings: &[String]) {
        for line in warning_lines(warnings) {
            let _ = self.term.write_line(&self.yellow.apply_to(line).to_string());
        }
    }
}

fn warning_lines(warnings: &[String]) -> Vec<String> {
    if warnings.is_empty() {
        return Vec::new();
    }
    let noun = if warnings.len() == 1 {
        "warning"
    } else {
        "warnings"
    };
    std::iter::once(format!("{} render {noun}:", warnings.len()))
        .chain(warnings.iter().map(|w| format!("  - {w}")))
        .collect()
}
