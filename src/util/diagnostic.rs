//! Terminal rendering for errors shown by the CLI.
//!
//! ```text
//! error[remotely::app::unknown]: unknown application `billing`
//!   = registered applications: adventure_app
//! help: Run `remotely apps` to see configured applications
//! ```

use std::error::Error as StdError;
use std::fmt::{self, Write as _};

/// Suggestions shared by several error variants.
pub mod suggestions {
    pub const NO_APPS: &str = "Add an [apps.NAME] table with a `url` to .remotely/config.toml";

    pub const LIST_APPS: &str = "Run `remotely apps` to see configured applications";

    pub const CHECK_URL: &str = "Check the application's `url` and that the service is running";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

/// A rendered error: headline, code, notes and help lines.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
    /// miette code of the originating error, if any
    pub code: Option<String>,
    /// `= ...` lines under the headline
    pub notes: Vec<String>,
    pub help: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            code: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Diagnostic::error(message)
        }
    }

    /// Start from a miette diagnostic: its message, code, help and the
    /// chain of underlying causes.
    pub fn from_miette(err: &dyn miette::Diagnostic) -> Self {
        let mut diag = Diagnostic::error(err.to_string());
        diag.code = err.code().map(|c| c.to_string());
        if let Some(help) = err.help() {
            diag.help.push(help.to_string());
        }

        let mut cause = StdError::source(err);
        while let Some(source) = cause {
            diag.notes.push(format!("caused by: {}", source));
            cause = source.source();
        }
        diag
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }

    /// Render for a terminal, with ANSI colors when `color` is set.
    pub fn render(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let head = match &self.code {
            Some(code) => format!("{}[{}]", self.severity.label(), code),
            None => self.severity.label().to_string(),
        };
        let _ = writeln!(out, "{}: {}", paint(self.severity.ansi(), &head), self.message);

        for note in &self.notes {
            let _ = writeln!(out, "  = {}", note);
        }
        for help in &self.help {
            let _ = writeln!(out, "{}: {}", paint("1;32", "help"), help);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.render(color));
}
