//! Colored terminal output.

use console::{Style, Term};

/// Visual weight of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    Success,
    Warning,
    Error,
    Heading,
    Muted,
}

impl Tone {
    fn style(self) -> Option<Style> {
        match self {
            Self::Plain => None,
            Self::Success => Some(Style::new().green()),
            Self::Warning => Some(Style::new().yellow()),
            Self::Error => Some(Style::new().red()),
            Self::Heading => Some(Style::new().cyan().bold()),
            Self::Muted => Some(Style::new().dim()),
        }
    }
}

/// Report writer on stderr. Write failures are ignored.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Write one line in `tone`.
    pub(crate) fn line(&self, tone: Tone, msg: &str) {
        let _ = match tone.style() {
            Some(style) => self.term.write_line(&style.apply_to(msg).to_string()),
            None => self.term.write_line(msg),
        };
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(Tone::Plain, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(Tone::Success, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(Tone::Warning, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.line(Tone::Error, msg);
    }

    pub(crate) fn highlight(&self, msg: &str) {
        self.line(Tone::Heading, msg);
    }

    pub(crate) fn detail(&self, msg: &str) {
        self.line(Tone::Muted, msg);
    }

    /// Rule under a report heading.
    pub(crate) fn separator(&self) {
        self.line(Tone::Heading, &"═".repeat(63));
    }
}
