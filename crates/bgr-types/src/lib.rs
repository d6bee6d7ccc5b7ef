use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;

mod stats;
pub use stats::{StatFamily, TagStats};

/// Split document text into lines, numbered from 1.
///
/// Lines are split on `\n`, a trailing `\r` on each line is dropped so CRLF text produces the
/// same lines as LF text.
///
/// An empty text still has one empty line.
pub fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
}

/// Count of lines in document text, as shown next to each editor pane.
pub fn line_count(text: &str) -> usize {
    numbered_lines(text).count()
}

/// Which check produced a [Diagnostic].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DiagnosticKind {
    /// Open and close tag counts of a paired family differ on one line.
    UnbalancedPair {
        family: String,
        open: usize,
        close: usize,
    },

    /// A self-closing tag not terminated with `/>`.
    Unterminated { family: String },

    /// A source tag that has no verbatim copy in the target document.
    MissingInTarget { family: String },
}

/// One validation finding tied to a line.
///
/// Diagnostics are plain data. Nothing in the checks ever fails, a broken tag only produces one
/// more [Diagnostic].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Line number, 1-based.
    pub line: usize,

    pub kind: DiagnosticKind,

    /// Human-readable message.
    pub message: String,

    /// Original raw tag text, if the finding is about a single tag.
    pub tag: Option<String>,
}

impl Diagnostic {
    pub fn unbalanced_pair(line: usize, family: impl Into<String>, open: usize, close: usize) -> Self {
        let family = family.into();
        Self {
            line,
            message: format!("{family} tag count mismatch: {open} open, {close} close"),
            kind: DiagnosticKind::UnbalancedPair { family, open, close },
            tag: None,
        }
    }

    pub fn unterminated(line: usize, family: impl Into<String>, raw: impl Into<String>) -> Self {
        let family = family.into();
        let raw = raw.into();
        Self {
            line,
            message: format!("unterminated {family} tag: {raw}"),
            kind: DiagnosticKind::Unterminated { family },
            tag: Some(raw),
        }
    }

    pub fn missing_in_target(line: usize, family: impl Into<String>, raw: impl Into<String>) -> Self {
        let family = family.into();
        let raw = raw.into();
        Self {
            line,
            message: format!("{family} tag missing or garbled in target: {raw}"),
            kind: DiagnosticKind::MissingInTarget { family },
            tag: Some(raw),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}
