use crate::tag::{classify, TagFamily};
use crate::token::{Tag, Token};
use bgr_types::numbered_lines;
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

/// Regex scanning one line into token candidates.
///
/// Alternatives are ordered so escape-coded breaks and date codes win over plain text, and the
/// last alternative takes a single `<`, `%` or `\` that did not start anything special. Every
/// character of the line is covered by some alternative.
static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_re() -> &'static Regex {
    TOKEN_RE.get_or_init(|| {
        Regex::new(r"(?<break>\\[nr])|(?<date>%[YmdHM])|(?<tag><[^>]+>)|(?<text>[^<%\\]+|[<%\\])")
            .expect("invalid token regex")
    })
}

struct Lexer<'a> {
    /// The line to scan.
    source: &'a str,

    /// Text waiting to be emitted, adjacent text matches are merged into one token.
    pending_text: String,

    /// Scanned tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pending_text: String::new(),
            tokens: vec![],
        }
    }

    /// Run the process and return scanned tokens.
    fn scan(mut self) -> Vec<Token> {
        let mut end = 0;
        for capture in token_re().captures_iter(self.source) {
            let Some(whole) = capture.get(0) else {
                continue;
            };
            if whole.start() > end {
                // Not reachable with the current pattern, keep the line lossless anyway.
                self.pending_text.push_str(&self.source[end..whole.start()]);
            }
            end = whole.end();

            if capture.name("break").is_some() {
                self.push_tag(whole.as_str(), TagFamily::LineBreak);
            } else if capture.name("date").is_some() {
                self.push_tag(whole.as_str(), TagFamily::DateCode);
            } else if capture.name("tag").is_some() {
                self.push_tag(whole.as_str(), classify(whole.as_str()));
            } else {
                self.pending_text.push_str(whole.as_str());
            }
        }
        if end < self.source.len() {
            self.pending_text.push_str(&self.source[end..]);
        }
        self.flush_text();

        trace!("scanned {} tokens from line of {} bytes", self.tokens.len(), self.source.len());
        self.tokens
    }

    fn push_tag(&mut self, raw: &str, family: TagFamily) {
        self.flush_text();
        self.tokens.push(Token::Tag(Tag::new(raw, family)));
    }

    fn flush_text(&mut self) {
        if !self.pending_text.is_empty() {
            self.tokens
                .push(Token::Text(std::mem::take(&mut self.pending_text)));
        }
    }
}

/// Tokenize one line of text.
///
/// The line must not contain a line feed; use [tokenize_document] for whole documents.
pub fn tokenize(line: &str) -> Vec<Token> {
    Lexer::new(line).scan()
}

/// Tokenize every line of a document, with 1-based line numbers.
pub fn tokenize_document(text: &str) -> Vec<(usize, Vec<Token>)> {
    numbered_lines(text)
        .map(|(line_number, line)| (line_number, tokenize(line)))
        .collect()
}
