use bgr_markup_parser::{tokenize_document, TagFamily, Token};
use bgr_types::{StatFamily, TagStats};
use regex::Regex;
use std::sync::OnceLock;

static CURLY_PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn stat_family(family: TagFamily) -> Option<StatFamily> {
    match family {
        TagFamily::Icon => Some(StatFamily::Icon),
        TagFamily::Param => Some(StatFamily::Param),
        TagFamily::Alias => Some(StatFamily::Alias),
        TagFamily::PlayerName => Some(StatFamily::PlayerName),
        TagFamily::Cms => Some(StatFamily::Cms),
        TagFamily::FontStyleOpen => Some(StatFamily::FontStyleOpen),
        TagFamily::FontStyleClose => Some(StatFamily::FontStyleClose),
        TagFamily::SpanColorOpen => Some(StatFamily::SpanColorOpen),
        TagFamily::SpanClose => Some(StatFamily::SpanClose),
        TagFamily::HexRef => Some(StatFamily::HexRef),
        TagFamily::DateCode | TagFamily::LineBreak | TagFamily::Literal => None,
    }
}

/// Count tag occurrences per family in `text`.
///
/// Counts every occurrence, well-formed or not. Curly placeholders like `{0}` are counted in
/// plain text only.
pub fn count_stats(text: &str) -> TagStats {
    let curly_re = CURLY_PLACEHOLDER_RE
        .get_or_init(|| Regex::new(r"\{\d+\}").expect("invalid curly placeholder regex"));

    let mut stats = TagStats::new();
    for (_, tokens) in tokenize_document(text) {
        for token in tokens.iter() {
            match token {
                Token::Text(v) => {
                    stats.record_n(StatFamily::CurlyPlaceholder, curly_re.find_iter(v).count())
                }
                Token::Tag(v) => {
                    if let Some(family) = stat_family(v.family) {
                        stats.record(family);
                    }
                }
            }
        }
    }
    stats
}
