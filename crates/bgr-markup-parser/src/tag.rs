use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Category of a tag token.
///
/// Every `<...>` run in text is classified into exactly one family, runs the grammar does not
/// know are [TagFamily::Literal].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagFamily {
    /// `<Icon KeyAction="..."/>`
    Icon,

    /// `<param Name="..."/>`
    Param,

    /// `<alias Name="..."/>`
    Alias,

    /// `<PlayerName/>`
    PlayerName,

    /// `<cms Name="..."/>`
    Cms,

    /// `<FontStyle name="...">`
    FontStyleOpen,

    /// `</FontStyle>`
    FontStyleClose,

    /// `<span color="#HEX">`
    SpanColorOpen,

    /// `</>`, closes a color span.
    SpanClose,

    /// Date placeholders `%Y`, `%m`, `%d`, `%H` and `%M`.
    DateCode,

    /// Escape-coded breaks, the two characters `\n` or `\r`.
    LineBreak,

    /// Bracket reference of exactly 8 hex digits, `<1A2B3C4D>`.
    HexRef,

    /// Any other `<...>` run, kept verbatim.
    Literal,
}

impl TagFamily {
    /// Families that must end with `/>`.
    pub const SELF_CLOSING: [TagFamily; 5] = [
        TagFamily::Icon,
        TagFamily::Param,
        TagFamily::Alias,
        TagFamily::PlayerName,
        TagFamily::Cms,
    ];

    /// Name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TagFamily::Icon => "Icon",
            TagFamily::Param => "param",
            TagFamily::Alias => "alias",
            TagFamily::PlayerName => "PlayerName",
            TagFamily::Cms => "cms",
            TagFamily::FontStyleOpen | TagFamily::FontStyleClose => "FontStyle",
            TagFamily::SpanColorOpen | TagFamily::SpanClose => "span",
            TagFamily::DateCode => "date",
            TagFamily::LineBreak => "break",
            TagFamily::HexRef => "hexref",
            TagFamily::Literal => "literal",
        }
    }

    /// Look up a self-closing family by the name it is written with in markup.
    pub fn self_closing_by_name(name: &str) -> Option<TagFamily> {
        Self::SELF_CLOSING.into_iter().find(|x| x.name() == name)
    }

    pub fn is_self_closing(&self) -> bool {
        Self::SELF_CLOSING.contains(self)
    }

    /// The other half of a paired family.
    ///
    /// Note the color span pair is spelled asymmetrically: `<span color="#HEX">` ... `</>`.
    pub fn partner(&self) -> Option<TagFamily> {
        match self {
            TagFamily::FontStyleOpen => Some(TagFamily::FontStyleClose),
            TagFamily::FontStyleClose => Some(TagFamily::FontStyleOpen),
            TagFamily::SpanColorOpen => Some(TagFamily::SpanClose),
            TagFamily::SpanClose => Some(TagFamily::SpanColorOpen),
            _ => None,
        }
    }

    pub fn is_closing(&self) -> bool {
        matches!(self, TagFamily::FontStyleClose | TagFamily::SpanClose)
    }

    /// Whether tags in this family carry `key="value"` attributes worth extracting.
    pub fn has_attributes(&self) -> bool {
        matches!(
            self,
            TagFamily::Icon
                | TagFamily::Param
                | TagFamily::Alias
                | TagFamily::Cms
                | TagFamily::FontStyleOpen
                | TagFamily::SpanColorOpen
        )
    }
}

/// One row of the grammar table.
pub struct GrammarEntry {
    pub family: TagFamily,

    /// Recognition pattern, anchored on the whole raw tag text.
    pattern: Regex,
}

impl GrammarEntry {
    fn new(family: TagFamily, pattern: &str) -> Self {
        Self {
            family,
            pattern: Regex::new(pattern).expect("invalid tag grammar pattern"),
        }
    }

    pub fn matches(&self, raw: &str) -> bool {
        self.pattern.is_match(raw)
    }
}

static GRAMMAR: OnceLock<Vec<GrammarEntry>> = OnceLock::new();

static ATTRIBUTE_RE: OnceLock<Regex> = OnceLock::new();

/// The grammar table, in priority order.
///
/// Exact spellings come before prefixes so `</FontStyle>` and `</>` never fall into a prefix
/// family, and `<PlayerName/>` is matched on its full form.
pub fn grammar() -> &'static [GrammarEntry] {
    GRAMMAR.get_or_init(|| {
        vec![
            GrammarEntry::new(TagFamily::FontStyleClose, r"^</FontStyle>$"),
            GrammarEntry::new(TagFamily::SpanClose, r"^</>$"),
            GrammarEntry::new(
                TagFamily::SpanColorOpen,
                r#"^<span\s+color\s*=\s*['"]#[0-9A-Fa-f]{3,8}['"]\s*>$"#,
            ),
            GrammarEntry::new(TagFamily::FontStyleOpen, r"^<FontStyle"),
            GrammarEntry::new(TagFamily::PlayerName, r"^<PlayerName\s*/?>$"),
            GrammarEntry::new(TagFamily::Icon, r"^<Icon"),
            GrammarEntry::new(TagFamily::Param, r"^<param"),
            GrammarEntry::new(TagFamily::Alias, r"^<alias"),
            GrammarEntry::new(TagFamily::Cms, r"^<cms"),
            GrammarEntry::new(TagFamily::HexRef, r"^<[0-9A-Fa-f]{8}>$"),
        ]
    })
}

/// Classify a raw `<...>` run.
pub fn classify(raw: &str) -> TagFamily {
    grammar()
        .iter()
        .find(|entry| entry.matches(raw))
        .map(|entry| entry.family)
        .unwrap_or(TagFamily::Literal)
}

/// Extract `key="value"` pairs from a raw tag.
///
/// Single and double quotes are interchangeable, and a missing closing quote is tolerated. If a
/// key repeats, the first value wins.
pub fn extract_attributes(raw: &str) -> BTreeMap<String, String> {
    let re = ATTRIBUTE_RE.get_or_init(|| {
        Regex::new(r#"(?<key>[A-Za-z_][\w:.-]*)\s*=\s*['"](?<value>[^'"]*)['"]?"#)
            .expect("invalid attribute regex")
    });

    let mut attributes = BTreeMap::new();
    for capture in re.captures_iter(raw) {
        let (Some(key), Some(value)) = (capture.name("key"), capture.name("value")) else {
            continue;
        };
        attributes
            .entry(key.as_str().to_string())
            .or_insert_with(|| value.as_str().to_string());
    }
    attributes
}

/// Whether a tag ends with the self-closing marker `/>`, whitespace before it is allowed.
pub fn is_self_terminated(raw: &str) -> bool {
    raw.strip_suffix('>')
        .map(|x| x.trim_end().ends_with('/'))
        .unwrap_or(false)
}
