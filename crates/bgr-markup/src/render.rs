use crate::style::{StyleStack, TextStyle};
use crate::tables::{RenderTables, UNRESOLVED};
use crate::width::WidthClass;
use crate::Preview;
use bgr_markup_parser::{tokenize_document, Tag, TagFamily, Token};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;

/// Rendering switches, the checkboxes above the preview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Replace space, tab, CR and LF in text with visible glyphs.
    pub show_hidden_chars: bool,

    /// Classify every text character by width rule.
    pub show_char_width_rule: bool,

    /// End every line but the last with a line-end glyph.
    pub show_line_breaks: bool,
}

/// Glyph closing a line when line breaks are shown.
pub const LINE_END_GLYPH: char = '↵';

/// Rendered form of one token, or one character of a text token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PresentationUnit {
    /// Styled text.
    ///
    /// `width` is only set when the width rule is shown, then `text` is a single character.
    /// Characters the rule cares about are highlighted and carry a tooltip naming their class.
    Text {
        text: String,
        style: TextStyle,
        width: Option<WidthClass>,
        highlight: bool,
        tooltip: Option<&'static str>,
    },

    /// Key-cap for an `Icon` tag.
    KeyCap { label: String, raw: String },

    /// Inline badge for `param`, `alias` and `cms` tags.
    Badge {
        family: &'static str,
        name: Option<String>,
        label: String,
    },

    /// Stand-in for the runtime player name.
    PlayerName { label: String },

    /// Sample substitution for a date code.
    Date { code: String, text: String },

    /// Escape-coded break, `\n` or `\r` as written.
    Break { raw: String },

    /// Tag text shown verbatim.
    Markup { raw: String },

    /// End of a line, only with [RenderOptions::show_line_breaks].
    LineEnd,
}

impl PresentationUnit {
    fn text(text: impl Into<String>, style: TextStyle, width: Option<WidthClass>) -> Self {
        PresentationUnit::Text {
            text: text.into(),
            style,
            width,
            highlight: width.is_some_and(|x| x.is_highlighted()),
            tooltip: width.and_then(|x| x.tooltip()),
        }
    }
}

/// Visible glyph for a hidden character, `None` if the character is visible already.
pub fn hidden_glyph(ch: char) -> Option<char> {
    match ch {
        ' ' => Some('·'),
        '\t' => Some('→'),
        '\r' => Some('␍'),
        '\n' => Some('↵'),
        '\u{3000}' => Some('□'),
        _ => None,
    }
}

/// Renders the tokens of one line.
///
/// Holds the style stack of the line, a new renderer starts every line with no open styles.
struct LineRenderer<'a> {
    options: &'a RenderOptions,
    tables: &'a RenderTables,
    styles: StyleStack,
    units: Vec<PresentationUnit>,
}

impl<'a> LineRenderer<'a> {
    fn new(options: &'a RenderOptions, tables: &'a RenderTables) -> Self {
        Self {
            options,
            tables,
            styles: StyleStack::new(),
            units: vec![],
        }
    }

    fn push(&mut self, token: &Token) {
        match token {
            Token::Text(v) => self.push_text(v.as_str()),
            Token::Tag(v) => self.push_tag(v),
        }
    }

    fn push_text(&mut self, text: &str) {
        let style = self.styles.current();
        let text = if self.options.show_hidden_chars {
            text.chars()
                .map(|x| hidden_glyph(x).unwrap_or(x))
                .collect::<String>()
        } else {
            text.to_string()
        };

        if self.options.show_char_width_rule {
            for ch in text.chars() {
                self.units.push(PresentationUnit::text(
                    ch,
                    style.clone(),
                    Some(WidthClass::classify(ch)),
                ));
            }
        } else {
            self.units.push(PresentationUnit::text(text, style, None));
        }
    }

    fn push_tag(&mut self, tag: &Tag) {
        if self.styles.apply(tag) {
            return;
        }

        let unit = match tag.family {
            TagFamily::Icon => PresentationUnit::KeyCap {
                label: self.tables.icon_keys.resolve(tag).to_string(),
                raw: tag.raw.clone(),
            },
            TagFamily::Param | TagFamily::Alias | TagFamily::Cms => badge(tag),
            TagFamily::PlayerName => PresentationUnit::PlayerName {
                label: self.tables.player_name.clone(),
            },
            TagFamily::DateCode => match self.tables.dates.substitute(tag.raw.as_str()) {
                Some(text) => PresentationUnit::Date {
                    code: tag.raw.clone(),
                    text,
                },
                None => PresentationUnit::Markup {
                    raw: tag.raw.clone(),
                },
            },
            TagFamily::LineBreak => PresentationUnit::Break {
                raw: tag.raw.clone(),
            },
            // Style tags are consumed by the style stack above.
            TagFamily::FontStyleOpen
            | TagFamily::FontStyleClose
            | TagFamily::SpanColorOpen
            | TagFamily::SpanClose
            | TagFamily::HexRef
            | TagFamily::Literal => PresentationUnit::Markup {
                raw: tag.raw.clone(),
            },
        };
        self.units.push(unit);
    }

    fn finish(self) -> Vec<PresentationUnit> {
        self.units
    }
}

fn badge(tag: &Tag) -> PresentationUnit {
    let name = tag.attr("Name").map(str::to_string);
    let label = match (tag.family, name.as_deref()) {
        (_, None) => UNRESOLVED.to_string(),
        (TagFamily::Param, Some(v)) => format!("{{{v}}}"),
        (TagFamily::Alias, Some(v)) => format!("[{v}]"),
        (_, Some(v)) => format!("\"{v}\""),
    };
    PresentationUnit::Badge {
        family: tag.family.name(),
        name,
        label,
    }
}

/// Render the tokens of one line.
pub fn render(
    tokens: &[Token],
    options: &RenderOptions,
    tables: &RenderTables,
) -> Vec<PresentationUnit> {
    let mut renderer = LineRenderer::new(options, tables);
    for token in tokens.iter() {
        renderer.push(token);
    }
    renderer.finish()
}

/// Render every line of a document.
pub fn render_document(
    text: &str,
    options: &RenderOptions,
    tables: &RenderTables,
) -> Vec<Vec<PresentationUnit>> {
    let lines = tokenize_document(text);
    let last = lines.len();
    lines
        .into_iter()
        .map(|(line_number, tokens)| {
            let mut units = render(tokens.as_slice(), options, tables);
            if options.show_line_breaks && line_number < last {
                units.push(PresentationUnit::LineEnd);
            }
            units
        })
        .collect()
}

impl Preview for PresentationUnit {
    fn to_preview(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PresentationUnit::Text { text, .. } => formatter.write_str(text),
            PresentationUnit::KeyCap { label, .. } => write!(formatter, "[{label}]"),
            PresentationUnit::Badge { label, .. } => formatter.write_str(label),
            PresentationUnit::PlayerName { label } => formatter.write_str(label),
            PresentationUnit::Date { text, .. } => formatter.write_str(text),
            PresentationUnit::Break { .. } => formatter.write_str("\n"),
            PresentationUnit::Markup { raw } => formatter.write_str(raw),
            PresentationUnit::LineEnd => write!(formatter, "{LINE_END_GLYPH}"),
        }
    }
}

impl Preview for [PresentationUnit] {
    fn to_preview(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        for unit in self.iter() {
            unit.to_preview(formatter)?
        }
        Ok(())
    }
}

impl Preview for Vec<Vec<PresentationUnit>> {
    fn to_preview(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        for (idx, line) in self.iter().enumerate() {
            if idx > 0 {
                formatter.write_str("\n")?;
            }
            line.as_slice().to_preview(formatter)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview_to_string;
    use bgr_markup_parser::tokenize;
    use proptest::prelude::*;

    fn render_line(line: &str, options: RenderOptions) -> Vec<PresentationUnit> {
        render(&tokenize(line), &options, &RenderTables::default())
    }

    fn key_cap_label(units: &[PresentationUnit]) -> Option<&str> {
        units.iter().find_map(|x| match x {
            PresentationUnit::KeyCap { label, .. } => Some(label.as_str()),
            _ => None,
        })
    }

    #[test]
    fn test_icon_label() {
        let units = render_line(
            r#"<Icon KeyAction="WeaponSkill_Slot_Smite"/>"#,
            RenderOptions::default(),
        );
        assert_eq!(key_cap_label(&units), Some("X"));

        let units = render_line(r#"<Icon KeyAction="Unknown_Slot"/>"#, RenderOptions::default());
        assert_eq!(key_cap_label(&units), Some("?"));
    }

    #[test]
    fn test_plain_line_preview_is_identity() {
        let line = "Press the button, then wait 3 seconds.";
        let units = render_line(line, RenderOptions::default());
        assert_eq!(preview_to_string(units.as_slice()), line);
    }

    #[test]
    fn test_style_stack_applies_to_text() {
        let units = render_line(
            r#"a<FontStyle name="Bold">b<FontStyle name="Red">c</FontStyle>d</FontStyle>e"#,
            RenderOptions::default(),
        );
        let styles = units
            .iter()
            .map(|x| match x {
                PresentationUnit::Text { text, style, .. } => {
                    (text.as_str(), style.bold, style.color.clone())
                }
                _ => ("", false, None),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            styles,
            vec![
                ("a", false, None),
                ("b", true, None),
                ("c", true, Some("#FF0000".to_string())),
                ("d", true, None),
                ("e", false, None),
            ]
        );
    }

    #[test]
    fn test_style_stack_is_per_line() {
        let lines = render_document(
            "<FontStyle name=\"Bold\">a\nb",
            &RenderOptions::default(),
            &RenderTables::default(),
        );
        match &lines[1][0] {
            PresentationUnit::Text { style, .. } => assert!(style.is_plain()),
            other => panic!("unexpected unit {other:?}"),
        }
    }

    #[test]
    fn test_color_span() {
        let units = render_line(r##"<span color="#A0B0C0">x</>y"##, RenderOptions::default());
        assert_eq!(units.len(), 2);
        match (&units[0], &units[1]) {
            (
                PresentationUnit::Text { style: first, .. },
                PresentationUnit::Text { style: second, .. },
            ) => {
                assert_eq!(first.color.as_deref(), Some("#A0B0C0"));
                assert_eq!(second.color, None);
            }
            other => panic!("unexpected units {other:?}"),
        }
    }

    #[test]
    fn test_badges_and_placeholders() {
        let units = render_line(
            r#"<param Name="count"/><alias Name="npc"/><cms Name="quest"/><param/><PlayerName/>"#,
            RenderOptions::default(),
        );
        assert_eq!(preview_to_string(units.as_slice()), "{count}[npc]\"quest\"?Player");
    }

    #[test]
    fn test_date_codes() {
        let units = render_line("%Y/%m/%d %H:%M", RenderOptions::default());
        assert_eq!(preview_to_string(units.as_slice()), "2025/05/01 12:30");
    }

    #[test]
    fn test_hidden_chars() {
        let options = RenderOptions {
            show_hidden_chars: true,
            ..RenderOptions::default()
        };
        let units = render_line("a b\tc\r", options);
        assert_eq!(preview_to_string(units.as_slice()), "a·b→c␍");
    }

    #[test]
    fn test_width_rule_per_char() {
        let options = RenderOptions {
            show_char_width_rule: true,
            ..RenderOptions::default()
        };
        let units = render_line("a1。", options);
        let classes = units
            .iter()
            .map(|x| match x {
                PresentationUnit::Text { width, .. } => *width,
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            classes,
            vec![
                Some(WidthClass::Plain),
                Some(WidthClass::HalfWidthDigit),
                Some(WidthClass::FullWidthPunctuation),
            ]
        );
    }

    #[test]
    fn test_width_rule_tooltips() {
        let options = RenderOptions {
            show_char_width_rule: true,
            ..RenderOptions::default()
        };
        let units = render_line("a1。+", options);
        let marks = units
            .iter()
            .map(|x| match x {
                PresentationUnit::Text {
                    highlight, tooltip, ..
                } => (*highlight, *tooltip),
                _ => (false, None),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            marks,
            vec![
                (false, None),
                (true, Some("half-width digit")),
                (true, Some("full-width punctuation")),
                (true, Some("half-width symbol")),
            ]
        );

        let units = render_line("1", RenderOptions::default());
        assert_eq!(
            units,
            vec![PresentationUnit::Text {
                text: "1".to_string(),
                style: TextStyle::default(),
                width: None,
                highlight: false,
                tooltip: None,
            }]
        );
    }

    #[test]
    fn test_line_breaks() {
        let options = RenderOptions {
            show_line_breaks: true,
            ..RenderOptions::default()
        };
        let lines = render_document("a\nb", &options, &RenderTables::default());
        assert_eq!(lines[0].last(), Some(&PresentationUnit::LineEnd));
        assert_ne!(lines[1].last(), Some(&PresentationUnit::LineEnd));
        assert_eq!(preview_to_string(&lines), "a↵\nb");
    }

    #[test]
    fn test_unknown_markup_verbatim() {
        let units = render_line("<b>x</b> <0A1B2C3D> \\n", RenderOptions::default());
        assert_eq!(preview_to_string(units.as_slice()), "<b>x</b> <0A1B2C3D> \n");
    }

    proptest! {
        #[test]
        fn plain_lines_render_to_themselves(line in "[^<%\\\\\n]{0,48}") {
            let units = render_line(&line, RenderOptions::default());
            prop_assert_eq!(preview_to_string(units.as_slice()), line);
        }
    }

    #[test]
    fn test_lone_specials_render_to_themselves() {
        for line in ["a < b 100% c\\d", "<", "%", "\\", "50%off", "x<y", "\\t%S"] {
            let units = render_line(line, RenderOptions::default());
            assert_eq!(preview_to_string(units.as_slice()), line);
        }
    }
}
