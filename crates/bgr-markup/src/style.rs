use bgr_markup_parser::{Tag, TagFamily};
use bgr_markup_style::StyleName;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Scope {
    /// Opened by `<FontStyle name="...">`.
    Named(String),

    /// Opened by `<span color="#HEX">`.
    Color(String),
}

/// Combined style of all open scopes, applied to text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,

    /// Innermost color wins.
    pub color: Option<String>,

    /// Names of open `FontStyle` scopes, outermost first. Unknown names are kept here even
    /// though they change nothing else.
    pub styles: Vec<String>,
}

impl TextStyle {
    pub fn is_plain(&self) -> bool {
        self == &TextStyle::default()
    }
}

/// Stack of open style scopes within one line.
///
/// A closing tag pops the innermost scope of its own kind: `</FontStyle>` a named style and `</>`
/// a color. A close with nothing to pop is ignored, balance is the validator's business.
#[derive(Clone, Debug, Default)]
pub struct StyleStack {
    scopes: Vec<Scope>,
}

impl StyleStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_named(&mut self, name: impl Into<String>) {
        self.scopes.push(Scope::Named(name.into()));
    }

    pub fn push_color(&mut self, color: impl Into<String>) {
        self.scopes.push(Scope::Color(color.into()));
    }

    /// Pop the innermost named style, return false if there is none.
    pub fn pop_named(&mut self) -> bool {
        self.pop_where(|x| matches!(x, Scope::Named(_)))
    }

    /// Pop the innermost color scope, return false if there is none.
    pub fn pop_color(&mut self) -> bool {
        self.pop_where(|x| matches!(x, Scope::Color(_)))
    }

    fn pop_where(&mut self, pred: impl Fn(&Scope) -> bool) -> bool {
        match self.scopes.iter().rposition(pred) {
            Some(idx) => {
                self.scopes.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Feed a style tag, return false if the tag is not a style tag.
    pub fn apply(&mut self, tag: &Tag) -> bool {
        match tag.family {
            TagFamily::FontStyleOpen => {
                let name = tag.attr("name").or_else(|| tag.attr("Name")).unwrap_or_default();
                self.push_named(name);
            }
            TagFamily::FontStyleClose => {
                self.pop_named();
            }
            TagFamily::SpanColorOpen => {
                self.push_color(tag.attr("color").unwrap_or_default());
            }
            TagFamily::SpanClose => {
                self.pop_color();
            }
            _ => return false,
        }
        true
    }

    pub fn current(&self) -> TextStyle {
        let mut style = TextStyle::default();
        for scope in self.scopes.iter() {
            match scope {
                Scope::Named(name) => {
                    if let Some(effect) = StyleName::parse(name).map(|x| x.effect()) {
                        style.bold |= effect.bold;
                        style.italic |= effect.italic;
                        if let Some(color) = effect.color {
                            style.color = Some(color.to_string());
                        }
                    }
                    style.styles.push(name.clone());
                }
                Scope::Color(color) => style.color = Some(color.clone()),
            }
        }
        style
    }
}
