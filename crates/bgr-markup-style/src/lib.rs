use racros::AutoStr;

/// Named styles accepted in `<FontStyle name="...">`.
///
/// Names are PascalCase in markup, e.g. `<FontStyle name="Rare">`.
///
/// Unknown names are not an error in markup, they simply have no [StyleEffect].
#[derive(AutoStr, Clone, Copy, Debug, PartialEq, Eq)]
#[autorule = "PascalCase"]
pub enum StyleName {
    Bold,
    Italic,
    Red,
    Green,
    Yellow,
    /// Item grade "rare".
    Rare,
    /// Item grade "epic".
    Epic,
}

/// What a style does to the text inside it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleEffect {
    pub bold: bool,
    pub italic: bool,
    /// Css hex color.
    pub color: Option<&'static str>,
}

impl StyleName {
    /// Parse a style name from markup, `None` if not a known name.
    pub fn parse(name: &str) -> Option<Self> {
        StyleName::try_from(name).ok()
    }

    pub fn effect(&self) -> StyleEffect {
        match self {
            StyleName::Bold => StyleEffect {
                bold: true,
                ..StyleEffect::default()
            },
            StyleName::Italic => StyleEffect {
                italic: true,
                ..StyleEffect::default()
            },
            StyleName::Red => StyleEffect::colored("#FF0000"),
            StyleName::Green => StyleEffect::colored("#3CB043"),
            StyleName::Yellow => StyleEffect::colored("#FFD700"),
            StyleName::Rare => StyleEffect::colored("#3C8CFF"),
            StyleName::Epic => StyleEffect::colored("#B45AFF"),
        }
    }
}

impl StyleEffect {
    fn colored(color: &'static str) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }
}
