use serde::Serialize;

const FULL_WIDTH_PUNCTUATIONS: &str = "、。！？：；「」『』【】";

const HALF_WIDTH_BRACKETS: &str = "[](){}〈〉《》〔〕";

/// Character width rule class.
///
/// Classification is per character, a run of text is never classified as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidthClass {
    FullWidthPunctuation,
    HalfWidthDigit,
    HalfWidthBracket,
    /// `+` and `-`.
    HalfWidthSymbol,
    Plain,
}

impl WidthClass {
    pub fn classify(ch: char) -> Self {
        if FULL_WIDTH_PUNCTUATIONS.contains(ch) {
            WidthClass::FullWidthPunctuation
        } else if ch.is_ascii_digit() {
            WidthClass::HalfWidthDigit
        } else if HALF_WIDTH_BRACKETS.contains(ch) {
            WidthClass::HalfWidthBracket
        } else if ch == '+' || ch == '-' {
            WidthClass::HalfWidthSymbol
        } else {
            WidthClass::Plain
        }
    }

    /// Tooltip shown on highlighted characters.
    pub fn tooltip(&self) -> Option<&'static str> {
        match self {
            WidthClass::FullWidthPunctuation => Some("full-width punctuation"),
            WidthClass::HalfWidthDigit => Some("half-width digit"),
            WidthClass::HalfWidthBracket => Some("half-width bracket"),
            WidthClass::HalfWidthSymbol => Some("half-width symbol"),
            WidthClass::Plain => None,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        !matches!(self, WidthClass::Plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(WidthClass::classify('。'), WidthClass::FullWidthPunctuation);
        assert_eq!(WidthClass::classify('【'), WidthClass::FullWidthPunctuation);
        assert_eq!(WidthClass::classify('7'), WidthClass::HalfWidthDigit);
        assert_eq!(WidthClass::classify('７'), WidthClass::Plain);
        assert_eq!(WidthClass::classify('('), WidthClass::HalfWidthBracket);
        assert_eq!(WidthClass::classify('《'), WidthClass::HalfWidthBracket);
        assert_eq!(WidthClass::classify('-'), WidthClass::HalfWidthSymbol);
        assert_eq!(WidthClass::classify('a'), WidthClass::Plain);
    }

    #[test]
    fn test_tooltip() {
        assert_eq!(WidthClass::HalfWidthDigit.tooltip(), Some("half-width digit"));
        assert_eq!(WidthClass::Plain.tooltip(), None);
        assert!(!WidthClass::Plain.is_highlighted());
    }
}
