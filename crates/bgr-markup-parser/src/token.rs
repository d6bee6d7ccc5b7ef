use crate::tag::{extract_attributes, is_self_terminated, TagFamily};
use std::collections::BTreeMap;

/// All types of tokens.
///
/// Tokens are units of one line of marked-up text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Plain text.
    Text(String),

    /// Tag, placeholder or escape code.
    Tag(Tag),
}

impl Token {
    /// The original text this token was scanned from.
    pub fn raw(&self) -> &str {
        match self {
            Token::Text(v) => v.as_str(),
            Token::Tag(v) => v.raw.as_str(),
        }
    }

    /// Family of the token, `None` for plain text.
    pub fn family(&self) -> Option<TagFamily> {
        match self {
            Token::Text(_) => None,
            Token::Tag(v) => Some(v.family),
        }
    }

    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Token::Text(_) => None,
            Token::Tag(v) => Some(v),
        }
    }
}

/// A classified tag.
///
/// `<Icon KeyAction="WeaponSkill_Slot_Basic"/>`, `</FontStyle>`, `%Y` ...
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    /// Raw tag text, exactly as in the line.
    pub raw: String,

    pub family: TagFamily,

    /// Attributes, empty for families that do not carry any.
    pub attributes: BTreeMap<String, String>,

    /// Closing half of a paired family.
    pub closing: bool,
}

impl Tag {
    pub fn new(raw: impl Into<String>, family: TagFamily) -> Self {
        let raw = raw.into();
        let attributes = if family.has_attributes() {
            extract_attributes(raw.as_str())
        } else {
            BTreeMap::new()
        };
        Self {
            raw,
            family,
            attributes,
            closing: family.is_closing(),
        }
    }

    /// Get the attribute, if any.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Ends with `/>`.
    pub fn is_self_terminated(&self) -> bool {
        is_self_terminated(self.raw.as_str())
    }
}

/// Concatenate raw text of tokens, the inverse of tokenizing.
pub fn concat_raw(tokens: &[Token]) -> String {
    tokens.iter().map(Token::raw).collect()
}
