use crate::error::MarkupError;
use racros::AutoStr;
use std::str::FromStr;

/// Games with their own markup grammar profile.
///
/// The profile only switches checks on or off, the tag grammar itself is shared.
#[derive(AutoStr, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameProfile {
    ArcheAge,

    /// Uses `<span color="#HEX">...</>` color spans on top of `FontStyle`.
    Mir4,
}

impl GameProfile {
    pub const ALL: [GameProfile; 2] = [GameProfile::ArcheAge, GameProfile::Mir4];

    /// Whether color span open/close counts are validated.
    pub fn checks_color_spans(&self) -> bool {
        matches!(self, GameProfile::Mir4)
    }
}

impl Default for GameProfile {
    fn default() -> Self {
        GameProfile::ArcheAge
    }
}

impl FromStr for GameProfile {
    type Err = MarkupError;

    /// Case-insensitive, so both "MIR4" and "mir4" select [GameProfile::Mir4].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|x| x.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MarkupError::UnknownProfile(s.to_string()))
    }
}
