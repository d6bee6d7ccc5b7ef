use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::ops::{Add, AddAssign};

const STAT_FAMILY_COUNT: usize = 11;

/// Families counted in tag statistics.
///
/// The order of [StatFamily::ALL] is the order shown to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatFamily {
    Icon,
    Param,
    Alias,
    PlayerName,
    Cms,
    FontStyleOpen,
    FontStyleClose,
    SpanColorOpen,
    SpanClose,

    /// Curly brace placeholders like `{0}`.
    CurlyPlaceholder,

    /// Bracket references of exactly 8 hex digits like `<1A2B3C4D>`.
    HexRef,
}

impl StatFamily {
    pub const ALL: [StatFamily; STAT_FAMILY_COUNT] = [
        StatFamily::Icon,
        StatFamily::Param,
        StatFamily::Alias,
        StatFamily::PlayerName,
        StatFamily::Cms,
        StatFamily::FontStyleOpen,
        StatFamily::FontStyleClose,
        StatFamily::SpanColorOpen,
        StatFamily::SpanClose,
        StatFamily::CurlyPlaceholder,
        StatFamily::HexRef,
    ];

    /// Display name, spelled the way the markup spells it.
    pub fn label(&self) -> &'static str {
        match self {
            StatFamily::Icon => "Icon",
            StatFamily::Param => "param",
            StatFamily::Alias => "alias",
            StatFamily::PlayerName => "PlayerName",
            StatFamily::Cms => "cms",
            StatFamily::FontStyleOpen => "FontStyle",
            StatFamily::FontStyleClose => "/FontStyle",
            StatFamily::SpanColorOpen => "span",
            StatFamily::SpanClose => "</>",
            StatFamily::CurlyPlaceholder => "{N}",
            StatFamily::HexRef => "<XXXXXXXX>",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Occurrence count per [StatFamily] in one document.
///
/// Display only, the counts carry no validation meaning.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagStats {
    counts: [usize; STAT_FAMILY_COUNT],
}

impl TagStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `family`.
    pub fn record(&mut self, family: StatFamily) {
        self.counts[family.index()] += 1;
    }

    pub fn record_n(&mut self, family: StatFamily, n: usize) {
        self.counts[family.index()] += n;
    }

    pub fn get(&self, family: StatFamily) -> usize {
        self.counts[family.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Iterate all families with their counts, including zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (StatFamily, usize)> + '_ {
        StatFamily::ALL
            .into_iter()
            .map(move |family| (family, self.get(family)))
    }
}

impl AddAssign<&TagStats> for TagStats {
    fn add_assign(&mut self, rhs: &TagStats) {
        for (lhs, rhs) in self.counts.iter_mut().zip(rhs.counts.iter()) {
            *lhs += rhs;
        }
    }
}

impl Add for TagStats {
    type Output = TagStats;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

impl Serialize for TagStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (family, count) in self.iter() {
            map.serialize_entry(family.label(), &count)?;
        }
        map.end()
    }
}
