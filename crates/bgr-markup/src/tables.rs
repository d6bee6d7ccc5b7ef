use bgr_markup_parser::Tag;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label shown for anything that can not be resolved.
pub const UNRESOLVED: &str = "?";

/// Icon key lookup: `KeyAction` or `UIKeySpecificIconId` value to the key-cap label.
///
/// ```toml
/// [tables.icon_keys]
/// WeaponSkill_Slot_Basic = "Z"
/// "101" = "Z"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconKeyTable(HashMap<String, String>);

impl Default for IconKeyTable {
    fn default() -> Self {
        let entries = [
            ("WeaponSkill_Slot_Basic", "Z"),
            ("WeaponSkill_Slot_Smite", "X"),
            ("WeaponSkill_Slot_Dodge", "C"),
            ("WeaponSkill_Slot_Defence", "V"),
            ("101", "Z"),
            ("103", "X"),
        ];
        Self(
            entries
                .into_iter()
                .map(|(key, label)| (key.to_string(), label.to_string()))
                .collect(),
        )
    }
}

impl IconKeyTable {
    pub fn label(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Resolve the key-cap label of an `Icon` tag.
    ///
    /// `KeyAction` is preferred, `UIKeySpecificIconId` is only consulted when there is no
    /// `KeyAction` at all. An unknown `KeyAction` does not fall back to the icon id.
    pub fn resolve(&self, tag: &Tag) -> &str {
        let key = tag
            .attr("KeyAction")
            .or_else(|| tag.attr("UIKeySpecificIconId"));
        key.and_then(|x| self.label(x)).unwrap_or(UNRESOLVED)
    }
}

/// Sample date used to preview date codes.
///
/// Not a clock, the same sample is shown every time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTable {
    pub sample: NaiveDateTime,
}

impl Default for DateTable {
    fn default() -> Self {
        let sample = NaiveDate::from_ymd_opt(2025, 5, 1)
            .and_then(|x| x.and_hms_opt(12, 30, 0))
            .unwrap_or_default();
        Self { sample }
    }
}

impl DateTable {
    /// Substitution for one of `%Y`, `%m`, `%d`, `%H` or `%M`.
    pub fn substitute(&self, code: &str) -> Option<String> {
        match code {
            "%Y" | "%m" | "%d" | "%H" | "%M" => Some(self.sample.format(code).to_string()),
            _ => None,
        }
    }
}

/// All lookup data the renderer needs.
///
/// Loaded once at start-up, any missing part falls back to the built-in defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderTables {
    pub icon_keys: IconKeyTable,

    pub dates: DateTable,

    /// Stands in for the runtime player name.
    pub player_name: String,
}

impl Default for RenderTables {
    fn default() -> Self {
        Self {
            icon_keys: IconKeyTable::default(),
            dates: DateTable::default(),
            player_name: String::from("Player"),
        }
    }
}
