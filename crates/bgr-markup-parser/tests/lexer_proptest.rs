//! Property-based tests for the line tokenizer.
//!
//! Tokenizing must be a lossless partition of the line for any input.

use bgr_markup_parser::{concat_raw, tokenize, Token};
use proptest::prelude::*;

/// Lines built from markup fragments, to hit tag boundaries more often than random text does.
fn markup_line() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        Just("<Icon KeyAction=\"WeaponSkill_Slot_Basic\"/>".to_string()),
        Just("<Icon KeyAction='X'>".to_string()),
        Just("<FontStyle name=\"Bold\">".to_string()),
        Just("</FontStyle>".to_string()),
        Just("<span color=\"#FF0000\">".to_string()),
        Just("</>".to_string()),
        Just("<PlayerName/>".to_string()),
        Just("%Y".to_string()),
        Just("\\n".to_string()),
        Just("<".to_string()),
        Just(">".to_string()),
        Just("%".to_string()),
        Just("\\".to_string()),
        "[a-z 、。0-9]{0,6}",
    ];
    prop::collection::vec(fragment, 0..12).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn round_trip_any_text(line in "[^\n]{0,64}") {
        prop_assert_eq!(concat_raw(&tokenize(&line)), line);
    }

    #[test]
    fn round_trip_markup(line in markup_line()) {
        prop_assert_eq!(concat_raw(&tokenize(&line)), line);
    }

    #[test]
    fn no_adjacent_text_tokens(line in markup_line()) {
        let tokens = tokenize(&line);
        let adjacent = tokens
            .windows(2)
            .any(|pair| matches!(pair, [Token::Text(_), Token::Text(_)]));
        prop_assert!(!adjacent);
    }
}
