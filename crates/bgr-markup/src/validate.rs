use crate::profile::GameProfile;
use bgr_markup_parser::{tokenize_document, TagFamily, Token};
use bgr_types::Diagnostic;
use tracing::debug;

/// Switches for structural validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Also balance `<span color="#HEX">` against `</>`.
    pub check_color_spans: bool,
}

impl From<GameProfile> for ValidateOptions {
    fn from(profile: GameProfile) -> Self {
        Self {
            check_color_spans: profile.checks_color_spans(),
        }
    }
}

/// Check structural well-formedness of every line in `text`.
///
/// Each line is checked on its own:
///
/// 1. Paired families must have as many opening as closing tags on the line. Only counts are
///    compared, `</FontStyle><FontStyle name="Bold">` passes.
/// 2. Every tag of a self-closing family must end with `/>`.
///
/// Per line, balance findings come first, then unterminated tags in scan order.
pub fn validate(text: &str, options: &ValidateOptions) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];
    for (line_number, tokens) in tokenize_document(text) {
        validate_line(line_number, &tokens, options, &mut diagnostics);
    }
    debug!("validation found {} diagnostics", diagnostics.len());
    diagnostics
}

/// Validate one tokenized line, appending findings to `diagnostics`.
pub fn validate_line(
    line_number: usize,
    tokens: &[Token],
    options: &ValidateOptions,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut openers = vec![TagFamily::FontStyleOpen];
    if options.check_color_spans {
        openers.push(TagFamily::SpanColorOpen);
    }

    for open_family in openers {
        let Some(close_family) = open_family.partner() else {
            continue;
        };
        let open = count_family(tokens, open_family);
        let close = count_family(tokens, close_family);
        if open != close {
            diagnostics.push(Diagnostic::unbalanced_pair(
                line_number,
                open_family.name(),
                open,
                close,
            ));
        }
    }

    for tag in tokens
        .iter()
        .filter_map(Token::as_tag)
        .filter(|x| x.family.is_self_closing() && !x.is_self_terminated())
    {
        diagnostics.push(Diagnostic::unterminated(
            line_number,
            tag.family.name(),
            tag.raw.as_str(),
        ));
    }
}

fn count_family(tokens: &[Token], family: TagFamily) -> usize {
    tokens
        .iter()
        .filter(|x| x.family() == Some(family))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bgr_types::DiagnosticKind;

    fn check(text: &str) -> Vec<Diagnostic> {
        validate(text, &ValidateOptions::default())
    }

    #[test]
    fn test_unbalanced_font_style() {
        let diagnostics = check(r#"<FontStyle name="Bold">x"#);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::UnbalancedPair {
                family: "FontStyle".to_string(),
                open: 1,
                close: 0,
            }
        );
    }

    #[test]
    fn test_balanced_font_style() {
        assert!(check(r#"<FontStyle name="Bold">x</FontStyle>"#).is_empty());
    }

    #[test]
    fn test_wrong_nesting_order_passes() {
        // Count-only check: a close before its open is an accepted false negative.
        assert!(check(r#"</FontStyle>x<FontStyle name="Bold">"#).is_empty());
    }

    #[test]
    fn test_balance_is_per_line() {
        let diagnostics = check("<FontStyle name=\"Bold\">x\ny</FontStyle>");
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].line, 1);
        assert_eq!(diagnostics[1].line, 2);
    }

    #[test]
    fn test_unterminated_icon() {
        let diagnostics = check(r#"<Icon KeyAction="X">"#);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].tag.as_deref(), Some(r#"<Icon KeyAction="X">"#));
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::Unterminated {
                family: "Icon".to_string()
            }
        );
    }

    #[test]
    fn test_terminated_icon() {
        assert!(check(r#"<Icon KeyAction="X"/>"#).is_empty());
        assert!(check(r#"<Icon KeyAction="X" />"#).is_empty());
    }

    #[test]
    fn test_every_occurrence_reported() {
        let diagnostics = check(r#"<param Name="a"> and <param Name="a"> and <PlayerName>"#);
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[2].tag.as_deref(), Some("<PlayerName>"));
    }

    #[test]
    fn test_balance_before_unterminated() {
        let diagnostics = check(r#"<cms Name="q"><FontStyle name="Red">"#);
        assert_eq!(diagnostics.len(), 2);
        assert!(matches!(diagnostics[0].kind, DiagnosticKind::UnbalancedPair { .. }));
        assert!(matches!(diagnostics[1].kind, DiagnosticKind::Unterminated { .. }));
    }

    #[test]
    fn test_color_span_by_profile() {
        let text = r##"<span color="#FF0000">red"##;
        assert!(validate(text, &GameProfile::ArcheAge.into()).is_empty());

        let diagnostics = validate(text, &GameProfile::Mir4.into());
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].kind,
            DiagnosticKind::UnbalancedPair {
                family: "span".to_string(),
                open: 1,
                close: 0,
            }
        );
        assert!(validate(r##"<span color="#FF0000">red</>"##, &GameProfile::Mir4.into()).is_empty());
    }

    #[test]
    fn test_never_fails_on_junk() {
        assert!(check("").is_empty());
        assert!(check("<<<>>> < > %% \\").is_empty());
        assert!(check("plain text only").is_empty());
    }
}
