use crate::compare::TagComparator;
use crate::profile::GameProfile;
use crate::stats::count_stats;
use crate::validate::{validate, ValidateOptions};
use bgr_types::{Diagnostic, TagStats};
use serde::Serialize;
use tracing::debug;

/// Everything one validation pass over a source/target pair needs.
#[derive(Clone, Debug)]
pub struct CheckOptions {
    pub profile: GameProfile,

    /// Cross-document comparators, run in order.
    pub comparators: Vec<TagComparator>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            profile: GameProfile::default(),
            comparators: vec![TagComparator::icon()],
        }
    }
}

/// Result of one validation pass.
#[derive(Clone, Debug, Serialize)]
pub struct Report {
    /// Structural findings in the source document.
    pub source: Vec<Diagnostic>,

    /// Structural findings in the target, then tags missing from it.
    pub target: Vec<Diagnostic>,

    pub source_stats: TagStats,

    pub target_stats: TagStats,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.source.is_empty() && self.target.is_empty()
    }
}

/// Run every check on a source/target pair.
///
/// Cheap enough to re-run in full on every edit, nothing is cached between passes.
pub fn check_documents(source: &str, target: &str, options: &CheckOptions) -> Report {
    let validate_options = ValidateOptions::from(options.profile);

    let source_diagnostics = validate(source, &validate_options);
    let mut target_diagnostics = validate(target, &validate_options);
    for comparator in options.comparators.iter() {
        target_diagnostics.append(&mut comparator.compare(source, target));
    }

    debug!(
        "check done: {} source diagnostics, {} target diagnostics",
        source_diagnostics.len(),
        target_diagnostics.len()
    );

    Report {
        source: source_diagnostics,
        target: target_diagnostics,
        source_stats: count_stats(source),
        target_stats: count_stats(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::FuzzyPolicy;
    use bgr_types::{DiagnosticKind, StatFamily};

    #[test]
    fn test_clean_pair() {
        let source = r#"Press <Icon KeyAction="WeaponSkill_Slot_Dodge"/> to dodge."#;
        let target = r#"<Icon KeyAction="WeaponSkill_Slot_Dodge"/> 키를 눌러 회피하세요."#;
        let report = check_documents(source, target, &CheckOptions::default());
        assert!(report.is_clean());
        assert_eq!(report.source_stats.get(StatFamily::Icon), 1);
        assert_eq!(report.target_stats.get(StatFamily::Icon), 1);
    }

    #[test]
    fn test_target_collects_structure_then_missing() {
        let source = r#"<Icon KeyAction="A"/>"#;
        let target = r#"<Icon KeyAction="A">"#;
        let report = check_documents(source, target, &CheckOptions::default());
        assert!(report.source.is_empty());
        assert_eq!(report.target.len(), 2);
        assert!(matches!(report.target[0].kind, DiagnosticKind::Unterminated { .. }));
        assert!(matches!(report.target[1].kind, DiagnosticKind::MissingInTarget { .. }));
    }

    #[test]
    fn test_fuzzy_comparator_and_profile() {
        let options = CheckOptions {
            profile: GameProfile::Mir4,
            comparators: vec![TagComparator::icon().with_policy(FuzzyPolicy::TruncatedSuffix)],
        };
        let source = r##"<Icon KeyAction="A"/><span color="#FFFFFF">x</>"##;
        let target = r##"<Icon KeyAction="A"><span color="#FFFFFF">x"##;
        let report = check_documents(source, target, &options);
        let kinds = report.target.iter().map(|x| &x.kind).collect::<Vec<_>>();
        assert_eq!(kinds.len(), 2);
        assert!(matches!(kinds[0], DiagnosticKind::UnbalancedPair { .. }));
        assert!(matches!(kinds[1], DiagnosticKind::Unterminated { .. }));
    }
}
