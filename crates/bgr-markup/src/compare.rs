use crate::error::MarkupError;
use bgr_markup_parser::{classify, TagFamily};
use bgr_types::{numbered_lines, Diagnostic};
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, trace};

/// What to do when a source tag has no exact copy in the target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FuzzyPolicy {
    /// Every missing exact copy is reported.
    #[default]
    Exact,

    /// Stay quiet when some target tag of the same family starts with the source tag minus its
    /// last two characters, treating it as the same tag truncated or broken near its end.
    ///
    /// This trades recall for less noise: a target tag that differs only in the trailing `/>`,
    /// or that has extra attributes appended, no longer counts as missing. The two-character cut
    /// has no deeper meaning than "the `/>` marker".
    TruncatedSuffix,
}

/// Cross-document matcher for one self-closing tag family.
///
/// Built from a tag extraction pattern, so any family can be checked the same way. Matches the
/// grammar table does not classify into the family are skipped, the same as the validator and
/// the stats counter skip them.
#[derive(Clone, Debug)]
pub struct TagComparator {
    family: TagFamily,

    /// Extract complete tags, including attributes and the `/>` marker.
    extract: Regex,

    /// Extract anything that looks like a tag of the family, terminated or not.
    ///
    /// Only used by [FuzzyPolicy::TruncatedSuffix].
    candidates: Regex,

    policy: FuzzyPolicy,
}

impl TagComparator {
    pub fn new(family: TagFamily, extract: Regex, candidates: Regex) -> Self {
        Self {
            family,
            extract,
            candidates,
            policy: FuzzyPolicy::default(),
        }
    }

    /// Build a comparator for a self-closing family by its markup name, e.g. `"Icon"`.
    ///
    /// # Errors
    ///
    /// When `name` is not a self-closing family.
    pub fn self_closing(name: &str) -> Result<Self, MarkupError> {
        let family = TagFamily::self_closing_by_name(name)
            .ok_or_else(|| MarkupError::NotSelfClosing(name.to_string()))?;
        let escaped = regex::escape(family.name());
        let extract = Regex::new(format!("<{escaped}[^>]*?/>").as_str())?;
        let candidates = Regex::new(format!("<{escaped}[^>]*>").as_str())?;
        Ok(Self::new(family, extract, candidates))
    }

    /// The comparator for `Icon` tags.
    pub fn icon() -> Self {
        Self::new(
            TagFamily::Icon,
            Regex::new(r"<Icon[^>]*?/>").expect("invalid icon tag regex"),
            Regex::new(r"<Icon[^>]*>").expect("invalid icon candidate regex"),
        )
    }

    pub fn with_policy(mut self, policy: FuzzyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Family name used in diagnostics.
    pub fn family(&self) -> &'static str {
        self.family.name()
    }

    pub fn policy(&self) -> FuzzyPolicy {
        self.policy
    }

    /// All complete tags in `text`, in document order, with their line numbers.
    pub fn extract<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (usize, &'t str)> + 't {
        numbered_lines(text).flat_map(move |(line_number, line)| {
            self.extract
                .find_iter(line)
                .map(|x| x.as_str())
                .filter(move |x| self.is_family(x))
                .map(move |x| (line_number, x))
        })
    }

    fn is_family(&self, raw: &str) -> bool {
        classify(raw) == self.family
    }

    /// Report every source tag that does not appear verbatim in `target`.
    ///
    /// Membership only: one target tag satisfies any number of identical source tags, and order
    /// does not matter. Diagnostics point at the source line of each occurrence.
    pub fn compare(&self, source: &str, target: &str) -> Vec<Diagnostic> {
        let target_tags = self
            .extract(target)
            .map(|(_, tag)| tag)
            .collect::<HashSet<_>>();
        let target_candidates = match self.policy {
            FuzzyPolicy::Exact => vec![],
            FuzzyPolicy::TruncatedSuffix => numbered_lines(target)
                .flat_map(|(_, line)| self.candidates.find_iter(line).map(|x| x.as_str()))
                .filter(|x| self.is_family(x))
                .collect::<Vec<_>>(),
        };

        let mut diagnostics = vec![];
        for (line_number, tag) in self.extract(source) {
            if target_tags.contains(tag) {
                continue;
            }
            if self.policy == FuzzyPolicy::TruncatedSuffix
                && is_near_miss(tag, target_candidates.as_slice())
            {
                trace!("line {line_number}: suppressed near miss {tag}");
                continue;
            }
            diagnostics.push(Diagnostic::missing_in_target(
                line_number,
                self.family(),
                tag,
            ));
        }

        debug!(
            "compared {} tags: {} missing in target",
            self.family(),
            diagnostics.len()
        );
        diagnostics
    }
}

/// Whether any candidate starts with `tag` minus its final two characters.
fn is_near_miss(tag: &str, candidates: &[&str]) -> bool {
    let Some((cut, _)) = tag.char_indices().rev().nth(1) else {
        return false;
    };
    let prefix = &tag[..cut];
    candidates.iter().any(|x| x.starts_with(prefix))
}

/// Check `Icon` tags of `source` against `target`.
pub fn compare_icon_tags(source: &str, target: &str, policy: FuzzyPolicy) -> Vec<Diagnostic> {
    TagComparator::icon().with_policy(policy).compare(source, target)
}
