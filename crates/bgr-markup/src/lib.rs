use std::fmt;
use std::fmt::Formatter;

pub mod check;
pub mod compare;
mod error;
pub mod profile;
pub mod render;
pub mod stats;
pub mod style;
pub mod tables;
pub mod validate;
pub mod width;

pub use check::{check_documents, CheckOptions, Report};
pub use compare::{compare_icon_tags, FuzzyPolicy, TagComparator};
pub use error::MarkupError;
pub use profile::GameProfile;
pub use render::{render, render_document, PresentationUnit, RenderOptions};
pub use stats::count_stats;
pub use tables::RenderTables;
pub use validate::{validate, ValidateOptions};

/// Plain-text preview of rendered markup.
///
/// Key-caps are written as `[Z]`, badges and placeholders as their labels, styled text as-is.
pub trait Preview {
    fn to_preview(&self, formatter: &mut Formatter<'_>) -> fmt::Result;
}

struct PreviewWrapper<'a, T: ?Sized>(&'a T);

impl<'a, T: Preview + ?Sized> fmt::Display for PreviewWrapper<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.to_preview(f)
    }
}

pub fn preview_to_string<T: Preview + ?Sized>(value: &T) -> String {
    PreviewWrapper(value).to_string()
}
