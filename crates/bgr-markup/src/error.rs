#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// Only self-closing families can be cross-checked between documents.
    #[error("{0:?} is not a self-closing tag family")]
    NotSelfClosing(String),

    /// Tag extraction pattern failed to compile.
    #[error("invalid tag extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("unknown game profile {0:?}")]
    UnknownProfile(String),
}
