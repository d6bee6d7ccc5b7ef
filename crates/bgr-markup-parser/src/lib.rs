pub mod lexer;
pub mod tag;
pub mod token;

pub use lexer::{tokenize, tokenize_document};
pub use tag::{classify, extract_attributes, grammar, GrammarEntry, TagFamily};
pub use token::{concat_raw, Tag, Token};
