pub mod api;
pub mod arguments;
pub mod ast;
pub mod doc_tree;
pub mod error;
pub mod parser;
pub mod resolver;
pub mod utils;
mod serialization;

pub use api::{escape_markdown, CrefFormatter, FormatOptions, UNKNOWN_KIND_OF_MEMBER};
pub use ast::{Reference, ReferenceKind};
pub use parser::{parse, parse_strict, try_parse};
