pub mod backend;
pub mod convert;
pub mod daily;
pub mod io;
pub mod models;
pub mod parsing;

// Re-export key types for easier usage
pub use convert::{Converter, Direction, convert_forest, convert_text, convert_tree};
pub use models::{outline::OutlineNode, page::Block, page::Page, table::FlatTable};
pub use parsing::{parse_markdown, parse_outline, serialize_markdown, serialize_outline};
