//! HTML querying over rendered pages
//!
//! Pages are parsed with `scraper` and searched by tag name plus exact class signature, which is
//! how the registry site's cards and tables are told apart.

pub mod query;

pub use query::{ClassSignature, Document, descendants_by_tag, text_of};
