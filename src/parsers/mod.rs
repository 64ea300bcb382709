//! Streaming HTML scanning and metadata extraction.
//!
//! The scanner turns bytes into tokens on demand and the metadata pass
//! consumes them in a single forward sweep. Neither builds a document tree.

pub mod entities;
pub mod metadata;
pub mod scanner;

#[cfg(test)]
mod tests;

pub use metadata::{extract_metadata, extract_metadata_from_str};
pub use scanner::{Scanner, StartTag, Token};
