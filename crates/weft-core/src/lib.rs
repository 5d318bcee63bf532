//! Shared foundation for the WEFT pipeline tools.
//!
//! - [`error`] -- the pipeline-wide error type
//! - [`lines`] -- codepoint-oriented line reading and writing (UTF-8, BOM,
//!   LF/CRLF handling)
//! - [`charclass`] -- codepoint policy and Unicode classification predicates
//! - [`entities`] -- the HTML5 named-entity table

pub mod charclass;
pub mod entities;
pub mod error;
pub mod lines;

pub use error::WeftError;
