//! The WEFT container format.
//!
//! A WEFT packages a *map* and the original *body* text: the map is an
//! ordered record sequence describing, per body line, where the content
//! words live. This crate provides:
//!
//! - [`record`] -- the map record type and its line codec
//! - [`format`] -- signature and declaration lines
//! - [`spill`] -- fill-rewind-drain temporary line buffers
//! - [`reader`] -- streaming decode into per-line (skip, word) tuples
//! - [`writer`] -- streaming re-encode of transformed tuples

pub mod format;
pub mod reader;
pub mod record;
pub mod spill;
pub mod writer;

pub use reader::WeftReader;
pub use writer::WeftWriter;
