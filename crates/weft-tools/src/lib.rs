//! Sources, filters, and targets of the WEFT pipeline.
//!
//! Sources turn raw text or markup into WEFTs; filters transform only
//! the content words of a WEFT and emit WEFT again; targets unpack a
//! WEFT into plain output. Downstream stages never see the original
//! file format -- only the per-line (skip, word) tuples.
//!
//! - [`plain`] -- plain-text source
//! - [`markup`] -- markup-aware source (state machine + entity rewriting)
//! - [`splitter`] -- linguistic/non-linguistic word splitter
//! - [`hyphenator`] -- cache, specialized list, TeX patterns, word-list export
//! - [`woof`] -- escape-table translator
//! - [`unpack`] -- unpack and JSON diagnostic targets
//! - [`pipeline`] -- the reader-to-writer filter drivers

pub mod hyphenator;
pub mod markup;
pub mod pipeline;
pub mod plain;
pub mod splitter;
pub mod unpack;
pub mod woof;
