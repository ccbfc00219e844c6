//! Path segments and the case conventions used to render them.
//!
//! A [`PathSegment`] is one slash-delimited element of a request path before
//! rendering. [`SegmentFormatter`] turns a segment name into its final form,
//! consulting the override table first and the [`SegmentFormat`] second.

mod format;
mod path_segment;

use std::collections::HashMap;

pub use format::{SegmentFormat, SegmentFormatter};
pub use path_segment::{PathSegment, SegmentValue};

/// Exact-match table from raw segment name to the literal string to emit.
pub type Overrides = HashMap<String, String>;
