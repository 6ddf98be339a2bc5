//! Token-level annotation helpers.
//!
//! These are the leaf collaborators of the converter: reading attributes out
//! of an SSF feature structure (`<fs af='..' drel='..' name='..'>`), mapping
//! source POS tags to the Universal POS set, and turning the `af` bundle into
//! a lemma and a small feature list.
//!
//! All lookup tables are immutable statics built on first use.

#[path = "annotation/attrs.rs"]
mod attrs;
#[path = "annotation/morph.rs"]
mod morph;
#[path = "annotation/pos.rs"]
mod pos;

pub use attrs::extract_attribute;
pub use morph::{extract_features, extract_lemma};
pub use pos::map_pos;
