//! SSF → CoNLL-U treebank conversion.
//!
//! Shakti Standard Format (SSF) sentences describe a two-level structure:
//! bracketed *chunks* nest terminal word tokens, and each chunk or token may
//! carry a `drel='label:ParentChunk'` attribute naming the chunk it depends
//! on. This crate flattens that structure into one token-level dependency
//! tree per sentence and serializes it as CoNLL-U.
//!
//! ```text
//! text ── split_sentences ──▶ SentenceBlock ── parse_sentence ──▶ (tokens, registry)
//!                                                                     │
//!                       resolve_heads (rightmost member is head) ◀────┘
//!                                   │
//!                       resolve_dependencies (drel → head id) ──▶ emit_sentence
//! ```
//!
//! Most callers only need [`convert_str`] or [`convert_file`].

use once_cell::sync::Lazy;

#[macro_use]
mod macros;
mod annotation;
mod api;
mod batch;
mod conllu;
mod engine;
mod error;
mod verify;

pub use annotation::{extract_attribute, extract_features, extract_lemma, map_pos};
pub use api::{ConvertResult, Options, convert_file, convert_reader, convert_str};
pub use batch::{BatchConfig, BatchReport, FileFailure, SUPPORTED_SUFFIXES, batch_convert};
pub use conllu::{ConlluRow, ConlluSentence, emit_sentence, read_conllu};
pub use engine::{
    Anomalies, AnomalyCounts, ChunkRegistry, ChunkTreeParser, HeadMap, ParsedSentence, RunMetrics, Sentence, SentenceBlock,
    parse_sentence, parse_sentence_with, project_chunk_drels, resolve_dependencies, resolve_heads, split_sentences,
};
pub use error::{Error, Result};
pub use verify::{Verification, verify_files, verify_str};

/// Sentence-local token id. Ids are dense and start at 1; 0 is the root.
pub type TokenId = u32;

/// Relation label used when a token is not governed by any other token.
pub const ROOT_LABEL: &str = "root";

/// Relation label used when a drel names a parent chunk but no label.
pub const FALLBACK_LABEL: &str = "dep";

static DEBUG: Lazy<bool> = Lazy::new(|| std::env::var_os("SSFCONV_DEBUG").is_some());

#[doc(hidden)]
pub fn debug_enabled() -> bool {
    *DEBUG
}

// --- Core data model ---------------------------------------------------------

/// A `drel` attribute split into its relation label and parent chunk name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrelTarget {
    /// Relation label, e.g. `k1`. `None` when the attribute reads `:Parent`.
    pub label: Option<String>,
    /// Name of the governing chunk, e.g. `VGF`.
    pub parent: String,
}

impl DrelTarget {
    /// Split a raw `label:Parent` value.
    ///
    /// Values without a `:` or with an empty parent carry no target.
    ///
    /// ```
    /// use ssfconv::DrelTarget;
    ///
    /// let t = DrelTarget::parse("k1:VGF").unwrap();
    /// assert_eq!(t.label.as_deref(), Some("k1"));
    /// assert_eq!(t.parent, "VGF");
    /// assert!(DrelTarget::parse("k1").is_none());
    /// ```
    pub fn parse(drel: &str) -> Option<Self> {
        let mut fields = drel.split(':');
        let label = fields.next()?;
        let parent = fields.next()?;
        if parent.is_empty() {
            return None;
        }

        let label = (!label.is_empty()).then(|| label.to_string());
        Some(DrelTarget { label, parent: parent.to_string() })
    }
}

/// One terminal word of a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub form: String,
    pub lemma: String,
    /// Universal POS category derived from `xpos`.
    pub upos: String,
    /// Source tag, kept verbatim.
    pub xpos: String,
    /// `|`-joined `Key=Value` pairs, or `_`.
    pub feats: String,
    /// Governing token id; 0 for a root. Unset (0) until resolution.
    pub head: TokenId,
    /// Relation label; `root` iff `head == 0`. Empty until resolution.
    pub deprel: String,
    /// Own `name=` attribute, else the innermost open chunk at read time.
    pub chunk_name: Option<String>,
    /// The token's own `drel`, if it declared one.
    pub drel: Option<DrelTarget>,
}

impl Token {
    pub fn is_root(&self) -> bool {
        self.head == 0
    }
}

/// A bracketed syntactic group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    pub name: String,
    pub drel: Option<DrelTarget>,
    /// Member token ids in read order, including tokens of closed sub-chunks.
    pub members: Vec<TokenId>,
    /// Set by [`resolve_heads`]; `None` for chunks without members.
    pub head: Option<TokenId>,
}

impl Chunk {
    pub fn new(name: impl Into<String>, drel: Option<DrelTarget>) -> Self {
        Chunk { name: name.into(), drel, members: Vec::new(), head: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drel_split_cases() {
        let cases: Vec<(&str, Option<(Option<&str>, &str)>)> = vec![
            ("k1:VGF", Some((Some("k1"), "VGF"))),
            ("k7p:NP2", Some((Some("k7p"), "NP2"))),
            (":VGF", Some((None, "VGF"))),
            ("a:b:c", Some((Some("a"), "b"))),
            ("k1:", None),
            ("k1", None),
            ("", None),
        ];

        for (raw, expected) in cases {
            let got = DrelTarget::parse(raw);
            let got = got.as_ref().map(|t| (t.label.as_deref(), t.parent.as_str()));
            assert_eq!(got, expected, "drel {raw:?}");
        }
    }
}
