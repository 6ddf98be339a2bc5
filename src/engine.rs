//! Conversion engine.
//!
//! One SSF sentence goes through four stages, each in its own submodule:
//!
//! ```text
//! input ── reader.rs ──▶ SentenceBlock { id, lines }
//!                              │
//!                              v
//!                     parser.rs: ChunkTreeParser
//!                       - stack of open chunks
//!                       - sequential token ids
//!                       - members propagate to parent on close
//!                              │
//!                              v
//!                     heads.rs: resolve_heads
//!                       - rightmost member is the chunk head
//!                              │
//!                              v
//!                     deps.rs: resolve_dependencies
//!                       - drel parent chunk → head token id
//!                       - otherwise root
//!                              │
//!                              v
//!                          Sentence
//! ```
//!
//! Nothing survives across a sentence boundary, so blocks can be converted
//! independently (and in parallel; see `api.rs`).
//!
//! Malformed structure never fails a sentence. Each oddity is recorded as an
//! [`Anomalies`] flag on the result and the affected piece falls back to a
//! local default (no-op pop, no head, root attachment).
//!
//! ## Debugging
//!
//! Set `SSFCONV_DEBUG=1` to print chunk and resolution traces to stderr.

#[path = "engine/anomaly.rs"]
mod anomaly;
#[path = "engine/deps.rs"]
mod deps;
#[path = "engine/heads.rs"]
mod heads;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/parser.rs"]
mod parser;
#[path = "engine/reader.rs"]
mod reader;


pub use anomaly::{Anomalies, AnomalyCounts};
pub use deps::{project_chunk_drels, resolve_dependencies};
pub use heads::{HeadMap, resolve_heads};
pub use metrics::RunMetrics;
pub use parser::{ChunkRegistry, ChunkTreeParser, ParsedSentence, parse_sentence, parse_sentence_with};
pub(crate) use reader::BlockSplitter;
pub use reader::{SentenceBlock, split_sentences};

use crate::{Options, Token};
use std::time::{Duration, Instant};

/// A fully resolved sentence, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub id: String,
    pub tokens: Vec<Token>,
    /// Number of chunks that closed and were registered.
    pub chunks: usize,
    pub anomalies: Anomalies,
}

impl Sentence {
    pub fn roots(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_root()).count()
    }
}

/// Wall time one block spent in each stage.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StageTimes {
    pub parse: Duration,
    pub resolve: Duration,
}

/// Run parse → heads → dependencies over one block.
#[cfg(test)]
pub(crate) fn convert_block(block: &SentenceBlock, options: &Options) -> Sentence {
    convert_block_timed(block, options).0
}

pub(crate) fn convert_block_timed(block: &SentenceBlock, options: &Options) -> (Sentence, StageTimes) {
    let t = Instant::now();
    let ParsedSentence { mut tokens, mut registry, mut anomalies } = parse_sentence_with(&block.lines, options);
    let parse = t.elapsed();

    let t = Instant::now();
    let heads = resolve_heads(&mut registry);
    if options.head_inherits_chunk_drel {
        project_chunk_drels(&mut tokens, &registry);
    }
    anomalies |= resolve_dependencies(&mut tokens, &heads);
    if !block.terminated {
        anomalies |= Anomalies::UNTERMINATED_SENTENCE;
    }

    trace!(
        "sentence",
        "id={} tokens={} chunks={} heads={} anomalies={:?}",
        block.id,
        tokens.len(),
        registry.len(),
        heads.len(),
        anomalies
    );

    let sentence = Sentence { id: block.id.clone(), tokens, chunks: registry.len(), anomalies };
    (sentence, StageTimes { parse, resolve: t.elapsed() })
}
