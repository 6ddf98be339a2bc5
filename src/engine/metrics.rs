//! Conversion run metrics, collected on every run.
//!
//! Stage durations are summed per sentence, so on a parallel run `parse`
//! and `resolve` may add up to more than `total`.

use super::anomaly::AnomalyCounts;
use super::{Sentence, StageTimes};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Wall time for the whole run.
    pub total: Duration,
    /// Splitting input into sentence blocks plus chunk-tree parsing.
    pub parse: Duration,
    /// Head and dependency resolution.
    pub resolve: Duration,
    /// Time spent serializing CoNLL-U.
    pub emit: Duration,
    pub sentences: usize,
    pub tokens: usize,
    pub chunks: usize,
    pub roots: usize,
    pub anomalies: AnomalyCounts,
}

impl RunMetrics {
    pub(crate) fn record_stages(&mut self, times: StageTimes) {
        self.parse += times.parse;
        self.resolve += times.resolve;
    }

    pub(crate) fn record(&mut self, sentence: &Sentence) {
        self.sentences += 1;
        self.tokens += sentence.tokens.len();
        self.chunks += sentence.chunks;
        self.roots += sentence.roots();
        self.anomalies.record(sentence.anomalies);
    }
}
