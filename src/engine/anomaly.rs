//! Per-sentence structural anomaly flags.
//!
//! Recording a flag never changes conversion output; flags exist so callers
//! can count and report how much of a corpus fell back to defaults.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Anomalies: u16 {
        /// `))` with no open chunk.
        const UNMATCHED_CLOSE        = 1 << 0;
        /// Token line with fewer than four TAB fields.
        const SHORT_TOKEN_LINE       = 1 << 1;
        /// A chunk closed with no members.
        const EMPTY_CHUNK            = 1 << 2;
        /// A drel named a chunk that has no head in this sentence.
        const MISSING_TARGET         = 1 << 3;
        /// Chunks still open when the sentence ended.
        const UNCLOSED_CHUNK         = 1 << 4;
        /// Input ended before `</Sentence>`.
        const UNTERMINATED_SENTENCE  = 1 << 5;
        /// More than one token ended up as root.
        const MULTIPLE_ROOTS         = 1 << 6;
        /// A drel pointed at a chunk headed by the token itself.
        const SELF_REFERENCE         = 1 << 7;
        /// Tokens past the largest representable id were dropped.
        const TOKEN_LIMIT            = 1 << 8;
    }
}

/// How many sentences carried each flag.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnomalyCounts {
    /// Sentences with at least one flag.
    pub sentences: usize,
    counts: Vec<(Anomalies, usize)>,
}

impl AnomalyCounts {
    pub fn record(&mut self, flags: Anomalies) {
        if flags.is_empty() {
            return;
        }
        self.sentences += 1;

        for flag in flags.iter() {
            match self.counts.iter_mut().find(|(f, _)| *f == flag) {
                Some((_, n)) => *n += 1,
                None => self.counts.push((flag, 1)),
            }
        }
    }

    /// Add another run's counts into this one.
    pub fn merge(&mut self, other: &AnomalyCounts) {
        self.sentences += other.sentences;
        for &(flag, n) in &other.counts {
            match self.counts.iter_mut().find(|(f, _)| *f == flag) {
                Some((_, total)) => *total += n,
                None => self.counts.push((flag, n)),
            }
        }
    }

    pub fn get(&self, flag: Anomalies) -> usize {
        self.counts.iter().find(|(f, _)| *f == flag).map_or(0, |(_, n)| *n)
    }

    /// Flag names with counts, in bit order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        Anomalies::all().iter_names().filter_map(|(name, flag)| {
            let n = self.get(flag);
            (n > 0).then_some((name, n))
        })
    }
}
