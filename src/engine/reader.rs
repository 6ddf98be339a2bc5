//! Sentence block splitting.
//!
//! A document is a sequence of `<Sentence id='..'> ... </Sentence>` blocks.
//! Lines outside a block are ignored. Inside a block, every non-blank line is
//! kept (trimmed) for the chunk parser.

use crate::annotation::extract_attribute;

/// The raw lines of one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceBlock {
    /// `id` attribute of the opening marker, or the 1-based block ordinal.
    pub id: String,
    pub lines: Vec<String>,
    /// False when the input ended before `</Sentence>`.
    pub terminated: bool,
}

/// Line-driven block builder, shared by the in-memory and streaming readers.
#[derive(Debug, Default)]
pub(crate) struct BlockSplitter {
    current: Option<SentenceBlock>,
    opened: usize,
}

impl BlockSplitter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feed one line; returns a block when this line closes one.
    pub(crate) fn push_line(&mut self, line: &str) -> Option<SentenceBlock> {
        let line = line.trim();

        if self.current.is_none() {
            if line.starts_with("<Sentence") {
                self.opened += 1;
                let id = extract_attribute(line, "id").map_or_else(|| self.opened.to_string(), str::to_string);
                self.current = Some(SentenceBlock { id, lines: Vec::new(), terminated: false });
            }
            return None;
        }

        if line.starts_with("</Sentence") {
            let mut block = self.current.take()?;
            block.terminated = true;
            return Some(block);
        }

        if let Some(block) = self.current.as_mut().filter(|_| !line.is_empty()) {
            block.lines.push(line.to_string());
        }
        None
    }

    /// Flush a block left open at end of input.
    pub(crate) fn finish(self) -> Option<SentenceBlock> {
        self.current
    }
}

/// Split a whole document into sentence blocks.
///
/// ```
/// use ssfconv::split_sentences;
///
/// let doc = "<Sentence id='1'>\n1\t((\tNP\n\t))\n</Sentence>\n<Sentence id='2'>\n";
/// let blocks = split_sentences(doc);
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].lines, vec!["1\t((\tNP", "))"]);
/// assert!(!blocks[1].terminated);
/// ```
pub fn split_sentences(input: &str) -> Vec<SentenceBlock> {
    let mut splitter = BlockSplitter::new();
    let mut blocks: Vec<SentenceBlock> = input.lines().filter_map(|line| splitter.push_line(line)).collect();
    blocks.extend(splitter.finish());
    blocks
}
