//! CoNLL-U serialization.
//!
//! Ten TAB-separated columns per token:
//!
//! ```text
//! ID  FORM  LEMMA  UPOS  XPOS  FEATS  HEAD  DEPREL  DEPS  MISC
//! ```
//!
//! `DEPS` and `MISC` are always `_`. A sentence block starts with a
//! `# sent_id = ..` comment and ends with one blank line.
//!
//! The reader half is deliberately loose: it is used to check converter
//! output, not to validate arbitrary treebanks.

use crate::Token;
use std::fmt::Write as _;

const EMPTY: &str = "_";

/// Serialize one sentence block, including the trailing blank line.
///
/// With `with_text`, a `# text = ..` comment (forms joined by spaces) follows
/// the `sent_id` line.
pub fn emit_sentence(id: &str, tokens: &[Token], with_text: bool) -> String {
    let mut out = String::with_capacity(32 + tokens.len() * 64);
    let _ = writeln!(out, "# sent_id = {id}");

    if with_text {
        let text: Vec<&str> = tokens.iter().map(|t| t.form.as_str()).collect();
        let _ = writeln!(out, "# text = {}", text.join(" "));
    }

    for t in tokens {
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{EMPTY}\t{EMPTY}",
            t.id, t.form, t.lemma, t.upos, t.xpos, t.feats, t.head, t.deprel
        );
    }

    out.push('\n');
    out
}

/// One ten-column token row, kept as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConlluRow {
    pub id: String,
    pub form: String,
    pub lemma: String,
    pub upos: String,
    pub xpos: String,
    pub feats: String,
    pub head: String,
    pub deprel: String,
    pub deps: String,
    pub misc: String,
}

impl ConlluRow {
    fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        let &[id, form, lemma, upos, xpos, feats, head, deprel, deps, misc] = fields.as_slice() else {
            return None;
        };

        Some(ConlluRow {
            id: id.to_string(),
            form: form.to_string(),
            lemma: lemma.to_string(),
            upos: upos.to_string(),
            xpos: xpos.to_string(),
            feats: feats.to_string(),
            head: head.to_string(),
            deprel: deprel.to_string(),
            deps: deps.to_string(),
            misc: misc.to_string(),
        })
    }

    /// True when every column agrees with `token` as emitted.
    pub fn matches(&self, token: &Token) -> bool {
        self.id == token.id.to_string()
            && self.form == token.form
            && self.lemma == token.lemma
            && self.upos == token.upos
            && self.xpos == token.xpos
            && self.feats == token.feats
            && self.head == token.head.to_string()
            && self.deprel == token.deprel
            && self.deps == EMPTY
            && self.misc == EMPTY
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConlluSentence {
    /// Value of the `# sent_id = ..` comment, if any.
    pub id: Option<String>,
    /// Comment lines without the leading `#`, trimmed.
    pub comments: Vec<String>,
    pub rows: Vec<ConlluRow>,
}

/// Read blank-line separated sentence blocks.
///
/// Lines that are neither comments nor exactly ten columns are ignored, and
/// blocks without any token row are dropped.
pub fn read_conllu(text: &str) -> Vec<ConlluSentence> {
    let mut sentences = Vec::new();
    let mut current = ConlluSentence::default();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.rows.is_empty() {
                sentences.push(std::mem::take(&mut current));
            } else {
                current = ConlluSentence::default();
            }
            continue;
        }

        if let Some(comment) = trimmed.strip_prefix('#') {
            let comment = comment.trim();
            if let Some(id) = comment.strip_prefix("sent_id").and_then(|rest| rest.trim_start().strip_prefix('=')) {
                current.id = Some(id.trim().to_string());
            }
            current.comments.push(comment.to_string());
            continue;
        }

        if let Some(row) = ConlluRow::parse(trimmed) {
            current.rows.push(row);
        }
    }

    if !current.rows.is_empty() {
        sentences.push(current);
    }
    sentences
}
