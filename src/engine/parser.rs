//! Chunk tree parser.
//!
//! Reads the lines of one sentence and produces the token list plus a
//! registry of closed chunks. Nesting is tracked with an explicit stack of
//! open chunks; the top of the stack is where new tokens are filed.
//!
//! Three line shapes matter, everything else is ignored:
//!
//! ```text
//! 1     ((  NP   <fs name='NP1' drel='k1:VGF'>     chunk open
//! 1.1   राम  NNP  <fs af='राम,n,m,sg,3,d,0,0'>       token (TAB separated)
//!       ))                                         chunk close
//! ```
//!
//! Positions may be dotted at any depth (`1.2`, `1.2.1`), so sub-chunks
//! opened inside a chunk are recognised as chunks rather than tokens.
//!
//! When a chunk closes, its members are appended to the chunk below it on
//! the stack, so an outer chunk ends up holding every token read while it
//! was open, in read order.

use super::anomaly::Anomalies;
use crate::annotation::{extract_attribute, extract_features, extract_lemma, map_pos};
use crate::{Chunk, DrelTarget, Options, Token, TokenId};
use std::collections::HashMap;

/// Closed chunks of one sentence, keyed by name.
pub type ChunkRegistry = HashMap<String, Chunk>;

/// Parser output: tokens with unresolved heads, and the closed chunks.
#[derive(Debug, Clone, Default)]
pub struct ParsedSentence {
    pub tokens: Vec<Token>,
    pub registry: ChunkRegistry,
    pub anomalies: Anomalies,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    ChunkOpen { name: &'a str, bundle: &'a str },
    ChunkClose,
    Token(Vec<&'a str>),
    Other,
}

fn classify(line: &str) -> Line<'_> {
    let line = line.trim();

    if line == "))" {
        return Line::ChunkClose;
    }

    let open = regex!(r"^\d+(?:\.\d+)*\s+\(\(\s*(\w+)\s*(<fs.*)$");
    if let Some(caps) = open.captures(line) {
        let (Some(name), Some(bundle)) = (caps.get(1), caps.get(2)) else {
            return Line::Other;
        };
        return Line::ChunkOpen { name: name.as_str(), bundle: bundle.as_str() };
    }

    if regex!(r"^\d+(?:\.\d+)+\s").is_match(line) {
        return Line::Token(line.split('\t').collect());
    }

    Line::Other
}

/// Stateful parser for a single sentence.
///
/// ```text
/// stack: [S, NP1]      <- NP1 is the insertion target
/// "))"  -> pop NP1, register it, S.members += NP1.members
/// stack: [S]
/// ```
#[derive(Debug, Default)]
pub struct ChunkTreeParser {
    tokens: Vec<Token>,
    registry: ChunkRegistry,
    stack: Vec<Chunk>,
    anomalies: Anomalies,
    /// Key chunks by their `name=` attribute instead of the bracket tag.
    name_from_attribute: bool,
}

impl ChunkTreeParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: &Options) -> Self {
        ChunkTreeParser { name_from_attribute: options.chunk_names_from_attribute, ..Self::default() }
    }

    /// Consume one line of the sentence.
    pub fn feed(&mut self, line: &str) {
        match classify(line) {
            Line::ChunkOpen { name, bundle } => self.open_chunk(name, bundle),
            Line::ChunkClose => self.close_chunk(),
            Line::Token(fields) => self.read_token(&fields),
            Line::Other => {}
        }
    }

    /// Finish the sentence. Chunks still open are dropped unregistered.
    pub fn finish(mut self) -> ParsedSentence {
        if !self.stack.is_empty() {
            trace!("parser", "unclosed chunks={:?}", self.stack.iter().map(|c| &c.name).collect::<Vec<_>>());
            self.anomalies |= Anomalies::UNCLOSED_CHUNK;
        }
        ParsedSentence { tokens: self.tokens, registry: self.registry, anomalies: self.anomalies }
    }

    fn open_chunk(&mut self, tag: &str, bundle: &str) {
        let name = if self.name_from_attribute { extract_attribute(bundle, "name").unwrap_or(tag) } else { tag };
        let drel = extract_attribute(bundle, "drel").and_then(DrelTarget::parse);
        trace!("parser", "open chunk={} depth={} drel={:?}", name, self.stack.len() + 1, drel);
        self.stack.push(Chunk::new(name, drel));
    }

    fn close_chunk(&mut self) {
        let Some(finished) = self.stack.pop() else {
            trace!("parser", "unmatched close after token={}", self.tokens.len());
            self.anomalies |= Anomalies::UNMATCHED_CLOSE;
            return;
        };

        if finished.members.is_empty() {
            self.anomalies |= Anomalies::EMPTY_CHUNK;
        }
        if let Some(parent) = self.stack.last_mut() {
            parent.members.extend_from_slice(&finished.members);
        }

        trace!("parser", "close chunk={} members={:?}", finished.name, finished.members);
        if let Some(previous) = self.registry.insert(finished.name.clone(), finished) {
            trace!("parser", "chunk name reused name={}", previous.name);
        }
    }

    fn read_token(&mut self, fields: &[&str]) {
        let &[_, form, xpos, bundle, ..] = fields else {
            trace!("parser", "skip token line fields={}", fields.len());
            self.anomalies |= Anomalies::SHORT_TOKEN_LINE;
            return;
        };

        let Some(id) = next_token_id(self.tokens.len()) else {
            trace!("parser", "token id space exhausted form={}", form);
            self.anomalies |= Anomalies::TOKEN_LIMIT;
            return;
        };
        let chunk_name = extract_attribute(bundle, "name")
            .map(str::to_string)
            .or_else(|| self.stack.last().map(|c| c.name.clone()));

        let token = Token {
            id,
            form: form.to_string(),
            lemma: extract_lemma(bundle, form),
            upos: map_pos(xpos).to_string(),
            xpos: xpos.to_string(),
            feats: extract_features(bundle),
            head: 0,
            deprel: String::new(),
            chunk_name,
            drel: extract_attribute(bundle, "drel").and_then(DrelTarget::parse),
        };

        if let Some(top) = self.stack.last_mut() {
            top.members.push(id);
        }
        self.tokens.push(token);
    }
}

/// Id of the token read after `count` others, if it fits in a [`TokenId`].
fn next_token_id(count: usize) -> Option<TokenId> {
    TokenId::try_from(count).ok()?.checked_add(1)
}

/// Parse the lines of one sentence block, keying chunks by bracket tag.
pub fn parse_sentence<S: AsRef<str>>(lines: &[S]) -> ParsedSentence {
    parse_sentence_with(lines, &Options::default())
}

/// Parse the lines of one sentence block.
pub fn parse_sentence_with<S: AsRef<str>>(lines: &[S], options: &Options) -> ParsedSentence {
    let mut parser = ChunkTreeParser::with_options(options);
    for line in lines {
        parser.feed(line.as_ref());
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_shapes() {
        assert_eq!(
            classify("1\t((\tNP\t<fs name='NP1'>"),
            Line::ChunkOpen { name: "NP", bundle: "<fs name='NP1'>" }
        );
        assert_eq!(classify("12 ((VGF <fs>"), Line::ChunkOpen { name: "VGF", bundle: "<fs>" });
        assert_eq!(classify("\t))"), Line::ChunkClose);
        assert_eq!(classify("1.2\tको\tPSP\t<fs>"), Line::Token(vec!["1.2", "को", "PSP", "<fs>"]));
        assert_eq!(classify("1\t((\tNP"), Line::Other);
        assert_eq!(classify(")) extra"), Line::Other);
        assert_eq!(classify("1.2\t((\tJJP\t<fs>"), Line::ChunkOpen { name: "JJP", bundle: "<fs>" });
        assert_eq!(classify("1.2.1\tख\tJJ\t<fs>"), Line::Token(vec!["1.2.1", "ख", "JJ", "<fs>"]));
        assert_eq!(classify("1.x\tको"), Line::Other);
        assert_eq!(classify("1\tको\tPSP\t<fs>"), Line::Other);
        assert_eq!(classify(""), Line::Other);
    }

    #[test]
    fn members_propagate_in_order() {
        let lines = [
            "1\t((\tNP\t<fs name='NP1'>",
            "1.1\tक\tNN\t<fs>",
            "1.2\t((\tJJP\t<fs name='JJP'>",
            "1.2.1\tख\tJJ\t<fs>",
            "1.2.2\tग\tJJ\t<fs>",
            "\t))",
            "1.3\tघ\tNN\t<fs>",
            "\t))",
        ];
        let parsed = parse_sentence(&lines);

        assert_eq!(parsed.tokens.len(), 4);
        assert_eq!(parsed.registry["JJP"].members, vec![2, 3]);
        assert_eq!(parsed.registry["NP"].members, vec![1, 2, 3, 4]);
        assert!(parsed.anomalies.is_empty());
    }

    #[test]
    fn chunk_name_from_attribute_or_stack() {
        let lines = [
            "1\t((\tNP\t<fs name='NP1'>",
            "1.1\tक\tNN\t<fs>",
            "\t))",
            "2.1\t।\tRD_PUNC\t<fs name='VGF'>",
            "3.1\tख\tNN\t<fs>",
        ];
        let parsed = parse_sentence(&lines);
        let names: Vec<Option<&str>> = parsed.tokens.iter().map(|t| t.chunk_name.as_deref()).collect();
        assert_eq!(names, vec![Some("NP"), Some("VGF"), None]);
    }

    #[test]
    fn short_token_line_skipped_without_consuming_id() {
        let lines = ["1.1\tक\tNN", "1.2\tख\tNN\t<fs>"];
        let parsed = parse_sentence(&lines);
        assert_eq!(parsed.tokens.len(), 1);
        assert_eq!(parsed.tokens[0].id, 1);
        assert_eq!(parsed.tokens[0].form, "ख");
        assert!(parsed.anomalies.contains(Anomalies::SHORT_TOKEN_LINE));
    }

    #[test]
    fn token_ids_never_wrap() {
        assert_eq!(next_token_id(0), Some(1));
        assert_eq!(next_token_id(41), Some(42));
        assert_eq!(next_token_id(TokenId::MAX as usize - 1), Some(TokenId::MAX));
        assert_eq!(next_token_id(TokenId::MAX as usize), None);
        assert_eq!(next_token_id(usize::MAX), None);
    }

    #[test]
    fn unclosed_chunk_not_registered() {
        let lines = ["1\t((\tNP\t<fs>", "1.1\tक\tNN\t<fs>"];
        let parsed = parse_sentence(&lines);
        assert!(parsed.registry.is_empty());
        assert!(parsed.anomalies.contains(Anomalies::UNCLOSED_CHUNK));
    }

    #[test]
    fn name_attribute_keys_when_enabled() {
        let lines = [
            "1\t((\tNP\t<fs name='NP'>",
            "1.1\tक\tNN\t<fs>",
            "\t))",
            "2\t((\tNP\t<fs name='NP2'>",
            "2.1\tख\tNN\t<fs>",
            "\t))",
            "3\t((\tVGF\t<fs>",
            "3.1\tग\tVM\t<fs>",
            "\t))",
        ];
        let options = Options { chunk_names_from_attribute: true, ..Options::default() };
        let parsed = parse_sentence_with(&lines, &options);

        let mut names: Vec<&str> = parsed.registry.keys().map(String::as_str).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["NP", "NP2", "VGF"]);
        assert_eq!(parsed.tokens[1].chunk_name.as_deref(), Some("NP2"));
        assert_eq!(parse_sentence(&lines).registry.len(), 2);
    }

    #[test]
    fn reused_name_keeps_last_chunk() {
        let lines = [
            "1\t((\tNP\t<fs>",
            "1.1\tक\tNN\t<fs>",
            "\t))",
            "2\t((\tNP\t<fs>",
            "2.1\tख\tNN\t<fs>",
            "\t))",
        ];
        let parsed = parse_sentence(&lines);
        assert_eq!(parsed.registry.len(), 1);
        assert_eq!(parsed.registry["NP"].members, vec![2]);
    }
}
