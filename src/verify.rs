//! Form-sequence verification.
//!
//! Checks that a CoNLL-U file carries exactly the words of its SSF source:
//! same number of non-empty sentences, and per sentence the same forms in the
//! same order. Heads and labels are not compared.

use crate::conllu::read_conllu;
use crate::error::{Error, Result};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    Match,
    SentenceCountMismatch { ssf: usize, conllu: usize },
    /// `sentence` is 1-based among non-empty sentences.
    TokenMismatch { sentence: usize, ssf: Vec<String>, conllu: Vec<String> },
}

impl Verification {
    pub fn is_match(&self) -> bool {
        matches!(self, Verification::Match)
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verification::Match => write!(f, "all sentences match between SSF and CoNLL-U"),
            Verification::SentenceCountMismatch { ssf, conllu } => {
                write!(f, "mismatch in number of sentences: SSF={ssf} CoNLL-U={conllu}")
            }
            Verification::TokenMismatch { sentence, ssf, conllu } => write!(
                f,
                "sentence {sentence} tokens mismatch:\n  SSF:    {}\n  CoNLLU: {}",
                ssf.join(" "),
                conllu.join(" ")
            ),
        }
    }
}

/// Forms of every token line (at least two TAB fields), per sentence block.
///
/// Looser than the converter: a token line skipped for having too few
/// fields still counts here, so the skip surfaces as a mismatch.
fn ssf_forms(ssf: &str) -> Vec<Vec<String>> {
    let token_line = regex!(r"^\d+(?:\.\d+)+\s");
    let chunk_open = regex!(r"^\S+\s+\(\(");
    let mut sentences = Vec::new();
    let mut forms: Vec<String> = Vec::new();

    for line in ssf.lines().map(str::trim) {
        if line.starts_with("<Sentence") {
            forms.clear();
        } else if line.starts_with("</Sentence") {
            if !forms.is_empty() {
                sentences.push(std::mem::take(&mut forms));
            }
        } else if token_line.is_match(line) && !chunk_open.is_match(line) {
            if let Some(form) = line.split('\t').nth(1) {
                forms.push(form.to_string());
            }
        }
    }

    sentences
}

/// Compare an SSF document with a CoNLL-U document.
///
/// ```
/// use ssfconv::{Options, convert_str, verify_str};
///
/// let ssf = "<Sentence id='1'>\n1\t((\tVGF\t<fs>\n1.1\tगया\tVM\t<fs>\n\t))\n</Sentence>\n";
/// let out = convert_str(ssf, &Options::default());
/// assert!(verify_str(ssf, &out.output).is_match());
/// ```
pub fn verify_str(ssf: &str, conllu: &str) -> Verification {
    let ssf_sentences = ssf_forms(ssf);
    let conllu_sentences: Vec<Vec<String>> = read_conllu(conllu)
        .into_iter()
        .map(|s| s.rows.into_iter().map(|row| row.form).collect())
        .collect();

    if ssf_sentences.len() != conllu_sentences.len() {
        return Verification::SentenceCountMismatch { ssf: ssf_sentences.len(), conllu: conllu_sentences.len() };
    }

    ssf_sentences
        .into_iter()
        .zip(conllu_sentences)
        .enumerate()
        .find(|(_, (ssf, conllu))| ssf != conllu)
        .map_or(Verification::Match, |(idx, (ssf, conllu))| Verification::TokenMismatch {
            sentence: idx + 1,
            ssf,
            conllu,
        })
}

/// [`verify_str`] over two files.
pub fn verify_files(ssf: &Path, conllu: &Path) -> Result<Verification> {
    let ssf_text = std::fs::read_to_string(ssf).map_err(|source| Error::io(ssf, source))?;
    let conllu_text = std::fs::read_to_string(conllu).map_err(|source| Error::io(conllu, source))?;
    Ok(verify_str(&ssf_text, &conllu_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SSF: &str = "<Sentence id='1'>
1\t((\tNP\t<fs name='NP' drel='k1:VGF'>
1.1\tराम\tNNP\t<fs af='राम,n,m,sg,3,d,0,0'>
\t))
2\t((\tVGF\t<fs name='VGF'>
2.1\tगया\tVM\t<fs af='जा,v,m,sg,3,,या,ya'>
\t))
</Sentence>
<Sentence id='2'>
</Sentence>
";

    #[test]
    fn matching_forms() {
        let conllu = "# sent_id = 1\n1\tराम\t_\t_\t_\t_\t2\tk1\t_\t_\n2\tगया\t_\t_\t_\t_\t0\troot\t_\t_\n\n";
        assert_eq!(verify_str(SSF, conllu), Verification::Match);
    }

    #[test]
    fn token_mismatch_reports_sentence() {
        let conllu = "# sent_id = 1\n1\tराम\t_\t_\t_\t_\t0\troot\t_\t_\n\n";
        let got = verify_str(SSF, conllu);
        assert_eq!(
            got,
            Verification::TokenMismatch {
                sentence: 1,
                ssf: vec!["राम".to_string(), "गया".to_string()],
                conllu: vec!["राम".to_string()],
            }
        );
        assert!(got.to_string().contains("SSF:    राम गया"));
    }

    #[test]
    fn sentence_count_mismatch() {
        assert_eq!(verify_str(SSF, ""), Verification::SentenceCountMismatch { ssf: 1, conllu: 0 });
    }

    #[test]
    fn short_token_line_is_caught() {
        let ssf = "<Sentence id='1'>\n1.1\tक\tNN\n1.2\tख\tNN\t<fs>\n</Sentence>\n";
        let conllu = "# sent_id = 1\n1\tख\tख\tNOUN\tNN\t_\t0\troot\t_\t_\n\n";
        assert!(matches!(verify_str(ssf, conllu), Verification::TokenMismatch { sentence: 1, .. }));
    }
}
