use crate::conllu::emit_sentence;
use crate::engine::{self, BlockSplitter, RunMetrics, Sentence, SentenceBlock, StageTimes};
use crate::error::{Error, Result};
use rayon::prelude::*;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;

/// Conversion options.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Emit a `# text = ..` comment (forms joined by spaces) after `sent_id`.
    pub emit_text: bool,
    /// Convert sentence blocks on the rayon pool. Output order is unchanged.
    pub parallel: bool,
    /// Let a chunk's head token carry the chunk's `drel` when the token has
    /// none of its own. Off by default: tokens resolve only from their own
    /// attributes.
    pub head_inherits_chunk_drel: bool,
    /// Key chunks by their `name=` attribute (falling back to the bracket
    /// tag) so drels can target chunks that share a tag, e.g. `NP` and `NP2`.
    pub chunk_names_from_attribute: bool,
}

/// Result of [`convert_str`].
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// The CoNLL-U document.
    pub output: String,
    /// Resolved sentences, in input order.
    pub sentences: Vec<Sentence>,
    pub metrics: RunMetrics,
}

/// Convert a whole SSF document held in memory.
///
/// Never fails: malformed sentences degrade to local defaults and are
/// flagged in [`Sentence::anomalies`].
///
/// # Example
/// ```
/// use ssfconv::{Options, convert_str};
///
/// let ssf = "<Sentence id='1'>
/// 1\t((\tNP\t<fs name='NP1' drel='k1:VGF'>
/// 1.1\tराम\tNNP\t<fs af='राम,n,m,sg,3,d,0,0' drel='k1:VGF'>
/// \t))
/// 2\t((\tVGF\t<fs name='VGF'>
/// 2.1\tगया\tVM\t<fs af='जा,v,m,sg,3,,या,ya'>
/// \t))
/// </Sentence>
/// ";
/// let out = convert_str(ssf, &Options::default());
/// assert!(out.output.contains("1\tराम\tराम\tPROPN\tNNP\tGender=Masc|Number=Sing|Person=3\t2\tk1\t_\t_\n"));
/// assert!(out.output.contains("2\tगया\tजा\tVERB\tVM\tGender=Masc|Number=Sing|Person=3\t0\troot\t_\t_\n"));
/// ```
pub fn convert_str(input: &str, options: &Options) -> ConvertResult {
    let started = Instant::now();
    let mut metrics = RunMetrics::default();

    let t = Instant::now();
    let blocks = engine::split_sentences(input);
    metrics.parse = t.elapsed();

    let sentences = convert_blocks(&blocks, options, &mut metrics);

    let t = Instant::now();
    let output: String = sentences.iter().map(|s| emit_sentence(&s.id, &s.tokens, options.emit_text)).collect();
    metrics.emit = t.elapsed();

    for sentence in &sentences {
        metrics.record(sentence);
    }
    metrics.total = started.elapsed();

    ConvertResult { output, sentences, metrics }
}

/// Convert from a reader into a writer.
///
/// Sequential runs stream sentence by sentence. Parallel runs read every
/// block first, convert them on the rayon pool, then write in input order.
pub fn convert_reader<R: BufRead, W: Write>(reader: R, mut writer: W, options: &Options) -> Result<RunMetrics> {
    let started = Instant::now();
    let mut metrics = RunMetrics::default();
    let mut splitter = BlockSplitter::new();

    if options.parallel {
        let t = Instant::now();
        let mut blocks = Vec::new();
        for line in reader.lines() {
            blocks.extend(splitter.push_line(&line?));
        }
        blocks.extend(splitter.finish());
        metrics.parse = t.elapsed();

        let sentences = convert_blocks(&blocks, options, &mut metrics);

        for sentence in &sentences {
            write_sentence(&mut writer, sentence, options, &mut metrics)?;
        }
    } else {
        for line in reader.lines() {
            let t = Instant::now();
            let block = splitter.push_line(&line?);
            metrics.parse += t.elapsed();

            if let Some(block) = block {
                convert_streamed(&mut writer, &block, options, &mut metrics)?;
            }
        }
        if let Some(block) = splitter.finish() {
            convert_streamed(&mut writer, &block, options, &mut metrics)?;
        }
    }

    writer.flush()?;
    metrics.total = started.elapsed();
    Ok(metrics)
}

/// Convert `input` to `output`. Only I/O errors abort the run.
pub fn convert_file(input: &Path, output: &Path, options: &Options) -> Result<RunMetrics> {
    let text = std::fs::read_to_string(input).map_err(|source| Error::io(input, source))?;
    let result = convert_str(&text, options);
    std::fs::write(output, result.output.as_bytes()).map_err(|source| Error::io(output, source))?;
    Ok(result.metrics)
}

fn convert_blocks(blocks: &[SentenceBlock], options: &Options, metrics: &mut RunMetrics) -> Vec<Sentence> {
    let converted: Vec<(Sentence, StageTimes)> = if options.parallel {
        blocks.par_iter().map(|block| engine::convert_block_timed(block, options)).collect()
    } else {
        blocks.iter().map(|block| engine::convert_block_timed(block, options)).collect()
    };

    converted
        .into_iter()
        .map(|(sentence, times)| {
            metrics.record_stages(times);
            sentence
        })
        .collect()
}

fn convert_streamed<W: Write>(
    writer: &mut W,
    block: &SentenceBlock,
    options: &Options,
    metrics: &mut RunMetrics,
) -> Result<()> {
    let (sentence, times) = engine::convert_block_timed(block, options);
    metrics.record_stages(times);
    write_sentence(writer, &sentence, options, metrics)
}

fn write_sentence<W: Write>(
    writer: &mut W,
    sentence: &Sentence,
    options: &Options,
    metrics: &mut RunMetrics,
) -> Result<()> {
    let t = Instant::now();
    writer.write_all(emit_sentence(&sentence.id, &sentence.tokens, options.emit_text).as_bytes())?;
    metrics.emit += t.elapsed();
    metrics.record(sentence);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Anomalies;

    const DOC: &str = "<Sentence id='1'>
1\t((\tNP\t<fs name='NP1' drel='k1:VGF'>
1.1\tराम\tNNP\t<fs af='राम,n,m,sg,3,d,0,0' drel='k1:VGF'>
\t))
2\t((\tVGF\t<fs name='VGF'>
2.1\tगया\tVM\t<fs af='जा,v,m,sg,3,,या,ya'>
\t))
</Sentence>
<Sentence id='2'>
1\t((\tNP\t<fs drel='k2:VGF'>
1.1\tघर\tNN\t<fs af='घर,n,m,sg,3,o,0,0'>
\t))
\t))
2\t((\tVGF\t<fs>
2.1\tदेखा\tVM\t<fs af='देख,v,m,sg,3,,या,ya'>
\t))
</Sentence>
";

    #[test]
    fn convert_str_reports_metrics() {
        let res = convert_str(DOC, &Options::default());

        assert_eq!(res.sentences.len(), 2);
        assert_eq!(res.metrics.sentences, 2);
        assert_eq!(res.metrics.tokens, 4);
        assert_eq!(res.metrics.chunks, 4);
        assert_eq!(res.metrics.roots, 3);
        assert_eq!(res.metrics.anomalies.get(Anomalies::UNMATCHED_CLOSE), 1);
        assert!(res.metrics.total >= res.metrics.parse + res.metrics.resolve);
    }

    #[test]
    fn reader_matches_in_memory_output() {
        for parallel in [false, true] {
            let options = Options { emit_text: true, parallel, ..Options::default() };
            let expected = convert_str(DOC, &options).output;

            let mut out = Vec::new();
            let metrics = convert_reader(DOC.as_bytes(), &mut out, &options).unwrap();

            assert_eq!(String::from_utf8(out).unwrap(), expected, "parallel={parallel}");
            assert_eq!(metrics.sentences, 2);
            assert_eq!(metrics.tokens, 4);
        }
    }

    #[test]
    fn parallel_preserves_order() {
        let doc: String = (1..=50)
            .map(|i| format!("<Sentence id='{i}'>\n1\t((\tVGF\t<fs>\n1.1\tw{i}\tVM\t<fs>\n\t))\n</Sentence>\n"))
            .collect();

        let sequential = convert_str(&doc, &Options::default());
        let parallel = convert_str(&doc, &Options { parallel: true, ..Options::default() });

        assert_eq!(sequential.output, parallel.output);
        let ids: Vec<&str> = parallel.sentences.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.first(), Some(&"1"));
        assert_eq!(ids.last(), Some(&"50"));
    }

    #[test]
    fn chunk_drel_projection_is_opt_in() {
        let plain = convert_str(DOC, &Options::default());
        let projected = convert_str(DOC, &Options { head_inherits_chunk_drel: true, ..Options::default() });

        let ghar = |res: &ConvertResult| {
            let tok = &res.sentences[1].tokens[0];
            (tok.head, tok.deprel.clone())
        };
        assert_eq!(ghar(&plain), (0, "root".to_string()));
        assert_eq!(ghar(&projected), (2, "k2".to_string()));
        assert_eq!(projected.metrics.roots, 2);
    }

    #[test]
    fn convert_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.conllu");
        std::fs::write(&input, DOC).unwrap();

        let metrics = convert_file(&input, &output, &Options::default()).unwrap();

        assert_eq!(metrics.sentences, 2);
        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, convert_str(DOC, &Options::default()).output);
    }

    #[test]
    fn convert_file_missing_input_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_file(&dir.path().join("nope.txt"), &dir.path().join("out"), &Options::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
