//! Directory batch conversion.
//!
//! Walks an input tree, converts every SSF file into a mirrored output tree
//! and verifies each result. Per-file failures are collected, never fatal.

use crate::api::{Options, convert_file};
use crate::engine::RunMetrics;
use crate::error::{Error, Result};
use crate::verify::{Verification, verify_files};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name endings recognised as SSF input.
pub const SUPPORTED_SUFFIXES: &[&str] = &["-posn-name", ".pos.cnhk", ".dat", ".txt", ".mo.po", ".mo.pos.chnk"];

const OUTPUT_EXTENSION: &str = "conllu";

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Move inputs that verify cleanly into this tree.
    pub verified_dir: Option<PathBuf>,
    pub options: Options,
}

#[derive(Debug)]
pub struct FileFailure {
    pub input: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Input files found, in walk order.
    pub found: Vec<PathBuf>,
    pub converted: Vec<PathBuf>,
    pub verified: Vec<PathBuf>,
    /// (from, to) pairs for inputs moved into the verified tree.
    pub moved: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<FileFailure>,
    /// Metrics summed over every converted file.
    pub metrics: RunMetrics,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

fn is_supported(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()).is_some_and(|name| SUPPORTED_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Recursively list supported files under `root`, sorted by path.
///
/// Symlinked directories are not descended into, so a link cycle under
/// `root` cannot repeat files.
pub(crate) fn find_ssf_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| walk_error(root, err))?;
        if entry.file_type().is_file() && is_supported(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn walk_error(root: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err.into_io_error().unwrap_or_else(|| std::io::Error::other("directory walk failed"));
    Error::Io { path, source }
}

fn output_path(config: &BatchConfig, relative: &Path) -> PathBuf {
    let mut name = relative.as_os_str().to_os_string();
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    config.output_dir.join(name)
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::io(parent, source))?;
    }
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    // rename fails across filesystems
    std::fs::copy(from, to).map_err(|source| Error::io(to, source))?;
    std::fs::remove_file(from).map_err(|source| Error::io(from, source))
}

/// Convert and verify one file. `Ok(false)` means a verification mismatch.
fn process_file(config: &BatchConfig, input: &Path, relative: &Path, report: &mut BatchReport) -> Result<bool> {
    let output = output_path(config, relative);
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(|source| Error::io(parent, source))?;
    }

    let metrics = convert_file(input, &output, &config.options)?;
    accumulate(&mut report.metrics, &metrics);
    report.converted.push(output.clone());

    match verify_files(input, &output)? {
        Verification::Match => {
            report.verified.push(input.to_path_buf());
            if let Some(verified_dir) = &config.verified_dir {
                let target = verified_dir.join(relative);
                move_file(input, &target)?;
                report.moved.push((input.to_path_buf(), target));
            }
            Ok(true)
        }
        mismatch => {
            trace!("batch", "file={} {}", input.display(), mismatch);
            report.failed.push(FileFailure { input: input.to_path_buf(), reason: mismatch.to_string() });
            Ok(false)
        }
    }
}

fn accumulate(total: &mut RunMetrics, run: &RunMetrics) {
    total.total += run.total;
    total.parse += run.parse;
    total.resolve += run.resolve;
    total.emit += run.emit;
    total.sentences += run.sentences;
    total.tokens += run.tokens;
    total.chunks += run.chunks;
    total.roots += run.roots;
    total.anomalies.merge(&run.anomalies);
}

/// Convert every supported file under `config.input_dir`.
///
/// `on_file` is called before each file is processed, with its index and
/// the total count (used by the CLI for progress display).
pub fn batch_convert(config: &BatchConfig, mut on_file: impl FnMut(usize, usize, &Path)) -> Result<BatchReport> {
    let files = find_ssf_files(&config.input_dir)?;
    let mut report = BatchReport { found: files.clone(), ..BatchReport::default() };

    for (idx, input) in files.iter().enumerate() {
        on_file(idx, files.len(), input);
        let relative = input.strip_prefix(&config.input_dir).unwrap_or(input);

        if let Err(err) = process_file(config, input, relative, &mut report) {
            trace!("batch", "file={} error={}", input.display(), err);
            report.failed.push(FileFailure { input: input.clone(), reason: err.to_string() });
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "<Sentence id='1'>\n1\t((\tVGF\t<fs>\n1.1\tगया\tVM\t<fs>\n\t))\n</Sentence>\n";
    const SHORT: &str = "<Sentence id='1'>\n1.1\tक\tNN\n</Sentence>\n";

    fn write(path: &Path, text: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn suffix_filter() {
        assert!(is_supported(Path::new("a/b.txt")));
        assert!(is_supported(Path::new("story-posn-name")));
        assert!(is_supported(Path::new("x.mo.pos.chnk")));
        assert!(!is_supported(Path::new("x.conllu")));
        assert!(!is_supported(Path::new("txt")));
    }

    #[test]
    fn converts_verifies_and_moves() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        write(&input.join("a.txt"), GOOD);
        write(&input.join("nested/b.dat"), GOOD);
        write(&input.join("nested/bad.txt"), SHORT);
        write(&input.join("notes.md"), GOOD);

        let config = BatchConfig {
            input_dir: input.clone(),
            output_dir: root.path().join("out"),
            verified_dir: Some(root.path().join("verified")),
            options: Options::default(),
        };
        let mut seen = Vec::new();
        let report = batch_convert(&config, |idx, total, _| seen.push((idx, total))).unwrap();

        assert_eq!(report.found.len(), 3);
        assert_eq!(seen, vec![(0, 3), (1, 3), (2, 3)]);
        assert_eq!(report.converted.len(), 3);
        assert_eq!(report.verified.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].input.ends_with("nested/bad.txt"));
        assert_eq!(report.metrics.sentences, 3);

        assert!(root.path().join("out/nested/b.dat.conllu").is_file());
        assert!(root.path().join("verified/nested/b.dat").is_file());
        assert!(!input.join("a.txt").exists());
        assert!(input.join("nested/bad.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directory_is_not_followed() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("in");
        write(&input.join("a.txt"), GOOD);
        write(&input.join("sub/b.dat"), GOOD);
        std::os::unix::fs::symlink(&input, input.join("loop")).unwrap();
        std::os::unix::fs::symlink(input.join("sub"), input.join("sub/back")).unwrap();

        let files = find_ssf_files(&input).unwrap();
        assert_eq!(files, vec![input.join("a.txt"), input.join("sub/b.dat")]);

        let config = BatchConfig {
            input_dir: input.clone(),
            output_dir: root.path().join("out"),
            verified_dir: Some(root.path().join("verified")),
            options: Options::default(),
        };
        let report = batch_convert(&config, |_, _, _| {}).unwrap();
        assert_eq!(report.found.len(), 2);
        assert_eq!(report.moved.len(), 2);
        assert!(report.is_clean());
    }

    #[test]
    fn missing_root_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let config = BatchConfig {
            input_dir: root.path().join("absent"),
            output_dir: root.path().join("out"),
            verified_dir: None,
            options: Options::default(),
        };
        assert!(matches!(batch_convert(&config, |_, _, _| {}), Err(Error::NotADirectory(_))));
    }
}
