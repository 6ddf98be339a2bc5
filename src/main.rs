mod report;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use ssfconv::{BatchConfig, Options, Verification, batch_convert, convert_file, convert_reader, verify_files};
use std::io::{self, BufWriter, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "ssfconv", version)]
#[command(about = "Convert SSF chunk-annotated treebank files to CoNLL-U")]
#[command(after_help = "Exit codes:\n  0  Success.\n  1  Verification mismatch.\n  2  Invalid arguments or I/O error.\n\n\
Set SSFCONV_DEBUG=1 to trace chunk parsing and resolution on stderr.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert one SSF file (or stdin) to CoNLL-U
    Convert {
        /// Input SSF file, or `-` for stdin
        input: PathBuf,

        /// Output file (default: stdout)
        output: Option<PathBuf>,

        #[command(flatten)]
        conversion: ConversionArgs,

        /// Print a run summary to stderr
        #[arg(long)]
        stats: bool,

        /// Force coloured summary output
        #[arg(long, conflicts_with = "no_color")]
        color: bool,

        /// Disable coloured summary output
        #[arg(long)]
        no_color: bool,
    },

    /// Check that a CoNLL-U file carries the same words as its SSF source
    Verify {
        ssf: PathBuf,
        conllu: PathBuf,
    },

    /// Convert and verify every SSF file under a directory
    Batch {
        input_dir: PathBuf,
        output_dir: PathBuf,

        /// Move inputs that verify cleanly into this directory
        #[arg(long)]
        verified_dir: Option<PathBuf>,

        #[command(flatten)]
        conversion: ConversionArgs,

        /// Quiet mode - no progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

#[derive(Args)]
struct ConversionArgs {
    /// Add a `# text = ..` comment to every sentence
    #[arg(long)]
    text: bool,

    /// Convert sentences on all cores
    #[arg(long)]
    parallel: bool,

    /// Let a chunk's head token carry the chunk's drel when it has none
    #[arg(long)]
    chunk_drel: bool,

    /// Key chunks by their name= attribute instead of the bracket tag
    #[arg(long)]
    name_attr: bool,
}

impl ConversionArgs {
    fn options(&self) -> Options {
        Options {
            emit_text: self.text,
            parallel: self.parallel,
            head_inherits_chunk_drel: self.chunk_drel,
            chunk_names_from_attribute: self.name_attr,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Command) -> ssfconv::Result<ExitCode> {
    match command {
        Command::Convert { input, output, conversion, stats, color, no_color } => {
            let options = conversion.options();
            let metrics = match (input.to_str(), output) {
                (Some("-"), None) => convert_reader(io::stdin().lock(), BufWriter::new(io::stdout().lock()), &options)?,
                (Some("-"), Some(output)) => {
                    let file = std::fs::File::create(&output)
                        .map_err(|source| ssfconv::Error::Io { path: output.clone(), source })?;
                    convert_reader(io::stdin().lock(), BufWriter::new(file), &options)?
                }
                (_, Some(output)) => convert_file(&input, &output, &options)?,
                (_, None) => {
                    let file = std::fs::File::open(&input)
                        .map_err(|source| ssfconv::Error::Io { path: input.clone(), source })?;
                    convert_reader(io::BufReader::new(file), BufWriter::new(io::stdout().lock()), &options)?
                }
            };

            if stats {
                let color = (color || io::stderr().is_terminal()) && !no_color;
                report::print_run(&input.display().to_string(), &metrics, color);
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Verify { ssf, conllu } => {
            let verification = verify_files(&ssf, &conllu)?;
            println!("{verification}");
            Ok(if verification == Verification::Match { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }

        Command::Batch { input_dir, output_dir, verified_dir, conversion, quiet } => {
            let config = BatchConfig { input_dir, output_dir, verified_dir, options: conversion.options() };

            let pb = if quiet { ProgressBar::hidden() } else { ProgressBar::new(0) };
            if let Ok(style) = ProgressStyle::default_bar().template("{bar:40} {pos}/{len} {msg}") {
                pb.set_style(style);
            }

            let report = batch_convert(&config, |idx, total, path| {
                pb.set_length(total as u64);
                pb.set_position(idx as u64);
                pb.set_message(path.display().to_string());
            })?;
            pb.finish_and_clear();

            if !quiet {
                report::print_batch(&report, io::stderr().is_terminal());
            }
            Ok(if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::from(1) })
        }
    }
}
