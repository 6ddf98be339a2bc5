use ssfconv::{BatchReport, RunMetrics};

/// SGR styles used by the summaries.
#[derive(Clone, Copy)]
enum Style {
    Heading,
    Rule,
    Dim,
    Good,
    Count,
    Warn,
    Bad,
}

impl Style {
    fn sgr(self) -> &'static str {
        match self {
            Style::Heading => "1;36",
            Style::Rule => "90",
            Style::Dim => "2",
            Style::Good => "32",
            Style::Count => "34",
            Style::Warn => "33",
            Style::Bad => "31",
        }
    }
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn paint(&self, s: impl AsRef<str>, style: Style) -> String {
        if self.enabled { format!("\x1b[{}m{}\x1b[0m", style.sgr(), s.as_ref()) } else { s.as_ref().to_string() }
    }

    fn rule(&self, title: &str) {
        eprintln!("\n{}", self.paint(format!("━━━ {title} ━━━"), Style::Rule));
    }
}

pub fn print_run(input: &str, metrics: &RunMetrics, color: bool) {
    let palette = Palette { enabled: color };
    eprintln!("\n{}", palette.paint(format!("⚙  Converted: {input}"), Style::Heading));

    palette.rule("Corpus");
    print_counts(metrics, &palette);

    palette.rule("Anomalies");
    print_anomalies(metrics, &palette);

    palette.rule("Timing");
    eprintln!(
        "  Total: {}  │  Parse: {}  │  Resolve: {}  │  Emit: {}",
        palette.paint(format!("{:?}", metrics.total), Style::Good),
        palette.paint(format!("{:?}", metrics.parse), Style::Dim),
        palette.paint(format!("{:?}", metrics.resolve), Style::Count),
        palette.paint(format!("{:?}", metrics.emit), Style::Dim),
    );
    eprintln!();
}

pub fn print_batch(report: &BatchReport, color: bool) {
    let palette = Palette { enabled: color };
    eprintln!("\n{}", palette.paint(format!("⚙  Batch: {} files", report.found.len()), Style::Heading));

    palette.rule("Files");
    eprintln!(
        "  {} converted  │  {} verified  │  {} moved  │  {}",
        palette.paint(report.converted.len().to_string(), Style::Count),
        palette.paint(report.verified.len().to_string(), Style::Good),
        palette.paint(report.moved.len().to_string(), Style::Dim),
        if report.failed.is_empty() {
            palette.paint("0 failed", Style::Dim)
        } else {
            palette.paint(format!("{} failed", report.failed.len()), Style::Bad)
        }
    );
    for failure in &report.failed {
        let input = failure.input.display().to_string();
        eprintln!("  {} {}", palette.paint("✗", Style::Bad), palette.paint(input, Style::Warn));
        for line in failure.reason.lines() {
            eprintln!("      {}", palette.paint(line, Style::Dim));
        }
    }

    palette.rule("Corpus");
    print_counts(&report.metrics, &palette);

    palette.rule("Anomalies");
    print_anomalies(&report.metrics, &palette);
    eprintln!();
}

fn print_counts(metrics: &RunMetrics, palette: &Palette) {
    eprintln!(
        "  Sentences: {}  │  Tokens: {}  │  Chunks: {}  │  Roots: {}",
        palette.paint(metrics.sentences.to_string(), Style::Good),
        palette.paint(metrics.tokens.to_string(), Style::Count),
        palette.paint(metrics.chunks.to_string(), Style::Count),
        palette.paint(metrics.roots.to_string(), Style::Warn),
    );
}

fn print_anomalies(metrics: &RunMetrics, palette: &Palette) {
    if metrics.anomalies.sentences == 0 {
        eprintln!("{}", palette.paint("  None", Style::Dim));
        return;
    }

    eprintln!(
        "  {} of {} sentences fell back to defaults",
        palette.paint(metrics.anomalies.sentences.to_string(), Style::Warn),
        metrics.sentences
    );
    for (name, count) in metrics.anomalies.iter() {
        eprintln!("    {} {}", palette.paint(format!("{count:>6}"), Style::Warn), palette.paint(name, Style::Count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paint_wraps_only_when_enabled() {
        assert_eq!(Palette { enabled: false }.paint("3 failed", Style::Bad), "3 failed");
        assert_eq!(Palette { enabled: true }.paint("3 failed", Style::Bad), "\x1b[31m3 failed\x1b[0m");
        assert_eq!(Palette { enabled: true }.paint("ok", Style::Heading), "\x1b[1;36mok\x1b[0m");
    }
}
