use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

use crate::errors::BenchResult;
use crate::results::{AlgorithmRun, BenchReport, Summary};

/// Text shown in the result column
pub fn describe_position(position: Option<usize>) -> String {
    match position {
        Some(p) => format!("Position {}", p),
        None => "Not found".to_string(),
    }
}

fn push_run_row(out: &mut String, run: &AlgorithmRun) {
    let _ = writeln!(
        out,
        "| {} | {:.2} | {} | {} |",
        run.algorithm,
        run.avg_time_us,
        run.comparisons,
        describe_position(run.position)
    );
}

/// Renders the report as a Markdown document
pub fn render_markdown(report: &BenchReport) -> String {
    let mut out = String::new();

    out.push_str("# Substring Search Algorithm Comparison\n\n");
    out.push_str("## Algorithms\n\n");
    for algorithm in &report.algorithms {
        let _ = writeln!(out, "- **{}** - uses a {}", algorithm, algorithm.technique());
    }
    let _ = writeln!(
        out,
        "\nEach search was repeated {} times; times are means in microseconds.\n",
        report.iterations
    );

    out.push_str("## Results\n\n");
    for sample in &report.samples {
        let _ = writeln!(out, "### {}\n", sample.name);
        let _ = writeln!(out, "Text size: {} characters\n", sample.text_len);

        for pattern in &sample.patterns {
            let _ = writeln!(out, "#### Pattern: '{}'\n", pattern.pattern);
            out.push_str("| Algorithm | Time (µs) | Comparisons | Result |\n");
            out.push_str("|-----------|-----------|-------------|--------|\n");
            for run in &pattern.runs {
                push_run_row(&mut out, run);
            }

            if let (Some(fastest), Some(efficient)) = (pattern.fastest(), pattern.most_efficient())
            {
                let _ = writeln!(
                    out,
                    "\n**Fastest**: {} ({:.2} µs)  ",
                    fastest.algorithm, fastest.avg_time_us
                );
                let _ = writeln!(
                    out,
                    "**Most efficient**: {} ({} comparisons)\n",
                    efficient.algorithm, efficient.comparisons
                );
            }
        }
    }

    let summary = report.summary();
    out.push_str("## Overall Analysis\n\n");
    out.push_str("### Averages\n\n");
    out.push_str("| Algorithm | Time (µs) | Comparisons |\n");
    out.push_str("|-----------|-----------|-------------|\n");
    for entry in &summary.algorithms {
        let _ = writeln!(
            out,
            "| {} | {:.2} | {:.1} |",
            entry.algorithm, entry.avg_time_us, entry.avg_comparisons
        );
    }

    out.push_str("\n### Wins\n\n");
    out.push_str("| Algorithm | Wins by time | Wins by comparisons |\n");
    out.push_str("|-----------|--------------|---------------------|\n");
    for entry in &summary.algorithms {
        let _ = writeln!(
            out,
            "| {} | {}/{} | {}/{} |",
            entry.algorithm,
            entry.wins_time,
            summary.test_count,
            entry.wins_comparisons,
            summary.test_count
        );
    }

    if let (Some(fastest), Some(efficient)) =
        (summary.fastest_overall, summary.most_efficient_overall)
    {
        let _ = writeln!(out, "\n**Fastest overall**: {}  ", fastest);
        let _ = writeln!(out, "**Most efficient overall**: {}", efficient);
    }

    out
}

/// Writes the Markdown report to `path`
pub fn write_markdown(report: &BenchReport, path: &Path) -> BenchResult<()> {
    std::fs::write(path, render_markdown(report))?;
    info!("Report saved to {}", path.display());
    Ok(())
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    report: &'a BenchReport,
    summary: Summary,
}

/// Serializes the report, including its summary, as pretty JSON
pub fn render_json(report: &BenchReport) -> BenchResult<String> {
    let document = JsonDocument {
        report,
        summary: report.summary(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
