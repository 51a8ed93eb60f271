use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn create_test_files(dir: impl AsRef<Path>, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        fs::write(dir.as_ref().join(name), content)?;
    }
    Ok(())
}

fn cli(cwd: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("matchbench-cli")?;
    cmd.current_dir(cwd.path()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    Ok(cmd)
}

fn corpus() -> Result<TempDir> {
    let dir = tempdir()?;
    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus)?;
    create_test_files(
        &corpus,
        &[
            (
                "article1.txt",
                "A search algorithm walks a data structure looking for a pattern.",
            ),
            ("article2.txt", "Пошук підрядка: алгоритм та структура даних."),
        ],
    )?;
    Ok(dir)
}

#[test]
fn test_search_inline_text() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["search", "-p", "world", "hello world"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Searching for 'world' in 11 characters"))
        .stdout(predicate::str::is_match(r"Boyer-Moore\s+Position 6\s+7")?)
        .stdout(predicate::str::is_match(r"Knuth-Morris-Pratt\s+Position 6\s+11")?)
        .stdout(predicate::str::is_match(r"Rabin-Karp\s+Position 6\s+12")?);
    Ok(())
}

#[test]
fn test_search_single_algorithm() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["search", "-A", "kmp", "-p", "xyz", "hello world"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Knuth-Morris-Pratt\s+Not found\s+11")?)
        .stdout(predicate::str::contains("Boyer-Moore").not());
    Ok(())
}

#[test]
fn test_search_file() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("text.txt", "пошук алгоритм структур даних")])?;

    cli(&dir)?
        .args(["search", "--file", "text.txt", "-p", "структур"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Boyer-Moore\s+Position 15\s+10")?);
    Ok(())
}

#[test]
fn test_search_requires_text() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?.args(["search", "-p", "world"]).assert().failure();

    cli(&dir)?
        .args(["search", "--file", "missing.txt", "-p", "world"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read missing.txt"));
    Ok(())
}

#[test]
fn test_search_rejects_unknown_algorithm() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["search", "-A", "naive", "-p", "a", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown algorithm: naive"));
    Ok(())
}

#[test]
fn test_bsearch() -> Result<()> {
    let dir = tempdir()?;
    let values = "1.2,2.5,3.7,4.1,5.9,7.3,8.6,9.4,10.8,12.1";

    cli(&dir)?
        .args(["bsearch", values, "7.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Element 7.3 found at position 5"))
        .stdout(predicate::str::contains("Iterations: 3"));

    cli(&dir)?
        .args(["bsearch", values, "6.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Element 6 not found"))
        .stdout(predicate::str::contains("Iterations: 3"));

    cli(&dir)?
        .args(["bsearch", values, "12.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("found at position 9"))
        .stdout(predicate::str::contains("Iterations: 4"));
    Ok(())
}

#[test]
fn test_bsearch_rejects_bad_input() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["bsearch", "3,2,1", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sorted"));

    cli(&dir)?
        .args(["bsearch", "1,two,3", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid number: two"));
    Ok(())
}

#[test]
fn test_bench_prints_tables_and_writes_report() -> Result<()> {
    let dir = corpus()?;

    cli(&dir)?
        .args([
            "bench",
            "-d",
            "corpus",
            "-p",
            "algorithm",
            "-p",
            "алгоритм",
            "-a",
            "nonexistent",
            "-n",
            "2",
            "-j",
            "1",
            "--report",
            "report.md",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("SUBSTRING SEARCH ALGORITHM COMPARISON"))
        .stdout(predicate::str::contains("article1.txt"))
        .stdout(predicate::str::contains("Pattern: 'алгоритм'"))
        .stdout(predicate::str::contains("Not found"))
        .stdout(predicate::str::contains("OVERALL ANALYSIS"))
        .stdout(predicate::str::contains("Rabin-Karp: "))
        .stdout(predicate::str::contains("of 6"))
        .stdout(predicate::str::contains("Report saved to report.md"));

    let report = fs::read_to_string(dir.path().join("report.md"))?;
    assert!(report.starts_with("# Substring Search Algorithm Comparison"));
    assert!(report.contains("### article2.txt"));
    Ok(())
}

#[test]
fn test_bench_stats_only() -> Result<()> {
    let dir = corpus()?;
    cli(&dir)?
        .args(["bench", "-d", "corpus", "-n", "1", "--stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OVERALL ANALYSIS"))
        .stdout(predicate::str::contains("Pattern:").not());
    Ok(())
}

#[test]
fn test_bench_json() -> Result<()> {
    let dir = corpus()?;
    let output = cli(&dir)?
        .args([
            "bench",
            "-f",
            "corpus/article1.txt",
            "-p",
            "data",
            "-a",
            "missing",
            "-A",
            "kmp,rabin-karp",
            "-n",
            "1",
            "--json",
        ])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["summary"]["test_count"], 2);
    assert_eq!(json["report"]["algorithms"], serde_json::json!(["kmp", "rabin-karp"]));
    let runs = &json["report"]["samples"][0]["patterns"][0]["runs"];
    assert_eq!(runs[0]["position"], runs[1]["position"]);
    Ok(())
}

#[test]
fn test_bench_uses_config_file() -> Result<()> {
    let dir = corpus()?;
    create_test_files(
        &dir,
        &[(
            "bench.yaml",
            "sample_dir: corpus\npresent_patterns: [\"structure\"]\nabsent_patterns: []\niterations: 1\n",
        )],
    )?;

    cli(&dir)?
        .args(["bench", "--config", "bench.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pattern: 'structure'"))
        .stdout(predicate::str::contains("Pattern: 'algorithm'").not());
    Ok(())
}

#[test]
fn test_bench_flags_override_local_config() -> Result<()> {
    let dir = corpus()?;
    create_test_files(
        &dir,
        &[(".matchbench.yaml", "iterations: 5\nalgorithms: [\"kmp\"]\n")],
    )?;

    let output = cli(&dir)?
        .args([
            "bench",
            "-f",
            "corpus/article1.txt",
            "-p",
            "data",
            "-a",
            "missing",
            "-n",
            "100",
            "-A",
            "boyer-moore,kmp,rabin-karp",
            "--json",
        ])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["report"]["iterations"], 100);
    assert_eq!(
        json["report"]["algorithms"],
        serde_json::json!(["boyer-moore", "kmp", "rabin-karp"])
    );

    // Without the flags the local file applies
    let output = cli(&dir)?
        .args(["bench", "-f", "corpus/article1.txt", "-p", "data", "--json"])
        .output()?;
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["report"]["iterations"], 5);
    assert_eq!(json["report"]["algorithms"], serde_json::json!(["kmp"]));
    Ok(())
}

#[test]
fn test_bench_without_samples_fails() -> Result<()> {
    let dir = tempdir()?;
    cli(&dir)?
        .args(["bench", "-n", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No sample texts to search"));
    Ok(())
}

#[test]
fn test_bench_rejects_unknown_encoding() -> Result<()> {
    let dir = corpus()?;
    cli(&dir)?
        .args(["bench", "-d", "corpus", "--encoding", "latin1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown encoding mode: latin1"));
    Ok(())
}

#[test]
fn test_init_config() -> Result<()> {
    let dir = tempdir()?;

    cli(&dir)?
        .args(["init-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("iterations: 100"))
        .stdout(predicate::str::contains("- rabin-karp"));

    cli(&dir)?
        .args(["init-config", "--output", "matchbench.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration written to matchbench.yaml"));
    assert!(dir.path().join("matchbench.yaml").exists());

    cli(&dir)?
        .args(["init-config", "--output", "matchbench.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    cli(&dir)?
        .args(["init-config", "--output", "matchbench.yaml", "--force"])
        .assert()
        .success();
    Ok(())
}
