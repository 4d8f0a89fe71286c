//! End-to-end CLI tests for chatstats.
//!
//! These tests run the actual binary against temporary exports and check
//! the files it writes and the summary it prints.
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let chat = "\
Ivan Petrov (09:15:00  03/04/2021):
Good morning everyone!
How is the project going?
Maria (09:16:30  03/04/2021):
Attachment: report.pdf
Ivan Petrov (09:20:00  03/04/2021):
\tMaria (08:00:00  02/04/2021):
\tsomething forwarded
Maria (21:05:10  05/04/2021):
Great news 🎉
";
    fs::write(dir.path().join("chat.txt"), chat).unwrap();

    let bad = "Ivan (99:99:99  00/00/0000):\nbroken\n";
    fs::write(dir.path().join("bad.txt"), bad).unwrap();

    fs::write(dir.path().join("empty.txt"), "").unwrap();
    fs::write(dir.path().join("stopwords"), "the is how\n").unwrap();

    dir
}

fn chatstats_cmd(fixtures: &TempDir) -> Command {
    let mut cmd = Command::from_std(std::process::Command::new(env!(
        "CARGO_BIN_EXE_chatstats"
    )));
    cmd.arg("--stopwords")
        .arg(fixtures.path().join("stopwords"))
        .env_remove("RUST_LOG");
    cmd
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Basic Functionality
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_csv_default_format() {
        let fixtures = setup_fixtures();
        let input = fixtures.path().join("chat.txt");
        let output = output_path(&fixtures, "out.csv");

        chatstats_cmd(&fixtures)
            .arg(&input)
            .arg("-o")
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("Messages:     4"))
            .stdout(predicate::str::contains("Forwarded:    1"));

        let content = fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("name;message;message_len;emojis;year;month;day;hour;minute;second")
        );
        assert_eq!(
            lines.next(),
            Some("Ivan Petrov;good morning everyone project going;48;0;2021;4;3;9;15;0")
        );
        assert!(content.contains("Maria;Attachment;"));
        assert!(content.contains("Ivan Petrov;Пересланное сообщение;"));
        assert!(content.contains("Maria;great news;12;1;2021;4;5;21;5;10"));
    }

    #[test]
    fn test_jsonl_format() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.jsonl");

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .args(["-f", "jsonl", "-o"])
            .arg(&output)
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 4);
        let first: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(first["name"], "Ivan Petrov");
        assert_eq!(first["message_len"], 48);
    }

    #[test]
    fn test_json_format() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.json");

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .args(["--format", "json", "-o"])
            .arg(&output)
            .assert()
            .success();

        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_streaming_mode_same_output() {
        let fixtures = setup_fixtures();
        let regular = output_path(&fixtures, "regular.csv");
        let streamed = output_path(&fixtures, "streamed.csv");

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .arg("-o")
            .arg(&regular)
            .assert()
            .success();

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .arg("--streaming")
            .arg("-o")
            .arg(&streamed)
            .assert()
            .success()
            .stdout(predicate::str::contains("Streaming"));

        assert_eq!(
            fs::read_to_string(&regular).unwrap(),
            fs::read_to_string(&streamed).unwrap()
        );
    }

    #[test]
    fn test_workers_and_cache_flags() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .args(["--workers", "3", "--cache-capacity", "1", "-o"])
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("3 workers"));
    }

    #[test]
    fn test_empty_export() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("empty.txt"))
            .arg("-o")
            .arg(&output)
            .assert()
            .success();

        assert_eq!(fs::read_to_string(&output).unwrap().lines().count(), 1);
    }
}

// ============================================================================
// Filters and Statistics
// ============================================================================

mod filters {
    use super::*;

    #[test]
    fn test_sender_filter() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .args(["--from", "maria", "-o"])
            .arg(&output)
            .assert()
            .success()
            .stdout(predicate::str::contains("2 rows after filtering"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(!content.contains("Ivan"));
    }

    #[test]
    fn test_date_filter() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .args(["--after", "2021-04-04", "-o"])
            .arg(&output)
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("great news"));
    }

    #[test]
    fn test_invalid_date() {
        let fixtures = setup_fixtures();

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .args(["--before", "04/04/2021"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid date"));
    }

    #[test]
    fn test_stats_file() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");
        let stats = output_path(&fixtures, "stats.json");

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .arg("-o")
            .arg(&output)
            .arg("--stats")
            .arg(&stats)
            .assert()
            .success()
            .stdout(predicate::str::contains("Statistics saved"));

        let v: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&stats).unwrap()).unwrap();
        assert_eq!(v["total_messages"], 4);
        assert_eq!(v["senders"][0]["name"], "Ivan Petrov");
        assert_eq!(v["senders"][1]["emojis"], 1);
        assert_eq!(v["messages_per_hour"][9], 3);
    }
}

// ============================================================================
// Error Handling
// ============================================================================

mod errors {
    use super::*;

    #[test]
    fn test_missing_input() {
        let fixtures = setup_fixtures();

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("nope.txt"))
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Input file not found"));
    }

    #[test]
    fn test_malformed_timestamp_writes_nothing() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.csv");

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("bad.txt"))
            .arg("-o")
            .arg(&output)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Malformed timestamp"))
            .stderr(predicate::str::contains("99:99:99 00/00/0000"));

        assert!(!output.exists());
    }

    #[test]
    fn test_missing_stopwords() {
        let fixtures = setup_fixtures();

        Command::from_std(std::process::Command::new(env!("CARGO_BIN_EXE_chatstats")))
            .arg(fixtures.path().join("chat.txt"))
            .arg("--stopwords")
            .arg(fixtures.path().join("missing_stopwords"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Stopword resource not found"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let fixtures = setup_fixtures();

        chatstats_cmd(&fixtures)
            .arg(fixtures.path().join("chat.txt"))
            .args(["-f", "xml"])
            .assert()
            .failure();
    }

    #[test]
    fn test_help() {
        Command::from_std(std::process::Command::new(env!("CARGO_BIN_EXE_chatstats")))
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--stopwords"))
            .stdout(predicate::str::contains("--workers"));
    }
}
