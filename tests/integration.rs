//! Integration tests for the full extraction and enrichment pipeline.

use chatstats::core::stats::ChatStats;
use chatstats::parsing::{ATTACHMENT_MARKER, FORWARDED_PLACEHOLDER, MessageKind};
use chatstats::prelude::*;
use std::fs;

const CHAT: &str = "\
Ivan Petrov [vanya] (09:15:00  03/04/2021):
Good morning everyone!
How is the project going?
Maria Sidorova (09:16:30  03/04/2021):
Attachment: report.pdf
Ivan Petrov [vanya] (09:20:00  03/04/2021):
\tMaria Sidorova (08:00:00  02/04/2021):
\tAttachment: draft.pdf
Maria Sidorova (21:05:10  04/04/2021):
see https://example.com/Report 👍
Ivan Petrov [vanya] (23:59:59  04/04/2021):
Thanks 🎉🎉
";

fn stopwords() -> StopwordSet {
    StopwordSet::from_words(["the", "is", "how"])
}

fn run(text: &str) -> Result<PipelineOutput> {
    let stopwords = stopwords();
    Pipeline::new(
        PipelineConfig::new().with_enrich(EnrichConfig::new().with_workers(2)),
        &stopwords,
    )
    .run_str(text)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn two_headers_make_two_rows() {
    let out = run("Alice (10:00:00  01/01/2020):\nhello world\nBob (10:00:01  01/01/2020):\nhi\n")
        .unwrap();

    let rows = out.table.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Alice");
    assert_eq!(rows[1].name, "Bob");
    assert_eq!(rows[0].message_len, 11);
    assert_eq!(rows[0].message, "hello world");
}

#[test]
fn attachment_placeholder_survives_normalization() {
    let out = run("Alice (10:00:00  01/01/2020):\nAttachment: photo.jpg\n").unwrap();
    assert_eq!(out.table.rows()[0].message, ATTACHMENT_MARKER);
    assert_eq!(out.stats.attachments, 1);
}

#[test]
fn normalizer_drops_stopwords() {
    let set = StopwordSet::from_words(["the"]);
    assert_eq!(
        Normalizer::new(&set).normalize("The quick BROWN fox"),
        "quick brown fox"
    );
}

#[test]
fn multiline_body_becomes_one_row_without_newlines() {
    let out = run("Alice (10:00:00  01/01/2020):\nfirst\nsecond\nthird\n").unwrap();
    assert_eq!(out.table.len(), 1);
    let row = &out.table.rows()[0];
    assert!(!row.message.contains('\n'));
    assert_eq!(row.message, "first second third");
    assert_eq!(row.message_len, "first second third".len());
}

#[test]
fn malformed_timestamp_produces_no_table() {
    let text = "Alice (10:00:00  01/01/2020):\nok\nBob (99:99:99  00/00/0000):\nbroken\n";
    match run(text) {
        Err(ChatstatsError::MalformedTimestamp { row, input }) => {
            assert_eq!(row, 1);
            assert_eq!(input, "99:99:99 00/00/0000");
        }
        other => panic!("expected MalformedTimestamp, got {other:?}"),
    }
}

// ============================================================================
// Realistic export
// ============================================================================

#[test]
fn realistic_export_rows() {
    let out = run(CHAT).unwrap();
    let rows = out.table.rows();

    assert_eq!(rows.len(), 5);
    assert_eq!(out.stats.messages, 5);
    assert_eq!(out.stats.forwarded, 1);
    assert_eq!(out.stats.attachments, 1);
    assert_eq!(out.stats.plain, 3);

    // nickname is kept in the sender label
    assert_eq!(rows[0].name, "Ivan Petrov [vanya]");
    assert_eq!(rows[0].message, "good morning everyone project going");

    assert_eq!(rows[1].message, ATTACHMENT_MARKER);
    // forwarded wins over the attachment inside the forwarded block
    assert_eq!(rows[2].message, FORWARDED_PLACEHOLDER);
    // links pass through untouched
    assert_eq!(rows[3].message, "see https://example.com/Report 👍");
    assert_eq!(rows[3].emojis, 1);

    assert_eq!(rows[4].message, "thanks");
    assert_eq!(rows[4].emojis, 2);
    assert_eq!(
        (rows[4].year, rows[4].month, rows[4].day),
        (2021, 4, 4)
    );
    assert_eq!(
        (rows[4].hour, rows[4].minute, rows[4].second),
        (23, 59, 59)
    );
}

#[test]
fn table_builder_matches_pipeline_classification() {
    let messages = segment(CHAT);
    let kinds: Vec<MessageKind> = messages.iter().map(|m| classify(m).kind).collect();
    assert_eq!(
        kinds,
        [
            MessageKind::Plain,
            MessageKind::Attachment,
            MessageKind::Forwarded,
            MessageKind::Plain,
            MessageKind::Plain,
        ]
    );

    let table = MessageTable::from_messages(messages);
    assert_eq!(table.rows()[0].date, "09:15:00 03/04/2021");
    assert_eq!(
        table.rows()[0].message,
        "Good morning everyone! How is the project going?"
    );
}

#[test]
fn run_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    fs::write(&path, CHAT).unwrap();

    let stopwords = stopwords();
    let out = Pipeline::new(PipelineConfig::new(), &stopwords)
        .run_path(&path)
        .unwrap();
    assert_eq!(out.table.len(), 5);
    assert_eq!(out.stats.lines, CHAT.lines().count());
}

#[test]
fn shipped_stopword_resource_loads() {
    let set = StopwordSet::load(chatstats::config::DEFAULT_STOPWORDS_PATH).unwrap();
    assert!(set.contains("the"));
    assert!(set.contains("и"));
    assert!(!set.contains("project"));
}

#[test]
fn missing_stopword_resource_is_fatal() {
    let err = StopwordSet::load("/no/such/stopwords").unwrap_err();
    assert!(err.is_stopwords_missing());
}

#[test]
fn worker_count_does_not_change_output() {
    let stopwords = stopwords();
    let one = Pipeline::new(
        PipelineConfig::new().with_enrich(EnrichConfig::new().with_workers(1)),
        &stopwords,
    )
    .run_str(CHAT)
    .unwrap();
    let many = Pipeline::new(
        PipelineConfig::new().with_enrich(EnrichConfig::new().with_workers(8)),
        &stopwords,
    )
    .run_str(CHAT)
    .unwrap();
    assert_eq!(one.table, many.table);
}

// ============================================================================
// Filtering and statistics
// ============================================================================

#[test]
fn filter_then_stats() {
    let out = run(CHAT).unwrap();
    let filter = FilterConfig::new()
        .with_sender("ivan petrov [vanya]")
        .with_date_to("2021-04-03")
        .unwrap();
    let rows = apply_filters(out.table.into_rows(), &filter);
    assert_eq!(rows.len(), 2);

    let stats = ChatStats::from_rows(&rows);
    assert_eq!(stats.senders.len(), 1);
    assert_eq!(stats.senders[0].messages, 2);
    assert_eq!(stats.messages_per_hour[9], 2);
}

#[test]
fn stats_over_realistic_export() {
    let out = run(CHAT).unwrap();
    let stats = ChatStats::from_rows(out.table.rows());

    let names: Vec<_> = stats.senders.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Ivan Petrov [vanya]", "Maria Sidorova"]);

    let ivan = stats.sender("Ivan Petrov [vanya]").unwrap();
    assert_eq!(ivan.messages, 3);
    assert_eq!(ivan.emojis, 2);
    // placeholders and links are excluded from word counts
    assert!(ivan.common_words.iter().all(|w| w.word != "пересланное"));
    assert!(stats.sender("Maria Sidorova").unwrap().common_words.is_empty());

    assert_eq!(stats.heatmap.len(), 2);
    assert_eq!(stats.heatmap[0].count, 3);
}
