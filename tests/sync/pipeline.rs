//! Integration tests for a single pipeline attempt.
//!
//! Tests cover:
//! - Filling gaps while keeping existing translations and key order
//! - No request and no write for complete catalogs
//! - Batch cap and backlog reporting
//! - Unparsable, empty, and failed replies leaving the file untouched
//! - Keywords and unknown entry fields

use catalog_fill::SyncError;
use catalog_fill::catalog::select_gaps;

use crate::support::{
    Behavior, FakeService, batch_from_prompt, catalog_of, pipeline, read_catalog,
    untranslated_catalog, write_catalog,
};

#[tokio::test]
/// What: Fill the only gap of a two-entry catalog.
///
/// Inputs:
/// - `es` catalog with `greet` untranslated and `bye` already translated
///
/// Output:
/// - `greet` becomes "Hola", `bye` stays "Adiós", order is kept.
///
/// Details:
/// - The request carries only the untranslated key.
async fn integration_fills_gap_and_keeps_existing_translation() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(
        dir.path(),
        "es",
        &catalog_of(&[("greet", "Hello", ""), ("bye", "Goodbye", "Adiós")]),
    );
    let p = pipeline(
        dir.path(),
        FakeService::translating().with_dictionary(&[("Hello", "Hola")]),
        &[],
        20,
    );

    let report = p.run_attempt("es").await.expect("attempt");
    assert_eq!(report.requested, 1);
    assert_eq!(report.applied, 1);
    assert_eq!(report.remaining, 0);

    let prompts = p.service().prompts();
    assert_eq!(prompts.len(), 1);
    let sent = batch_from_prompt(&prompts[0]);
    assert_eq!(sent.len(), 1);
    assert_eq!(sent.get("greet").map(String::as_str), Some("Hello"));

    let saved = read_catalog(dir.path(), "es");
    assert_eq!(
        saved,
        catalog_of(&[("greet", "Hello", "Hola"), ("bye", "Goodbye", "Adiós")])
    );
    let keys: Vec<&String> = saved.keys().collect();
    assert_eq!(keys, ["greet", "bye"]);
}

#[tokio::test]
/// What: A complete catalog costs no request and no write.
///
/// Inputs:
/// - Fully translated `zh` catalog
///
/// Output:
/// - Report with zero counts, zero service calls, identical file bytes.
async fn integration_complete_catalog_is_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(
        dir.path(),
        "zh",
        &catalog_of(&[("greet", "Hello", "你好"), ("bye", "Goodbye", "再见")]),
    );
    let before = std::fs::read(dir.path().join("zh.json")).expect("read");
    let p = pipeline(dir.path(), FakeService::translating(), &[], 20);

    let report = p.run_attempt("zh").await.expect("attempt");
    assert_eq!(report.requested, 0);
    assert_eq!(report.applied, 0);
    assert_eq!(report.remaining, 0);
    assert_eq!(p.service().calls(), 0);
    assert_eq!(std::fs::read(dir.path().join("zh.json")).expect("read"), before);
}

#[tokio::test]
/// What: At most one batch is sent per attempt.
///
/// Inputs:
/// - 45 untranslated entries, batch size 20
///
/// Output:
/// - First 20 keys in file order are sent; 25 gaps remain on disk.
async fn integration_batch_is_capped_and_backlog_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), "fr", &untranslated_catalog(45));
    let p = pipeline(dir.path(), FakeService::translating(), &[], 20);

    let report = p.run_attempt("fr").await.expect("attempt");
    assert_eq!(report.requested, 20);
    assert_eq!(report.applied, 20);
    assert_eq!(report.remaining, 25);

    let sent = batch_from_prompt(&p.service().prompts()[0]);
    let expected: Vec<String> = (0..20).map(|i| format!("k{i:03}")).collect();
    assert_eq!(sent.keys().cloned().collect::<Vec<_>>(), expected);

    let saved = read_catalog(dir.path(), "fr");
    assert_eq!(saved.gap_count(), 25);
    assert_eq!(
        saved.get("k000").map(|e| e.translation.as_str()),
        Some("~Text 0")
    );
    assert_eq!(select_gaps(&saved, 20).remaining, 25);
}

#[tokio::test]
/// What: Batch size above the hard cap is clamped.
///
/// Inputs:
/// - 30 untranslated entries, batch size 100
///
/// Output:
/// - Only 20 entries are requested.
async fn integration_batch_size_is_clamped() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), "de", &untranslated_catalog(30));
    let p = pipeline(dir.path(), FakeService::translating(), &[], 100);

    let report = p.run_attempt("de").await.expect("attempt");
    assert_eq!(report.requested, 20);
    assert_eq!(report.remaining, 10);
}

#[tokio::test]
/// What: An unparsable reply discards the batch without failing the locale.
///
/// Inputs:
/// - Service replying with prose instead of JSON
///
/// Output:
/// - `Ok` report with nothing applied and the full backlog; file unchanged.
async fn integration_unparsable_reply_keeps_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), "ja", &untranslated_catalog(3));
    let before = std::fs::read(dir.path().join("ja.json")).expect("read");
    let p = pipeline(dir.path(), FakeService::new(Behavior::Garbage), &[], 20);

    let report = p.run_attempt("ja").await.expect("parse errors are not fatal");
    assert_eq!(report.requested, 3);
    assert_eq!(report.applied, 0);
    assert_eq!(report.remaining, 3);
    assert_eq!(std::fs::read(dir.path().join("ja.json")).expect("read"), before);
}

#[tokio::test]
/// What: A reply with no usable translations writes nothing.
///
/// Inputs:
/// - Service replying with `{}`
///
/// Output:
/// - Nothing applied; file bytes unchanged.
async fn integration_empty_reply_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), "ko", &untranslated_catalog(2));
    let before = std::fs::read(dir.path().join("ko.json")).expect("read");
    let p = pipeline(dir.path(), FakeService::new(Behavior::NoProgress), &[], 20);

    let report = p.run_attempt("ko").await.expect("attempt");
    assert_eq!(report.applied, 0);
    assert_eq!(report.remaining, 2);
    assert_eq!(std::fs::read(dir.path().join("ko.json")).expect("read"), before);
}

#[tokio::test]
/// What: Keys missing from the reply stay gaps.
///
/// Inputs:
/// - Three gaps, service answers only the first key
///
/// Output:
/// - One applied, two remaining.
async fn integration_partial_reply_counts_remaining() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), "it", &untranslated_catalog(3));
    let p = pipeline(
        dir.path(),
        FakeService::new(Behavior::TranslatePartial(1)),
        &[],
        20,
    );

    let report = p.run_attempt("it").await.expect("attempt");
    assert_eq!(report.applied, 1);
    assert_eq!(report.remaining, 2);
    let saved = read_catalog(dir.path(), "it");
    assert!(!saved.get("k000").expect("k000").is_gap());
    assert!(saved.get("k001").expect("k001").is_gap());
}

#[tokio::test]
/// What: Service failures surface as errors and leave the file alone.
///
/// Inputs:
/// - Service failing every call
///
/// Output:
/// - `SyncError::TranslationService`; file unchanged.
async fn integration_service_failure_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), "pl", &untranslated_catalog(2));
    let before = std::fs::read(dir.path().join("pl.json")).expect("read");
    let p = pipeline(
        dir.path(),
        FakeService::new(Behavior::Fail("401 Unauthorized".to_string())),
        &[],
        20,
    );

    let err = p.run_attempt("pl").await.expect_err("service failure");
    assert!(matches!(err, SyncError::TranslationService(ref m) if m.contains("401")));
    assert_eq!(std::fs::read(dir.path().join("pl.json")).expect("read"), before);
}

#[tokio::test]
/// What: A missing catalog is a read error and costs no request.
async fn integration_missing_catalog_is_read_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let p = pipeline(dir.path(), FakeService::translating(), &[], 20);

    let err = p.run_attempt("nl").await.expect_err("missing catalog");
    assert!(matches!(err, SyncError::CatalogRead { .. }));
    assert_eq!(p.service().calls(), 0);
}

#[tokio::test]
/// What: Keywords are listed verbatim in the prompt.
///
/// Inputs:
/// - Keywords `Acme Cloud` and `API`
///
/// Output:
/// - Prompt lists both, comma separated, and names the target language.
async fn integration_prompt_lists_keywords() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_catalog(dir.path(), "zh", &catalog_of(&[("title", "Acme Cloud API", "")]));
    let p = pipeline(
        dir.path(),
        FakeService::translating(),
        &["Acme Cloud", "API"],
        20,
    );

    p.run_attempt("zh").await.expect("attempt");
    let prompt = &p.service().prompts()[0];
    assert!(prompt.contains("Acme Cloud, API"));
    assert!(prompt.contains("简体中文"));
    assert!(prompt.contains("(ISO code: zh)"));
}

#[tokio::test]
/// What: Entry fields other than `message`/`translation` survive a rewrite.
///
/// Inputs:
/// - Catalog file whose entry carries an `origin` array
///
/// Output:
/// - Rewritten file still has the `origin` value next to the new translation.
async fn integration_unknown_entry_fields_survive() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("vi.json"),
        r#"{"greet": {"message": "Hello", "translation": "", "origin": [["src/app.tsx", 12]]}}"#,
    )
    .expect("write");
    let p = pipeline(dir.path(), FakeService::translating(), &[], 20);

    p.run_attempt("vi").await.expect("attempt");
    let raw: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("vi.json")).expect("read"),
    )
    .expect("json");
    assert_eq!(raw["greet"]["translation"], "~Hello");
    assert_eq!(raw["greet"]["origin"][0][0], "src/app.tsx");
    assert_eq!(raw["greet"]["origin"][0][1], 12);
}
