//! Shared fixtures for synchronization tests: a scripted completion service
//! and catalog directory helpers.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use catalog_fill::SyncError;
use catalog_fill::catalog::{Catalog, CatalogEntry, CatalogStore, TranslationBatch};
use catalog_fill::sync::Pipeline;
use catalog_fill::translate::{CompletionService, INPUT_MARKER, KeywordSet};

/// How the fake service answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Translate every requested key.
    Translate,
    /// Translate only the first `n` keys of each batch.
    TranslatePartial(usize),
    /// Reply with text that is not JSON.
    Garbage,
    /// Reply with an empty object.
    NoProgress,
    /// Fail the call with this message.
    Fail(String),
}

/// Completion service double that reads the batch back out of the prompt.
#[derive(Debug)]
pub struct FakeService {
    /// Reply mode.
    behavior: Behavior,
    /// Fixed source -> translation pairs; other texts become `~{text}`.
    dictionary: HashMap<String, String>,
    /// Simulated latency per call.
    delay: Duration,
    /// Calls made.
    calls: AtomicUsize,
    /// Calls currently running.
    in_flight: AtomicUsize,
    /// Highest concurrent call count observed.
    max_in_flight: AtomicUsize,
    /// Every prompt received.
    prompts: Mutex<Vec<String>>,
}

impl FakeService {
    /// What: Create a fake with the given behavior and no latency.
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            dictionary: HashMap::new(),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Translator for every key.
    pub fn translating() -> Self {
        Self::new(Behavior::Translate)
    }

    /// Fixed translations for specific source texts.
    pub fn with_dictionary(mut self, pairs: &[(&str, &str)]) -> Self {
        self.dictionary = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        self
    }

    /// Delay each call so overlapping calls become observable.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `complete` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous calls.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Copy of all prompts received.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log").clone()
    }

    /// Translation for one source text.
    fn translate(&self, text: &str) -> String {
        self.dictionary
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("~{text}"))
    }

    /// Reply text for `prompt` under the configured behavior.
    fn reply_for(&self, prompt: &str) -> Result<String, SyncError> {
        let batch = batch_from_prompt(prompt);
        let reply: TranslationBatch = match &self.behavior {
            Behavior::Translate => batch
                .iter()
                .map(|(k, v)| (k.clone(), self.translate(v)))
                .collect(),
            Behavior::TranslatePartial(n) => batch
                .iter()
                .take(*n)
                .map(|(k, v)| (k.clone(), self.translate(v)))
                .collect(),
            Behavior::Garbage => return Ok("I cannot help with that request.".to_string()),
            Behavior::NoProgress => TranslationBatch::new(),
            Behavior::Fail(message) => {
                return Err(SyncError::TranslationService(message.clone()));
            }
        };
        Ok(serde_json::to_string(&reply).expect("serialize reply"))
    }
}

impl CompletionService for FakeService {
    async fn complete(&self, prompt: &str) -> Result<String, SyncError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompt log")
            .push(prompt.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.reply_for(prompt)
    }
}

/// Batch serialized after the input marker of a prompt.
pub fn batch_from_prompt(prompt: &str) -> TranslationBatch {
    let (_, input) = prompt
        .split_once(INPUT_MARKER)
        .expect("prompt carries the input marker");
    serde_json::from_str(input.trim()).expect("prompt input is a JSON object")
}

/// Catalog from `(key, message, translation)` triples.
pub fn catalog_of(entries: &[(&str, &str, &str)]) -> Catalog {
    entries
        .iter()
        .map(|(key, message, translation)| {
            ((*key).to_string(), CatalogEntry::new(*message, *translation))
        })
        .collect()
}

/// Catalog with `total` keys `k000..`, none translated.
pub fn untranslated_catalog(total: usize) -> Catalog {
    (0..total)
        .map(|i| (format!("k{i:03}"), CatalogEntry::new(format!("Text {i}"), "")))
        .collect()
}

/// Write `catalog` as `{locale}.json` under `dir`.
pub fn write_catalog(dir: &Path, locale: &str, catalog: &Catalog) {
    let text = serde_json::to_string_pretty(catalog).expect("serialize catalog");
    std::fs::write(dir.join(format!("{locale}.json")), text).expect("write catalog");
}

/// Read `{locale}.json` under `dir` back as a catalog.
pub fn read_catalog(dir: &Path, locale: &str) -> Catalog {
    let text = std::fs::read_to_string(dir.join(format!("{locale}.json"))).expect("read catalog");
    serde_json::from_str(&text).expect("parse catalog")
}

/// Pipeline over `dir` with the given service, keywords, and batch size.
pub fn pipeline(
    dir: &Path,
    service: FakeService,
    keywords: &[&str],
    batch_size: usize,
) -> Pipeline<FakeService> {
    Pipeline::new(
        CatalogStore::new(dir),
        service,
        KeywordSet::from_text(&keywords.join("\n")),
        batch_size,
    )
    .with_site("https://example.com", "en")
}
