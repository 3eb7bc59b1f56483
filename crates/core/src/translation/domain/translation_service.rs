use std::sync::atomic::{AtomicBool, Ordering};

use super::translator::Translator;

pub const FAILED_MARKER: &str = "[translation failed]";
pub const UNAVAILABLE_MARKER: &str = "[translation unavailable]";

/// Translates text batches without ever failing the caller.
///
/// Every input item yields exactly one output item. When the backend
/// returns the wrong number of items the batch is retried one item at a
/// time; items that still fail, and every item of a batch whose request
/// errored, come back as `"[translation failed] <source>"`. Without a
/// backend every item is `"[translation unavailable] <source>"`.
pub struct TranslationService {
    translator: Option<Box<dyn Translator>>,
    source_language: String,
    target_language: String,
    warned_unavailable: AtomicBool,
}

impl TranslationService {
    pub fn new(
        translator: Option<Box<dyn Translator>>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            translator,
            source_language: source_language.into(),
            target_language: target_language.into(),
            warned_unavailable: AtomicBool::new(false),
        }
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    pub fn is_available(&self) -> bool {
        self.translator.is_some()
    }

    pub fn translate_all(&self, texts: &[String]) -> Vec<String> {
        if texts.is_empty() {
            return Vec::new();
        }

        let Some(translator) = self.translator.as_deref() else {
            if !self.warned_unavailable.swap(true, Ordering::Relaxed) {
                log::warn!("No translation backend configured, leaving text untranslated");
            }
            return texts.iter().map(|t| marked(UNAVAILABLE_MARKER, t)).collect();
        };

        log::info!(
            "Translating {} items ({} -> {})",
            texts.len(),
            self.source_language,
            self.target_language
        );

        match translator.translate(texts, &self.source_language, &self.target_language) {
            Ok(translated) if translated.len() == texts.len() => translated,
            Ok(translated) => {
                log::warn!(
                    "Batch returned {} items for {} inputs, retrying one at a time",
                    translated.len(),
                    texts.len()
                );
                texts
                    .iter()
                    .map(|text| self.translate_single(translator, text))
                    .collect()
            }
            Err(e) => {
                log::error!("Batch translation failed: {e}");
                texts.iter().map(|t| marked(FAILED_MARKER, t)).collect()
            }
        }
    }

    fn translate_single(&self, translator: &dyn Translator, text: &str) -> String {
        match translator.translate_one(text, &self.source_language, &self.target_language) {
            Ok(translated) => translated,
            Err(e) => {
                log::warn!("Translation of {text:?} failed: {e}");
                marked(FAILED_MARKER, text)
            }
        }
    }
}

fn marked(marker: &str, text: &str) -> String {
    format!("{marker} {text}")
}
