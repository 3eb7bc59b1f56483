#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Request(String),
    #[error("unexpected translation response: {0}")]
    Response(String),
    #[error("expected {expected} translations, got {got}")]
    CountMismatch { expected: usize, got: usize },
}

/// Machine translation port.
///
/// `source` and `target` are passed through to the backend as given
/// (e.g. `"ja"`, `"Korean"`).
pub trait Translator: Send {
    /// Translates a batch in one request. Backends may return a different
    /// number of items than they were given; callers must check.
    fn translate(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> Result<Vec<String>, TranslationError>;

    /// Translates a single item.
    fn translate_one(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let mut out = self.translate(&[text.to_string()], source, target)?;
        if out.len() != 1 {
            return Err(TranslationError::CountMismatch {
                expected: 1,
                got: out.len(),
            });
        }
        Ok(out.remove(0))
    }
}
