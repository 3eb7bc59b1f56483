use super::caption_error::CaptionError;

/// One recognized utterance with its time span in seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl TranscriptSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Moves the segment by `offset` seconds, e.g. from clip-relative to
    /// source-relative time after transcribing a window.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            text: self.text.clone(),
        }
    }
}

/// A transcript segment and its translation.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslatedSegment {
    pub source: TranscriptSegment,
    pub translated_text: String,
}

impl TranslatedSegment {
    pub fn start(&self) -> f64 {
        self.source.start
    }

    pub fn end(&self) -> f64 {
        self.source.end
    }

    /// Zips segments with translations index by index.
    ///
    /// Lengths must match; recovering from a short translation batch is
    /// the translation layer's job, not something to paper over here.
    pub fn pair(
        segments: Vec<TranscriptSegment>,
        translations: Vec<String>,
    ) -> Result<Vec<TranslatedSegment>, CaptionError> {
        if segments.len() != translations.len() {
            return Err(CaptionError::LengthMismatch {
                segments: segments.len(),
                translations: translations.len(),
            });
        }
        Ok(segments
            .into_iter()
            .zip(translations)
            .map(|(source, translated_text)| TranslatedSegment {
                source,
                translated_text,
            })
            .collect())
    }
}
