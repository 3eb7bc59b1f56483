use super::audio_segment::AudioSegment;
use crate::captions::domain::transcript_segment::TranscriptSegment;

/// Speech-to-text port.
///
/// Implementations return sentence-level segments with times relative to
/// the start of `audio`, ordered by start time.
pub trait Transcriber: Send {
    fn transcribe(
        &self,
        audio: &AudioSegment,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, Box<dyn std::error::Error>>;
}
