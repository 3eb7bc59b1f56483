use std::path::Path;

use crate::audio::domain::audio_segment::AudioSegment;

/// Decodes the audio track of a media file.
pub trait AudioReader: Send {
    /// Decode to mono PCM at `target_sample_rate`.
    /// Returns `None` if the file has no audio track.
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>>;
}
