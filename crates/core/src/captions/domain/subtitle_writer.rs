use std::path::Path;

use super::caption_cue::CaptionCue;

/// Persists a finished cue list as a subtitle file.
pub trait SubtitleWriter: Send {
    fn write(&self, path: &Path, cues: &[CaptionCue]) -> Result<(), Box<dyn std::error::Error>>;
}
