use std::fs;
use std::path::Path;

use crate::captions::domain::caption_cue::CaptionCue;
use crate::captions::domain::srt::render_srt;
use crate::captions::domain::subtitle_writer::SubtitleWriter;

/// Writes cues as a UTF-8 `.srt` file, replacing any existing file.
pub struct SrtFileWriter;

impl SubtitleWriter for SrtFileWriter {
    fn write(&self, path: &Path, cues: &[CaptionCue]) -> Result<(), Box<dyn std::error::Error>> {
        fs::write(path, render_srt(cues))
            .map_err(|e| format!("Failed to write subtitles to {}: {e}", path.display()))?;
        log::debug!("Wrote {} cues to {}", cues.len(), path.display());
        Ok(())
    }
}
