use std::path::Path;

/// Re-encodes a video with a subtitle file rendered into the picture.
pub trait SubtitleBurner: Send {
    fn burn(
        &self,
        video: &Path,
        subtitles: &Path,
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
