use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    pub fn duration(&self) -> f64 {
        if self.fps > 0.0 {
            self.total_frames as f64 / self.fps
        } else {
            0.0
        }
    }

    /// Frames between two samples taken `interval_secs` apart (never zero).
    pub fn frames_per_interval(&self, interval_secs: f64) -> usize {
        ((self.fps * interval_secs).round() as usize).max(1)
    }
}
