use crate::shared::frame::Frame;

use super::detected_text::DetectedText;

/// OCR port: finds text regions in a frame.
///
/// Box coordinates are in the frame's own pixel space. Detectors that
/// upscale internally must map boxes back (see `TextBox::scaled`).
pub trait TextDetector: Send {
    fn detect_text(
        &self,
        frame: &Frame,
    ) -> Result<Vec<DetectedText>, Box<dyn std::error::Error>>;
}
