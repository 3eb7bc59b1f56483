use crate::shared::frame::Frame;

use super::detected_text::TranslatedText;

/// Draws translations onto a copy of a base frame.
///
/// The returned frame is opaque to the scheduler; it is only ever written
/// back out in place of live frames.
pub trait OverlayRenderer: Send {
    fn render(
        &self,
        base: &Frame,
        texts: &[TranslatedText],
    ) -> Result<Frame, Box<dyn std::error::Error>>;
}
