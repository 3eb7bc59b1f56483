/// Result of inspecting one sampled frame.
///
/// `overlay` is the rendered replacement frame, present only when the
/// sample produced translations.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSample<F> {
    pub timestamp: f64,
    pub overlay: Option<F>,
    pub has_translation: bool,
}

impl<F> FrameSample<F> {
    pub fn translated(timestamp: f64, overlay: F) -> Self {
        Self {
            timestamp,
            overlay: Some(overlay),
            has_translation: true,
        }
    }

    /// A sample with nothing to show; clears any overlay still being held.
    pub fn empty(timestamp: f64) -> Self {
        Self {
            timestamp,
            overlay: None,
            has_translation: false,
        }
    }
}
