use crate::shared::text_box::TextBox;

/// A piece of on-screen text found by a `TextDetector`.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedText {
    pub bbox: TextBox,
    pub text: String,
    pub confidence: f32,
}

/// Detected text paired with its translation, ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslatedText {
    pub detected: DetectedText,
    pub translated: String,
}
