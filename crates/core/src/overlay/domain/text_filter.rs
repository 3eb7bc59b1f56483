use crate::shared::constants::{DEFAULT_JAPANESE_RATIO, DEFAULT_OCR_CONFIDENCE};

use super::detected_text::DetectedText;

const JAPANESE_RANGES: [(u32, u32); 4] = [
    (0x3040, 0x309F), // hiragana
    (0x30A0, 0x30FF), // katakana
    (0x4E00, 0x9FAF), // CJK ideographs
    (0xFF65, 0xFF9F), // half-width katakana
];

/// Keeps OCR results that are confident and mostly Japanese script.
#[derive(Clone, Debug)]
pub struct TextFilter {
    min_confidence: f32,
    min_script_ratio: f64,
}

impl TextFilter {
    pub fn new(min_confidence: f32, min_script_ratio: f64) -> Self {
        Self {
            min_confidence,
            min_script_ratio,
        }
    }

    /// Drops detections at or below the confidence threshold and those
    /// without enough Japanese characters. Kept text is trimmed.
    pub fn filter(&self, detections: Vec<DetectedText>) -> Vec<DetectedText> {
        detections
            .into_iter()
            .filter(|d| d.confidence > self.min_confidence)
            .filter(|d| contains_japanese(&d.text, self.min_script_ratio))
            .map(|d| DetectedText {
                text: d.text.trim().to_string(),
                ..d
            })
            .collect()
    }
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::new(DEFAULT_OCR_CONFIDENCE, DEFAULT_JAPANESE_RATIO)
    }
}

fn is_japanese(c: char) -> bool {
    let code = c as u32;
    JAPANESE_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&code))
}

/// True when at least `min_ratio` of the trimmed text's characters are
/// hiragana, katakana or kanji. Blank text is never Japanese.
pub fn contains_japanese(text: &str, min_ratio: f64) -> bool {
    let trimmed = text.trim();
    let total = trimmed.chars().count();
    if total == 0 {
        return false;
    }
    let japanese = trimmed.chars().filter(|&c| is_japanese(c)).count();
    japanese as f64 / total as f64 >= min_ratio
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::text_box::TextBox;
    use rstest::rstest;

    fn detection(text: &str, confidence: f32) -> DetectedText {
        DetectedText {
            bbox: TextBox::new(0.0, 0.0, 100.0, 20.0),
            text: text.to_string(),
            confidence,
        }
    }

    #[rstest]
    #[case("こんにちは", true)]
    #[case("カタカナ", true)]
    #[case("日本語", true)]
    #[case("ｶﾀｶﾅ", true)]
    #[case("Hello world", false)]
    #[case("안녕하세요", false)]
    #[case("", false)]
    #[case("   ", false)]
    fn test_contains_japanese(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(contains_japanese(text, 0.3), expected);
    }

    #[test]
    fn test_ratio_threshold_is_inclusive() {
        // 3 of 10 characters are kana.
        assert!(contains_japanese("abcdefgあいう", 0.3));
        assert!(!contains_japanese("abcdefghあいう", 0.3));
    }

    #[test]
    fn test_ratio_ignores_surrounding_whitespace() {
        assert!(contains_japanese("   あa   ", 0.5));
    }

    #[test]
    fn test_filter_drops_low_confidence() {
        let filter = TextFilter::default();
        let kept = filter.filter(vec![detection("日本語", 0.9), detection("日本語", 0.5)]);
        assert_eq!(kept.len(), 1);
        assert!((kept[0].confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_filter_drops_non_japanese() {
        let filter = TextFilter::default();
        let kept = filter.filter(vec![
            detection("Slide 3", 0.99),
            detection("発表資料", 0.8),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "発表資料");
    }

    #[test]
    fn test_filter_trims_text() {
        let filter = TextFilter::new(0.1, 0.3);
        let kept = filter.filter(vec![detection("  まとめ \n", 0.6)]);
        assert_eq!(kept[0].text, "まとめ");
    }
}
