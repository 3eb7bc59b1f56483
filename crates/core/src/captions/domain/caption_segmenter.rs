use std::mem;

use super::caption_cue::CaptionCue;
use super::caption_error::CaptionError;
use super::transcript_segment::TranslatedSegment;

/// Most lines one translated segment may turn into.
pub const MAX_CAPTION_LINES: usize = 3;

/// What happens to wrapped lines past [`MAX_CAPTION_LINES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Drop the extra lines. Lossy, but keeps every line within width.
    #[default]
    Truncate,
    /// Append the extra lines to the last kept line, which may then exceed
    /// the width limit.
    MergeIntoLast,
}

/// Re-flows translated text into width-limited lines and time-sliced cues.
///
/// Widths are counted in characters (Unicode scalar values), not bytes, so
/// Korean, Japanese and Latin text wrap the same way.
#[derive(Debug, Clone)]
pub struct CaptionSegmenter {
    max_chars: usize,
    overflow: OverflowPolicy,
}

impl CaptionSegmenter {
    pub fn new(max_chars: usize, overflow: OverflowPolicy) -> Result<Self, CaptionError> {
        if max_chars == 0 {
            return Err(CaptionError::InvalidMaxChars);
        }
        Ok(Self {
            max_chars,
            overflow,
        })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Greedy word wrap into 1..=3 lines.
    ///
    /// Text that already fits is returned untouched (including inner
    /// whitespace). Words are never broken: a word wider than the limit
    /// becomes a line of its own.
    pub fn split_lines(&self, text: &str) -> Vec<String> {
        if char_len(text) <= self.max_chars {
            return vec![text.to_string()];
        }

        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for word in text.split_whitespace() {
            let word_len = char_len(word);
            let joined_len = if current.is_empty() {
                word_len
            } else {
                current_len + 1 + word_len
            };

            if joined_len <= self.max_chars {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_len = joined_len;
            } else {
                if !current.is_empty() {
                    lines.push(mem::take(&mut current));
                }
                current.push_str(word);
                current_len = word_len;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        if lines.is_empty() {
            // Whitespace-only input wider than the limit.
            lines.push(String::new());
        }

        self.limit_lines(lines)
    }

    fn limit_lines(&self, mut lines: Vec<String>) -> Vec<String> {
        if lines.len() <= MAX_CAPTION_LINES {
            return lines;
        }
        let overflow = lines.split_off(MAX_CAPTION_LINES);
        match self.overflow {
            OverflowPolicy::Truncate => {
                log::debug!("Dropping {} wrapped caption line(s)", overflow.len());
            }
            OverflowPolicy::MergeIntoLast => {
                let last = &mut lines[MAX_CAPTION_LINES - 1];
                for line in overflow {
                    last.push(' ');
                    last.push_str(&line);
                }
            }
        }
        lines
    }

    /// Turns translated segments into numbered cues.
    ///
    /// A segment that wraps into N lines is split into N cues of equal
    /// duration that tile `[start, end]` exactly. Cue numbers run from 1
    /// across the whole output.
    pub fn build_cues(&self, segments: &[TranslatedSegment]) -> Vec<CaptionCue> {
        let mut cues = Vec::with_capacity(segments.len());
        let mut index: u32 = 1;

        for segment in segments {
            let start = segment.start();
            let end = segment.end();
            if end <= start {
                log::debug!("Segment at {start:.3}s has non-positive duration; emitting as-is");
            }

            let lines = self.split_lines(segment.translated_text.trim());
            let count = lines.len();
            let step = (end - start) / count as f64;

            for (i, text) in lines.into_iter().enumerate() {
                let cue_end = if i + 1 == count {
                    end
                } else {
                    start + (i + 1) as f64 * step
                };
                cues.push(CaptionCue {
                    index,
                    start: start + i as f64 * step,
                    end: cue_end,
                    text,
                });
                index += 1;
            }
        }

        cues
    }
}

impl Default for CaptionSegmenter {
    fn default() -> Self {
        Self {
            max_chars: crate::shared::constants::DEFAULT_MAX_CAPTION_CHARS,
            overflow: OverflowPolicy::default(),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::domain::transcript_segment::TranscriptSegment;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn segmenter(max_chars: usize) -> CaptionSegmenter {
        CaptionSegmenter::new(max_chars, OverflowPolicy::Truncate).unwrap()
    }

    fn translated(start: f64, end: f64, text: &str) -> TranslatedSegment {
        TranslatedSegment {
            source: TranscriptSegment {
                start,
                end,
                text: String::new(),
            },
            translated_text: text.to_string(),
        }
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn test_zero_width_rejected() {
        assert_eq!(
            CaptionSegmenter::new(0, OverflowPolicy::Truncate).unwrap_err(),
            CaptionError::InvalidMaxChars
        );
    }

    #[test]
    fn test_default_width_and_policy() {
        let s = CaptionSegmenter::default();
        assert_eq!(s.max_chars(), 40);
        assert_eq!(s.overflow(), OverflowPolicy::Truncate);
    }

    // ── split_lines ──────────────────────────────────────────────────

    #[rstest]
    #[case::empty("")]
    #[case::short("hello world")]
    #[case::exact_width("abcdefghij")]
    #[case::inner_spacing_kept("a  b   c")]
    #[case::hangul("안녕하세요 여러분")]
    fn test_fitting_text_returned_unchanged(#[case] text: &str) {
        assert_eq!(segmenter(10).split_lines(text), vec![text.to_string()]);
    }

    #[test]
    fn test_greedy_packing() {
        let lines = segmenter(10).split_lines("aaa bbb ccc ddd eee");
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd", "eee"]);
    }

    #[test]
    fn test_word_exactly_filling_line() {
        let lines = segmenter(7).split_lines("aaa bbb ccc");
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
    }

    #[test]
    fn test_oversized_word_not_split() {
        let lines = segmenter(5).split_lines("hi supercalifragilistic yo");
        assert_eq!(lines, vec!["hi", "supercalifragilistic", "yo"]);
    }

    #[test]
    fn test_oversized_first_word() {
        let lines = segmenter(5).split_lines("supercalifragilistic yo");
        assert_eq!(lines, vec!["supercalifragilistic", "yo"]);
    }

    #[test]
    fn test_width_counts_characters_not_bytes() {
        // Each syllable is 3 bytes in UTF-8; 4 + 1 + 4 = 9 chars fits in 9.
        let lines = segmenter(9).split_lines("가나다라 마바사아 자차카타");
        assert_eq!(lines, vec!["가나다라 마바사아", "자차카타"]);
    }

    #[test]
    fn test_runs_of_whitespace_collapse_when_wrapping() {
        let lines = segmenter(8).split_lines("aaa   bbb\tccc\n ddd");
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_whitespace_only_wider_than_limit() {
        assert_eq!(segmenter(2).split_lines("     "), vec![String::new()]);
    }

    #[rstest]
    #[case::four_lines("aa bb cc dd", 2)]
    #[case::many_lines("a b c d e f g h i j k l m n o p", 1)]
    #[case::long_sentence(
        "the quick brown fox jumps over the lazy dog and keeps running far away",
        12
    )]
    fn test_never_more_than_three_lines(#[case] text: &str, #[case] width: usize) {
        assert!(segmenter(width).split_lines(text).len() <= MAX_CAPTION_LINES);
    }

    #[rstest]
    #[case("the quick brown fox jumps over the lazy dog", 10)]
    #[case("a bb ccc dddd eeeee ffffff", 6)]
    #[case("one extraordinarily long word", 8)]
    fn test_lines_fit_or_are_single_words(#[case] text: &str, #[case] width: usize) {
        for line in segmenter(width).split_lines(text) {
            let fits = line.chars().count() <= width;
            let single_word = !line.contains(' ');
            assert!(fits || single_word, "line {line:?} exceeds {width}");
        }
    }

    #[test]
    fn test_truncate_drops_overflow() {
        let lines = segmenter(2).split_lines("aa bb cc dd ee");
        assert_eq!(lines, vec!["aa", "bb", "cc"]);
    }

    #[test]
    fn test_merge_into_last_keeps_all_words() {
        let s = CaptionSegmenter::new(2, OverflowPolicy::MergeIntoLast).unwrap();
        let lines = s.split_lines("aa bb cc dd ee");
        assert_eq!(lines, vec!["aa", "bb", "cc dd ee"]);
    }

    #[test]
    fn test_merge_into_last_noop_within_limit() {
        let s = CaptionSegmenter::new(2, OverflowPolicy::MergeIntoLast).unwrap();
        assert_eq!(s.split_lines("aa bb cc"), vec!["aa", "bb", "cc"]);
    }

    // ── build_cues ───────────────────────────────────────────────────

    #[test]
    fn test_single_line_spans_segment() {
        let cues = segmenter(40).build_cues(&[translated(1.5, 4.0, "안녕하세요")]);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].index, 1);
        assert_relative_eq!(cues[0].start, 1.5);
        assert_relative_eq!(cues[0].end, 4.0);
        assert_eq!(cues[0].text, "안녕하세요");
    }

    #[test]
    fn test_three_lines_split_time_evenly() {
        let cues = segmenter(10).build_cues(&[translated(10.0, 13.0, "aaa bbb ccc ddd eee")]);
        assert_eq!(cues.len(), 3);
        let bounds: Vec<(f64, f64)> = cues.iter().map(|c| (c.start, c.end)).collect();
        for (actual, expected) in bounds.iter().zip([(10.0, 11.0), (11.0, 12.0), (12.0, 13.0)]) {
            assert_relative_eq!(actual.0, expected.0);
            assert_relative_eq!(actual.1, expected.1);
        }
        assert_eq!(cues[2].text, "eee");
    }

    #[test]
    fn test_sub_cues_tile_segment_exactly() {
        let cues = segmenter(3).build_cues(&[translated(0.1, 0.8, "aa bb cc")]);
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].start, 0.1);
        assert_eq!(cues[2].end, 0.8);
        for pair in cues.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_translation_is_trimmed() {
        let cues = segmenter(40).build_cues(&[translated(0.0, 1.0, "  다음 슬라이드\n")]);
        assert_eq!(cues[0].text, "다음 슬라이드");
    }

    #[test]
    fn test_indices_continuous_across_segments() {
        let segments = vec![
            translated(0.0, 2.0, "aaa bbb ccc"),
            translated(2.0, 3.0, "short"),
            translated(3.0, 6.0, "ddd eee fff ggg"),
        ];
        let cues = segmenter(7).build_cues(&segments);
        let indices: Vec<u32> = cues.iter().map(|c| c.index).collect();
        let expected: Vec<u32> = (1..=cues.len() as u32).collect();
        assert_eq!(indices, expected);
        assert_eq!(cues.len(), 5);
    }

    #[test]
    fn test_zero_duration_segment_propagates() {
        let cues = segmenter(3).build_cues(&[translated(5.0, 5.0, "aa bb")]);
        assert_eq!(cues.len(), 2);
        for cue in &cues {
            assert_relative_eq!(cue.duration(), 0.0);
        }
    }

    #[test]
    fn test_empty_translation_gives_empty_cue() {
        let cues = segmenter(10).build_cues(&[translated(0.0, 1.0, "   ")]);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "");
    }

    #[test]
    fn test_no_segments_no_cues() {
        assert!(segmenter(10).build_cues(&[]).is_empty());
    }

    #[test]
    fn test_build_cues_is_deterministic() {
        let segments = vec![
            translated(0.0, 2.5, "the quick brown fox jumps"),
            translated(2.5, 7.0, "over the lazy dog"),
        ];
        let s = segmenter(9);
        assert_eq!(s.build_cues(&segments), s.build_cues(&segments));
    }
}
