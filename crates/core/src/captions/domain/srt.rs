use std::fmt::Write;

use super::caption_cue::CaptionCue;
use super::timecode::format_timecode;

/// Serializes cues in SubRip format: number, time range, text, blank line.
pub fn render_srt(cues: &[CaptionCue]) -> String {
    let mut out = String::new();
    for cue in cues {
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "{}\n{} --> {}\n{}\n\n",
            cue.index,
            format_timecode(cue.start),
            format_timecode(cue.end),
            cue.text
        );
    }
    out
}
