pub mod caption_cue;
pub mod caption_error;
pub mod caption_segmenter;
pub mod srt;
pub mod subtitle_burner;
pub mod subtitle_writer;
pub mod timecode;
pub mod transcript_segment;
