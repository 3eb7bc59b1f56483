pub mod ffmpeg_subtitle_burner;
pub mod srt_file_writer;
