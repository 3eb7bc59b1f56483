pub mod generate_subtitles_use_case;
pub mod pipeline_logger;
pub mod translate_screen_text_use_case;
