pub mod constants;
pub mod frame;
pub mod media_format;
pub mod model_resolver;
pub mod output_paths;
pub mod text_box;
pub mod time_window;
pub mod video_metadata;
