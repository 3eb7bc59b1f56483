pub mod detected_text;
pub mod frame_sample;
pub mod overlay_renderer;
pub mod overlay_scheduler;
pub mod text_detector;
pub mod text_filter;
