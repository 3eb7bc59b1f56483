pub const WHISPER_MODEL_NAME: &str = "ggml-base.bin";
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

pub const DEFAULT_SOURCE_LANGUAGE: &str = "ja";
pub const DEFAULT_TARGET_LANGUAGE: &str = "Korean";

pub const DEFAULT_MAX_CAPTION_CHARS: usize = 40;

/// Seconds between OCR samples (~one slide change).
pub const DEFAULT_SAMPLE_INTERVAL_SECS: f64 = 10.0;
pub const DEFAULT_OCR_CONFIDENCE: f32 = 0.5;
pub const DEFAULT_JAPANESE_RATIO: f64 = 0.3;

pub const DEFAULT_BURN_CRF: u32 = 20;

pub const DEFAULT_INPUT_FORMATS: &[&str] =
    &["mp4", "mov", "avi", "mkv", "wmv", "flv", "webm", "m4v"];
pub const DEFAULT_OUTPUT_FORMAT: &str = "mp4";
pub const DEFAULT_FILENAME_PATTERN: &str = "{stem}_{task}.{ext}";
