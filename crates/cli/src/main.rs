use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use subtitler_core::audio::infrastructure::whisper_transcriber::WhisperTranscriber;
use subtitler_core::captions::domain::caption_segmenter::{CaptionSegmenter, OverflowPolicy};
use subtitler_core::captions::domain::subtitle_burner::SubtitleBurner;
use subtitler_core::captions::infrastructure::ffmpeg_subtitle_burner::FfmpegSubtitleBurner;
use subtitler_core::captions::infrastructure::srt_file_writer::SrtFileWriter;
use subtitler_core::pipeline::generate_subtitles_use_case::GenerateSubtitlesUseCase;
use subtitler_core::pipeline::pipeline_logger::{PipelineLogger, StdoutPipelineLogger};
use subtitler_core::shared::constants::{
    DEFAULT_BURN_CRF, DEFAULT_FILENAME_PATTERN, DEFAULT_MAX_CAPTION_CHARS,
    DEFAULT_SOURCE_LANGUAGE, DEFAULT_TARGET_LANGUAGE, WHISPER_MODEL_NAME,
};
use subtitler_core::shared::media_format::MediaFormats;
use subtitler_core::shared::model_resolver::{self, ModelSource};
use subtitler_core::shared::output_paths::OutputNaming;
use subtitler_core::shared::time_window::TimeWindow;
use subtitler_core::translation::domain::translation_service::TranslationService;
use subtitler_core::translation::domain::translator::Translator;
use subtitler_core::translation::infrastructure::openai_translator::{
    OpenAiTranslator, DEFAULT_OPENAI_MODEL,
};
use subtitler_core::video::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;

/// Transcribe a talk, translate it and write (or burn in) subtitles.
#[derive(Parser)]
#[command(name = "subtitler")]
struct Cli {
    /// Input video file.
    input: PathBuf,

    /// Directory for the SRT and subtitled video (default: next to the input).
    #[arg(long, env = "OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Start of the section to process, in seconds (requires --end).
    #[arg(long)]
    start: Option<f64>,

    /// End of the section to process, in seconds (requires --start).
    #[arg(long)]
    end: Option<f64>,

    /// Spoken language passed to Whisper.
    #[arg(long, env = "SOURCE_LANGUAGE", default_value = DEFAULT_SOURCE_LANGUAGE)]
    source_lang: String,

    /// Language to translate captions into.
    #[arg(long, env = "TARGET_LANGUAGE", default_value = DEFAULT_TARGET_LANGUAGE)]
    target_lang: String,

    /// Maximum characters per caption line.
    #[arg(long, default_value_t = DEFAULT_MAX_CAPTION_CHARS)]
    max_chars: usize,

    /// What to do with text beyond three lines.
    #[arg(long, value_enum, default_value = "truncate")]
    overflow: Overflow,

    /// Only write the SRT file; skip burning subtitles into the video.
    #[arg(long)]
    no_burn: bool,

    /// H.264 CRF for the subtitled video (0=lossless, 51=worst).
    #[arg(long, default_value_t = DEFAULT_BURN_CRF)]
    crf: u32,

    /// Whisper ggml model file name.
    #[arg(long, env = "WHISPER_MODEL", default_value = WHISPER_MODEL_NAME)]
    whisper_model: String,

    /// Comma-separated list of accepted input extensions.
    #[arg(long, env = "SUPPORTED_INPUT_FORMATS")]
    formats: Option<String>,

    /// Output file name pattern ({stem}, {task}, {ext}).
    #[arg(long, env = "OUTPUT_FILENAME_PATTERN", default_value = DEFAULT_FILENAME_PATTERN)]
    filename_pattern: String,

    /// OpenAI API key; without it captions are left untranslated.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Chat model used for translation.
    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_OPENAI_MODEL)]
    openai_model: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Overflow {
    /// Drop lines beyond the third.
    Truncate,
    /// Append extra lines to the third line.
    Merge,
}

impl From<Overflow> for OverflowPolicy {
    fn from(value: Overflow) -> Self {
        match value {
            Overflow::Truncate => OverflowPolicy::Truncate,
            Overflow::Merge => OverflowPolicy::MergeIntoLast,
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let window = validate(&cli)?;

    let formats = match &cli.formats {
        Some(list) => MediaFormats::parse(list),
        None => MediaFormats::default(),
    };
    // Reject the input before spending time on a model download.
    formats.validate(&cli.input)?;

    let transcriber = build_transcriber(&cli.whisper_model)?;
    let translation = TranslationService::new(
        build_translator(&cli),
        cli.source_lang.clone(),
        cli.target_lang.clone(),
    );
    let segmenter = CaptionSegmenter::new(cli.max_chars, cli.overflow.into())?;
    let burner: Option<Box<dyn SubtitleBurner>> = if cli.no_burn {
        None
    } else {
        Some(Box::new(FfmpegSubtitleBurner::new().with_crf(cli.crf)))
    };
    let naming = OutputNaming::new(cli.output_dir.clone(), cli.filename_pattern.clone());

    let use_case = GenerateSubtitlesUseCase::new(
        formats,
        Box::new(FfmpegAudioReader),
        Box::new(transcriber),
        translation,
        segmenter,
        Box::new(SrtFileWriter),
        burner,
        naming,
    );

    let mut logger = StdoutPipelineLogger::default();
    let outcome = use_case.run(&cli.input, window, &mut logger)?;
    logger.summary();

    log::info!("Subtitles written to {}", outcome.srt_path.display());
    match outcome.video_path {
        Some(video) => log::info!("Subtitled video written to {}", video.display()),
        None if !cli.no_burn => log::warn!("Subtitled video was not produced; SRT only"),
        None => {}
    }
    Ok(())
}

fn build_transcriber(model_name: &str) -> Result<WhisperTranscriber, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {model_name}");
    let model_path = model_resolver::resolve(
        &ModelSource::whisper(model_name),
        None,
        Some(Box::new(download_progress)),
    )?;
    eprintln!();
    WhisperTranscriber::new(&model_path)
}

fn build_translator(cli: &Cli) -> Option<Box<dyn Translator>> {
    let key = cli.openai_api_key.as_deref().filter(|k| !k.trim().is_empty())?;
    Some(Box::new(
        OpenAiTranslator::new(key).with_model(cli.openai_model.clone()),
    ))
}

fn validate(cli: &Cli) -> Result<Option<TimeWindow>, Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.max_chars == 0 {
        return Err("Max chars must be a positive integer".into());
    }
    if cli.crf > 51 {
        return Err(format!("CRF must be between 0 and 51, got {}", cli.crf).into());
    }
    match (cli.start, cli.end) {
        (Some(start), Some(end)) => Ok(Some(TimeWindow::new(start, end)?)),
        (None, None) => Ok(None),
        _ => Err("--start and --end must be given together".into()),
    }
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading Whisper model... {pct}%");
    } else {
        eprint!("\rDownloading Whisper model... {downloaded} bytes");
    }
}
