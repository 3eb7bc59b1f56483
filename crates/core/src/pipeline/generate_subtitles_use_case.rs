use std::path::{Path, PathBuf};

use crate::audio::domain::transcriber::Transcriber;
use crate::captions::domain::caption_segmenter::CaptionSegmenter;
use crate::captions::domain::subtitle_burner::SubtitleBurner;
use crate::captions::domain::subtitle_writer::SubtitleWriter;
use crate::captions::domain::transcript_segment::{TranscriptSegment, TranslatedSegment};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::{DEFAULT_OUTPUT_FORMAT, WHISPER_SAMPLE_RATE};
use crate::shared::media_format::MediaFormats;
use crate::shared::output_paths::OutputNaming;
use crate::shared::time_window::TimeWindow;
use crate::translation::domain::translation_service::TranslationService;
use crate::video::domain::audio_reader::AudioReader;

pub const SUBTITLES_TASK: &str = "subtitles";

/// Files produced by one subtitle run.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleOutcome {
    pub srt_path: PathBuf,
    /// Video with burned-in captions; `None` when burning was skipped or
    /// failed.
    pub video_path: Option<PathBuf>,
    pub cue_count: usize,
}

/// Transcribe, translate, segment into cues, write SRT, optionally burn.
pub struct GenerateSubtitlesUseCase {
    formats: MediaFormats,
    audio_reader: Box<dyn AudioReader>,
    transcriber: Box<dyn Transcriber>,
    translation: TranslationService,
    segmenter: CaptionSegmenter,
    writer: Box<dyn SubtitleWriter>,
    burner: Option<Box<dyn SubtitleBurner>>,
    naming: OutputNaming,
}

impl GenerateSubtitlesUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        formats: MediaFormats,
        audio_reader: Box<dyn AudioReader>,
        transcriber: Box<dyn Transcriber>,
        translation: TranslationService,
        segmenter: CaptionSegmenter,
        writer: Box<dyn SubtitleWriter>,
        burner: Option<Box<dyn SubtitleBurner>>,
        naming: OutputNaming,
    ) -> Self {
        Self {
            formats,
            audio_reader,
            transcriber,
            translation,
            segmenter,
            writer,
            burner,
            naming,
        }
    }

    pub fn run(
        &self,
        input: &Path,
        window: Option<TimeWindow>,
        logger: &mut dyn PipelineLogger,
    ) -> Result<SubtitleOutcome, Box<dyn std::error::Error>> {
        // 1. Fail fast on containers we don't handle
        self.formats.validate(input)?;

        // 2. Audio, cut to the window
        let audio = self
            .audio_reader
            .read_audio(input, WHISPER_SAMPLE_RATE)?
            .ok_or_else(|| format!("{} has no audio track", input.display()))?;
        let audio = match &window {
            Some(w) => audio.slice(w),
            None => audio,
        };
        logger.info(&format!(
            "Transcribing {:.1}s of audio from {}",
            audio.duration(),
            input.display()
        ));

        // 3. Transcribe; whisper times are relative to the slice
        let offset = window.as_ref().map_or(0.0, TimeWindow::start);
        let segments: Vec<TranscriptSegment> = self
            .transcriber
            .transcribe(&audio, self.translation.source_language())?
            .iter()
            .map(|s| s.shifted(offset))
            .collect();
        logger.metric("segments", segments.len() as f64);

        // 4. Translate
        let texts: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
        let translations = self.translation.translate_all(&texts);

        // 5. Cues and SRT
        let translated = TranslatedSegment::pair(segments, translations)?;
        let cues = self.segmenter.build_cues(&translated);
        logger.metric("cues", cues.len() as f64);

        let naming = self.naming.clone().with_window(window);
        let srt_path = naming.path_for(input, SUBTITLES_TASK, "srt")?;
        self.writer.write(&srt_path, &cues)?;
        logger.info(&format!("Wrote {} cues to {}", cues.len(), srt_path.display()));

        // 6. Burn-in is best effort; the SRT stands on its own
        let video_path = match &self.burner {
            Some(burner) => {
                let out = naming.path_for(input, SUBTITLES_TASK, DEFAULT_OUTPUT_FORMAT)?;
                match burner.burn(input, &srt_path, &out) {
                    Ok(()) => {
                        logger.info(&format!("Wrote subtitled video to {}", out.display()));
                        Some(out)
                    }
                    Err(e) => {
                        log::error!("Burning subtitles failed, keeping SRT only: {e}");
                        None
                    }
                }
            }
            None => None,
        };

        Ok(SubtitleOutcome {
            srt_path,
            video_path,
            cue_count: cues.len(),
        })
    }
}
