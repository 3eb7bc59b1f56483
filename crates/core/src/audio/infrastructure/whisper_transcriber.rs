use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::transcriber::Transcriber;
use crate::captions::domain::transcript_segment::TranscriptSegment;
use crate::shared::constants::WHISPER_SAMPLE_RATE;

/// Sentence-level transcription with whisper.cpp via whisper-rs.
///
/// Expects 16 kHz mono audio. The model is loaded per call so the value
/// stays cheap to construct and hold.
#[derive(Debug)]
pub struct WhisperTranscriber {
    model_path: PathBuf,
}

impl WhisperTranscriber {
    pub fn new(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
        })
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Transcriber for WhisperTranscriber {
    fn transcribe(
        &self,
        audio: &AudioSegment,
        language: &str,
    ) -> Result<Vec<TranscriptSegment>, Box<dyn std::error::Error>> {
        if audio.sample_rate() != WHISPER_SAMPLE_RATE || audio.channels() != 1 {
            return Err(format!(
                "Whisper needs {WHISPER_SAMPLE_RATE} Hz mono audio, got {} Hz x{}",
                audio.sample_rate(),
                audio.channels()
            )
            .into());
        }

        let ctx = WhisperContext::new_with_params(
            self.model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        let mut state = ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(language));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(8) as i32);

        log::info!(
            "Transcribing {:.1}s of audio ({language})",
            audio.duration()
        );
        state
            .full(params, audio.samples())
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut segments = Vec::new();
        for seg_idx in 0..state.full_n_segments() {
            let Some(segment) = state.get_segment(seg_idx) else {
                continue;
            };
            let Ok(text) = segment.to_str() else {
                continue;
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            // Segment timestamps are in centiseconds (10ms units)
            segments.push(TranscriptSegment {
                start: segment.start_timestamp() as f64 / 100.0,
                end: segment.end_timestamp() as f64 / 100.0,
                text: text.to_string(),
            });
        }

        log::info!("Transcription produced {} segments", segments.len());
        Ok(segments)
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
