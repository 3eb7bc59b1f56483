use std::path::Path;

use crate::overlay::domain::detected_text::TranslatedText;
use crate::overlay::domain::frame_sample::FrameSample;
use crate::overlay::domain::overlay_renderer::OverlayRenderer;
use crate::overlay::domain::overlay_scheduler::{OverlayDecision, OverlayScheduler};
use crate::overlay::domain::text_detector::TextDetector;
use crate::overlay::domain::text_filter::TextFilter;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::DEFAULT_SAMPLE_INTERVAL_SECS;
use crate::shared::frame::Frame;
use crate::shared::time_window::TimeWindow;
use crate::shared::video_metadata::VideoMetadata;
use crate::translation::domain::translation_service::TranslationService;
use crate::video::domain::video_reader::VideoReader;
use crate::video::domain::video_writer::VideoWriter;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScreenTextOutcome {
    pub samples: usize,
    pub translated_samples: usize,
    pub frames_written: usize,
}

/// Translates on-screen Japanese text and overlays it onto the video.
///
/// Runs two passes over the source. The first samples one frame every
/// `sample_interval` seconds and renders an overlay for each sample that
/// contains text. The second re-reads every frame in the window and writes
/// either the live frame or the overlay held from the latest sample.
pub struct TranslateScreenTextUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn VideoWriter>,
    detector: Box<dyn TextDetector>,
    filter: TextFilter,
    translation: TranslationService,
    renderer: Box<dyn OverlayRenderer>,
    sample_interval: f64,
}

impl TranslateScreenTextUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn VideoWriter>,
        detector: Box<dyn TextDetector>,
        filter: TextFilter,
        translation: TranslationService,
        renderer: Box<dyn OverlayRenderer>,
    ) -> Self {
        Self {
            reader,
            writer,
            detector,
            filter,
            translation,
            renderer,
            sample_interval: DEFAULT_SAMPLE_INTERVAL_SECS,
        }
    }

    pub fn with_sample_interval(mut self, seconds: f64) -> Self {
        self.sample_interval = seconds;
        self
    }

    pub fn run(
        &mut self,
        input: &Path,
        output: &Path,
        window: Option<TimeWindow>,
        logger: &mut dyn PipelineLogger,
    ) -> Result<ScreenTextOutcome, Box<dyn std::error::Error>> {
        let metadata = self.reader.open(input)?;
        let (start_frame, end_frame) = frame_bounds(&metadata, window.as_ref());
        if end_frame <= start_frame {
            self.reader.close();
            return Err(format!(
                "window starts past the end of {} ({} frames)",
                input.display(),
                metadata.total_frames
            )
            .into());
        }
        let step = metadata.frames_per_interval(self.sample_interval);
        logger.info(&format!(
            "Sampling frames {start_frame}..{end_frame} every {step} frames ({:.1} fps)",
            metadata.fps
        ));

        let samples = self.collect_samples(&metadata, start_frame, end_frame, step, logger)?;
        self.reader.close();

        let translated_samples = samples.iter().filter(|s| s.has_translation).count();
        logger.metric("samples", samples.len() as f64);
        logger.metric("translated_samples", translated_samples as f64);

        let frames_written = self.sweep(
            input,
            output,
            &metadata,
            &samples,
            start_frame,
            end_frame,
            logger,
        )?;
        logger.metric("frames_written", frames_written as f64);

        Ok(ScreenTextOutcome {
            samples: samples.len(),
            translated_samples,
            frames_written,
        })
    }

    fn collect_samples(
        &mut self,
        metadata: &VideoMetadata,
        start_frame: usize,
        end_frame: usize,
        step: usize,
        logger: &mut dyn PipelineLogger,
    ) -> Result<Vec<FrameSample<Frame>>, Box<dyn std::error::Error>> {
        let Self {
            reader,
            detector,
            filter,
            translation,
            renderer,
            ..
        } = self;
        let total_samples = (end_frame - start_frame).div_ceil(step);
        let mut samples = Vec::with_capacity(total_samples);

        for frame in reader.frames() {
            let frame = frame?;
            let index = frame.index();
            if index >= end_frame {
                break;
            }
            if index < start_frame || (index - start_frame) % step != 0 {
                continue;
            }

            let timestamp = frame.timestamp(metadata.fps);
            let detections = match detector.detect_text(&frame) {
                Ok(found) => filter.filter(found),
                Err(e) => {
                    log::warn!("Text detection failed at {timestamp:.1}s: {e}");
                    Vec::new()
                }
            };

            if detections.is_empty() {
                samples.push(FrameSample::empty(timestamp));
            } else {
                let texts: Vec<String> = detections.iter().map(|d| d.text.clone()).collect();
                let translations = translation.translate_all(&texts);
                let paired: Vec<TranslatedText> = detections
                    .into_iter()
                    .zip(translations)
                    .map(|(detected, translated)| TranslatedText {
                        detected,
                        translated,
                    })
                    .collect();
                log::debug!("{} texts at {timestamp:.1}s", paired.len());
                samples.push(FrameSample::translated(
                    timestamp,
                    renderer.render(&frame, &paired)?,
                ));
            }
            logger.progress("sampling", samples.len(), total_samples);
        }

        Ok(samples)
    }

    #[allow(clippy::too_many_arguments)]
    fn sweep(
        &mut self,
        input: &Path,
        output: &Path,
        metadata: &VideoMetadata,
        samples: &[FrameSample<Frame>],
        start_frame: usize,
        end_frame: usize,
        logger: &mut dyn PipelineLogger,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let mut scheduler = OverlayScheduler::new(samples, metadata.fps, start_frame)?;
        let out_meta = VideoMetadata {
            total_frames: end_frame - start_frame,
            ..metadata.clone()
        };

        self.reader.open(input)?;
        self.writer.open(output, &out_meta)?;

        let mut written = 0;
        for frame in self.reader.frames() {
            let frame = frame?;
            let index = frame.index();
            if index >= end_frame {
                break;
            }
            if index < start_frame {
                continue;
            }

            let relative = index - start_frame;
            match scheduler.next(relative)? {
                OverlayDecision::Base => self.writer.write(&frame.with_index(relative))?,
                OverlayDecision::Overlay(overlay) => {
                    self.writer.write(&overlay.with_index(relative))?
                }
            }
            written += 1;
            logger.progress("writing", written, out_meta.total_frames);
        }

        self.writer.close()?;
        self.reader.close();
        Ok(written)
    }
}

/// `[start, end)` frame indices to process, clamped to the stream length
/// when it is known.
fn frame_bounds(metadata: &VideoMetadata, window: Option<&TimeWindow>) -> (usize, usize) {
    let (start, end) = match window {
        Some(w) => w.frame_range(metadata.fps),
        None => (0, metadata.total_frames),
    };
    if metadata.total_frames > 0 {
        (start, end.min(metadata.total_frames))
    } else {
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::domain::detected_text::DetectedText;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use crate::shared::text_box::TextBox;
    use crate::translation::domain::translator::{TranslationError, Translator};
    use std::sync::{Arc, Mutex};

    // ── Stubs ──

    /// Emits `total` 1x1 RGB frames whose pixel value is the frame index.
    struct StubVideoReader {
        metadata: VideoMetadata,
        opens: Arc<Mutex<usize>>,
    }

    impl VideoReader for StubVideoReader {
        fn open(&mut self, _: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            *self.opens.lock().unwrap() += 1;
            Ok(self.metadata.clone())
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            let total = self.metadata.total_frames;
            Box::new((0..total).map(|i| -> Result<Frame, Box<dyn std::error::Error>> {
                Ok(Frame::new(vec![i as u8; 3], 1, 1, 3, i))
            }))
        }

        fn close(&mut self) {}
    }

    struct CapturingWriter {
        frames: Arc<Mutex<Vec<Frame>>>,
        opened_with: Arc<Mutex<Option<VideoMetadata>>>,
        closed: Arc<Mutex<bool>>,
    }

    impl VideoWriter for CapturingWriter {
        fn open(
            &mut self,
            _: &Path,
            metadata: &VideoMetadata,
        ) -> Result<(), Box<dyn std::error::Error>> {
            *self.opened_with.lock().unwrap() = Some(metadata.clone());
            Ok(())
        }

        fn write(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.frames.lock().unwrap().push(frame.clone());
            Ok(())
        }

        fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
    }

    /// Finds slide text on the listed frames, English noise everywhere.
    struct StubDetector {
        text_frames: Vec<usize>,
        fail_frames: Vec<usize>,
    }

    impl TextDetector for StubDetector {
        fn detect_text(
            &self,
            frame: &Frame,
        ) -> Result<Vec<DetectedText>, Box<dyn std::error::Error>> {
            if self.fail_frames.contains(&frame.index()) {
                return Err("ocr crashed".into());
            }
            let mut found = vec![DetectedText {
                bbox: TextBox::new(0.0, 0.0, 1.0, 1.0),
                text: "Page 1".to_string(),
                confidence: 0.99,
            }];
            if self.text_frames.contains(&frame.index()) {
                found.push(DetectedText {
                    bbox: TextBox::new(0.0, 0.0, 1.0, 1.0),
                    text: "まとめ".to_string(),
                    confidence: 0.9,
                });
            }
            Ok(found)
        }
    }

    struct StubTranslator {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl Translator for StubTranslator {
        fn translate(
            &self,
            texts: &[String],
            _: &str,
            _: &str,
        ) -> Result<Vec<String>, TranslationError> {
            self.seen.lock().unwrap().extend(texts.iter().cloned());
            Ok(texts.iter().map(|_| "요약".to_string()).collect())
        }
    }

    /// Paints the whole frame 200 + source index so overlays are traceable.
    struct StubRenderer;

    impl OverlayRenderer for StubRenderer {
        fn render(
            &self,
            base: &Frame,
            texts: &[TranslatedText],
        ) -> Result<Frame, Box<dyn std::error::Error>> {
            assert!(texts.iter().all(|t| t.translated == "요약"));
            let value = 200 + base.index() as u8;
            Ok(Frame::new(
                vec![value; base.data().len()],
                base.width(),
                base.height(),
                base.channels(),
                base.index(),
            ))
        }
    }

    // ── Fixture ──

    struct Harness {
        use_case: TranslateScreenTextUseCase,
        frames: Arc<Mutex<Vec<Frame>>>,
        opened_with: Arc<Mutex<Option<VideoMetadata>>>,
        closed: Arc<Mutex<bool>>,
        opens: Arc<Mutex<usize>>,
        seen: Arc<Mutex<Vec<String>>>,
    }

    fn harness(total_frames: usize, text_frames: Vec<usize>, fail_frames: Vec<usize>) -> Harness {
        let frames = Arc::new(Mutex::new(Vec::new()));
        let opened_with = Arc::new(Mutex::new(None));
        let closed = Arc::new(Mutex::new(false));
        let opens = Arc::new(Mutex::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let metadata = VideoMetadata {
            width: 1,
            height: 1,
            fps: 1.0,
            total_frames,
            codec: "h264".to_string(),
            source_path: None,
        };

        let use_case = TranslateScreenTextUseCase::new(
            Box::new(StubVideoReader {
                metadata,
                opens: opens.clone(),
            }),
            Box::new(CapturingWriter {
                frames: frames.clone(),
                opened_with: opened_with.clone(),
                closed: closed.clone(),
            }),
            Box::new(StubDetector {
                text_frames,
                fail_frames,
            }),
            TextFilter::default(),
            TranslationService::new(
                Some(Box::new(StubTranslator { seen: seen.clone() })),
                "ja",
                "Korean",
            ),
            Box::new(StubRenderer),
        )
        .with_sample_interval(2.0);

        Harness {
            use_case,
            frames,
            opened_with,
            closed,
            opens,
            seen,
        }
    }

    fn pixel_values(frames: &[Frame]) -> Vec<u8> {
        frames.iter().map(|f| f.data()[0]).collect()
    }

    #[test]
    fn test_overlay_held_until_next_sample() {
        // Samples at 0, 2, 4, 6; only frame 2 has Japanese text.
        let mut h = harness(8, vec![2], vec![]);

        let outcome = h
            .use_case
            .run(Path::new("talk.mp4"), Path::new("out.mp4"), None, &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(
            outcome,
            ScreenTextOutcome {
                samples: 4,
                translated_samples: 1,
                frames_written: 8,
            }
        );
        let frames = h.frames.lock().unwrap();
        assert_eq!(pixel_values(&frames), vec![0, 1, 202, 202, 4, 5, 6, 7]);
        assert_eq!(*h.opens.lock().unwrap(), 2);
        assert!(*h.closed.lock().unwrap());
    }

    #[test]
    fn test_only_filtered_text_is_translated() {
        let mut h = harness(4, vec![0], vec![]);
        h.use_case
            .run(Path::new("talk.mp4"), Path::new("out.mp4"), None, &mut NullPipelineLogger)
            .unwrap();
        assert_eq!(*h.seen.lock().unwrap(), vec!["まとめ".to_string()]);
    }

    #[test]
    fn test_window_renumbers_output_frames() {
        let mut h = harness(10, vec![4], vec![]);
        let window = TimeWindow::new(2.0, 7.0).unwrap();

        let outcome = h
            .use_case
            .run(
                Path::new("talk.mp4"),
                Path::new("out.mp4"),
                Some(window),
                &mut NullPipelineLogger,
            )
            .unwrap();

        // Samples at 2, 4, 6 relative to the window start.
        assert_eq!(outcome.samples, 3);
        assert_eq!(outcome.frames_written, 5);
        let frames = h.frames.lock().unwrap();
        assert_eq!(pixel_values(&frames), vec![2, 3, 204, 204, 6]);
        assert_eq!(
            frames.iter().map(Frame::index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4]
        );
        assert_eq!(h.opened_with.lock().unwrap().as_ref().unwrap().total_frames, 5);
    }

    #[test]
    fn test_detection_failure_treated_as_no_text() {
        let mut h = harness(6, vec![0, 2], vec![2]);

        let outcome = h
            .use_case
            .run(Path::new("talk.mp4"), Path::new("out.mp4"), None, &mut NullPipelineLogger)
            .unwrap();

        assert_eq!(outcome.translated_samples, 1);
        let frames = h.frames.lock().unwrap();
        assert_eq!(pixel_values(&frames), vec![200, 200, 2, 3, 4, 5]);
    }

    #[test]
    fn test_window_past_end_is_error() {
        let mut h = harness(5, vec![], vec![]);
        let window = TimeWindow::new(10.0, 20.0).unwrap();
        let result = h.use_case.run(
            Path::new("talk.mp4"),
            Path::new("out.mp4"),
            Some(window),
            &mut NullPipelineLogger,
        );
        assert!(result.is_err());
        assert!(h.frames.lock().unwrap().is_empty());
    }

    #[test]
    fn test_frame_bounds_clamped_to_stream() {
        let metadata = VideoMetadata {
            width: 1,
            height: 1,
            fps: 30.0,
            total_frames: 900,
            codec: "h264".to_string(),
            source_path: None,
        };
        let window = TimeWindow::new(20.0, 60.0).unwrap();
        assert_eq!(frame_bounds(&metadata, Some(&window)), (600, 900));
        assert_eq!(frame_bounds(&metadata, None), (0, 900));
    }
}
