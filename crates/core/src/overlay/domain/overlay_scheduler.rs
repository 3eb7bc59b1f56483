use std::collections::HashMap;

use super::frame_sample::FrameSample;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SchedulerError {
    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFps(f64),
    #[error("frames must be requested in order: expected {expected}, got {got}")]
    OutOfOrder { expected: usize, got: usize },
}

/// What to write for one output frame.
#[derive(Debug, PartialEq)]
pub enum OverlayDecision<'a, F> {
    /// Pass the live frame through.
    Base,
    /// Replace the live frame with this rendered overlay.
    Overlay(&'a F),
}

impl<F> Clone for OverlayDecision<'_, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for OverlayDecision<'_, F> {}

/// Holds the most recent sample's overlay until the next sample arrives.
///
/// Samples are keyed by `round(timestamp * fps) - start_frame_offset`, so
/// frame indices are relative to the first frame of the processed window.
/// When two samples land on the same frame the later timestamp wins; a
/// sample without a translation clears whatever was being held.
///
/// The scheduler is a fold over frame indices and must be driven from
/// frame 0 upward without gaps.
pub struct OverlayScheduler<'a, F> {
    keyed: HashMap<usize, &'a FrameSample<F>>,
    current: Option<&'a FrameSample<F>>,
    expected: usize,
}

impl<'a, F> OverlayScheduler<'a, F> {
    pub fn new(
        samples: &'a [FrameSample<F>],
        fps: f64,
        start_frame_offset: usize,
    ) -> Result<Self, SchedulerError> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(SchedulerError::InvalidFps(fps));
        }

        let mut ordered: Vec<&FrameSample<F>> = samples
            .iter()
            .filter(|s| s.timestamp.is_finite())
            .collect();
        ordered.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

        let mut keyed = HashMap::with_capacity(ordered.len());
        for sample in ordered {
            let relative = (sample.timestamp * fps).round() as i64 - start_frame_offset as i64;
            if relative < 0 {
                log::debug!(
                    "Sample at {:.3}s falls before the window, ignoring",
                    sample.timestamp
                );
                continue;
            }
            keyed.insert(relative as usize, sample);
        }

        Ok(Self {
            keyed,
            current: None,
            expected: 0,
        })
    }

    /// Decision for `frame_index`, which must be the next frame in sequence.
    pub fn next(&mut self, frame_index: usize) -> Result<OverlayDecision<'a, F>, SchedulerError> {
        if frame_index != self.expected {
            return Err(SchedulerError::OutOfOrder {
                expected: self.expected,
                got: frame_index,
            });
        }
        Ok(self.step())
    }

    /// Decisions for every remaining frame up to `total_frames`.
    pub fn decisions(mut self, total_frames: usize) -> Vec<OverlayDecision<'a, F>> {
        (self.expected..total_frames).map(|_| self.step()).collect()
    }

    fn step(&mut self) -> OverlayDecision<'a, F> {
        let frame_index = self.expected;
        self.expected += 1;

        if let Some(sample) = self.keyed.get(&frame_index) {
            self.current = Some(*sample);
        }
        decide(self.current)
    }

    /// The sample in effect at `frame_index`: the one with the greatest key
    /// not after it.
    fn held_at(&self, frame_index: usize) -> Option<&'a FrameSample<F>> {
        self.keyed
            .iter()
            .filter(|(key, _)| **key <= frame_index)
            .max_by_key(|(key, _)| **key)
            .map(|(_, sample)| *sample)
    }
}

fn decide<F>(held: Option<&FrameSample<F>>) -> OverlayDecision<'_, F> {
    match held {
        Some(FrameSample {
            overlay: Some(frame),
            has_translation: true,
            ..
        }) => OverlayDecision::Overlay(frame),
        _ => OverlayDecision::Base,
    }
}

/// Decision for a single frame, computed from the whole sample history.
pub fn resolve_overlay<F>(
    samples: &[FrameSample<F>],
    frame_index: usize,
    fps: f64,
    start_frame_offset: usize,
) -> Result<OverlayDecision<'_, F>, SchedulerError> {
    let scheduler = OverlayScheduler::new(samples, fps, start_frame_offset)?;
    Ok(decide(scheduler.held_at(frame_index)))
}
