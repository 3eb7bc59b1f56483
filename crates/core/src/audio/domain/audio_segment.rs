use crate::shared::time_window::TimeWindow;

/// Decoded audio: interleaved PCM samples normalized to [-1.0, 1.0].
#[derive(Clone, Debug)]
pub struct AudioSegment {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl AudioSegment {
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            samples,
            sample_rate,
            channels,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Index of the first sample at `time`, aligned to a whole frame of
    /// interleaved channels.
    pub fn sample_index_at_time(&self, time: f64) -> usize {
        let frame = (time.max(0.0) * self.sample_rate as f64) as usize;
        frame * self.channels as usize
    }

    /// Copies the samples inside `window`, clamped to the available audio.
    pub fn slice(&self, window: &TimeWindow) -> AudioSegment {
        let len = self.samples.len();
        let start = self.sample_index_at_time(window.start()).min(len);
        let end = self.sample_index_at_time(window.end()).min(len);
        AudioSegment::new(
            self.samples[start..end].to_vec(),
            self.sample_rate,
            self.channels,
        )
    }
}
