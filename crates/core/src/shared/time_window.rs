use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum TimeWindowError {
    #[error("window bounds must be finite, got {start} to {end}")]
    NonFinite { start: f64, end: f64 },
    #[error("window start must be >= 0, got {0}")]
    NegativeStart(f64),
    #[error("window end ({end}) must be greater than start ({start})")]
    Empty { start: f64, end: f64 },
}

/// A `[start, end)` span of media time in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    pub fn new(start: f64, end: f64) -> Result<Self, TimeWindowError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TimeWindowError::NonFinite { start, end });
        }
        if start < 0.0 {
            return Err(TimeWindowError::NegativeStart(start));
        }
        if end <= start {
            return Err(TimeWindowError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Frame range covered at `fps`, truncating like a frame-accurate seek.
    pub fn frame_range(&self, fps: f64) -> (usize, usize) {
        (
            (self.start * fps).floor() as usize,
            (self.end * fps).floor() as usize,
        )
    }

    /// Filename suffix identifying the window, e.g. `_1800s-1860s`.
    pub fn suffix(&self) -> String {
        format!("_{}s-{}s", self.start, self.end)
    }
}
