/// A single timed subtitle entry, numbered from 1.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionCue {
    pub index: u32,
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl CaptionCue {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}
