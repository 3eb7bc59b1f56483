/// One decoded video frame: packed RGB bytes in row-major order plus its
/// position in the source stream.
///
/// Pixel data is opaque to the scheduling and caption code; only detectors,
/// renderers and codecs look inside.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
    index: usize,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8, index: usize) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * (channels as usize),
            "data length must equal width * height * channels"
        );
        Self {
            data,
            width,
            height,
            channels,
            index,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Absolute index in the source stream.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Presentation time in seconds, assuming constant frame rate.
    pub fn timestamp(&self, fps: f64) -> f64 {
        if fps > 0.0 {
            self.index as f64 / fps
        } else {
            0.0
        }
    }

    /// Copy of this frame's pixels re-labelled with a new stream index.
    pub fn with_index(&self, index: usize) -> Self {
        Self {
            index,
            ..self.clone()
        }
    }
}
