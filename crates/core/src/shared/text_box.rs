/// Axis-aligned bounds of a detected text line, in frame pixel coordinates.
///
/// OCR engines report quadrilaterals as point lists; the min/max extents
/// are taken once at construction so layout code never re-scans points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBox {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl TextBox {
    /// Builds a box from two corners, normalizing their order.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x_min: x0.min(x1),
            y_min: y0.min(y1),
            x_max: x0.max(x1),
            y_max: y0.max(y1),
        }
    }

    /// Bounding rectangle of a polygon. Returns `None` for an empty list.
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let (&(fx, fy), rest) = points.split_first()?;
        let init = Self {
            x_min: fx,
            y_min: fy,
            x_max: fx,
            y_max: fy,
        };
        Some(rest.iter().fold(init, |b, &(x, y)| Self {
            x_min: b.x_min.min(x),
            y_min: b.y_min.min(y),
            x_max: b.x_max.max(x),
            y_max: b.y_max.max(y),
        }))
    }

    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Maps coordinates from an upscaled detection image back to the frame.
    ///
    /// Detection on a 2x upscaled frame pairs with `scaled(0.5)`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.x_min * factor,
            self.y_min * factor,
            self.x_max * factor,
            self.y_max * factor,
        )
    }

    /// Top-left anchor for a caption placed `gap` pixels below this box.
    pub fn anchor_below(&self, gap: f64) -> (f64, f64) {
        (self.x_min, self.y_max + gap)
    }
}
