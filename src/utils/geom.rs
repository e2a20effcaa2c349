/// Pointer location in UI points, before the display scale is applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Buffer pixel coordinate: round in point space, then scale. May be
    /// negative for pointers above or left of the canvas.
    pub fn to_pixels(self, scale: f32) -> (i64, i64) {
        (
            (self.x.round() * scale) as i64,
            (self.y.round() * scale) as i64,
        )
    }
}

/// Row window of the canvas, in buffer pixels, that editing operations may
/// touch. Rows above `top` or at/below `bottom` belong to overlaid chrome
/// and are never modified; `bottom` is exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibleRegion {
    pub top: usize,
    pub bottom: usize,
}

impl VisibleRegion {
    pub fn new(top: usize, bottom: usize) -> Self {
        Self {
            top,
            bottom: bottom.max(top),
        }
    }

    /// Build from UI-point bounds: round in point space, then scale.
    pub fn from_points(min_y: f32, max_y: f32, scale: f32) -> Self {
        let top = (min_y.round() * scale).max(0.0) as usize;
        let bottom = (max_y.round() * scale).max(0.0) as usize;
        Self::new(top, bottom)
    }

    /// Number of visible rows.
    pub fn rows(&self) -> usize {
        self.bottom - self.top
    }

    /// Restrict the window to a buffer of the given height.
    pub fn clamped_to(&self, height: usize) -> Self {
        Self {
            top: self.top.min(height),
            bottom: self.bottom.min(height),
        }
    }

    /// Whether the given buffer row may be edited.
    pub fn contains_row(&self, row: usize) -> bool {
        row >= self.top && row < self.bottom
    }
}
