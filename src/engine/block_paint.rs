use crate::canvas::buffer::PixelBuffer;
use crate::utils::color::Rgba32;
use crate::utils::geom::{Point, VisibleRegion};

/// Per-gesture state for grid-block painting.
///
/// Alive between stroke start and finish. Remembers the last painted block
/// so the high-frequency move events a drag produces inside one block
/// coalesce to nothing.
pub struct BlockStroke {
    side_points: usize,
    side_px: usize,
    color: Rgba32,
    region: VisibleRegion,
    last_block: Option<(usize, usize)>,
}

impl BlockStroke {
    /// Start a gesture with the given grid cell size (UI points) and brush
    /// color. Grid sizes are integral points; the pixel side is derived
    /// through the display scale once, up front.
    pub fn new(block_points: f32, scale: f32, color: Rgba32, region: VisibleRegion) -> Self {
        Self {
            side_points: (block_points as usize).max(1),
            side_px: ((block_points * scale) as usize).max(1),
            color,
            region,
            last_block: None,
        }
    }

    /// Grid cell under a pointer location. `None` for pointers above or
    /// left of the canvas; those events are ignored, not errors.
    pub fn block_at(&self, at: Point) -> Option<(usize, usize)> {
        let x = at.x.round() as i64;
        let y = at.y.round() as i64;
        if x < 0 || y < 0 {
            return None;
        }
        Some((
            x as usize / self.side_points,
            y as usize / self.side_points,
        ))
    }

    /// Paint the grid cell under `at`, coalescing repeated events within
    /// the same cell. Returns whether any pixel was written.
    pub fn paint_at(&mut self, buffer: &mut PixelBuffer, at: Point) -> bool {
        let Some(block) = self.block_at(at) else {
            return false;
        };
        if self.last_block == Some(block) {
            return false;
        }
        self.last_block = Some(block);
        self.paint_block(buffer, block)
    }

    /// Overwrite one cell, clipped to the canvas width and the visible
    /// rows. Cells straddling the edge paint only their in-bounds part.
    fn paint_block(&self, buffer: &mut PixelBuffer, (bx, by): (usize, usize)) -> bool {
        let region = self.region.clamped_to(buffer.height());
        let vis_rows = region.rows();
        let side = self.side_px;
        let mut painted = false;

        for i in 0..side {
            let rel_y = by * side + i;
            if rel_y >= vis_rows {
                break;
            }
            for j in 0..side {
                let x = bx * side + j;
                if x >= buffer.width() {
                    break;
                }
                buffer.set(x, region.top + rel_y, self.color);
                painted = true;
            }
        }
        painted
    }
}
