use log::debug;

use crate::canvas::buffer::PixelBuffer;
use crate::canvas::history::History;
use crate::engine::block_paint::BlockStroke;
use crate::engine::fill::flood_fill;
use crate::engine::pixelate::pixelate;
use crate::error::EditError;
use crate::utils::color::Rgba32;
use crate::utils::geom::{Point, VisibleRegion};

/// The editing surface over one canvas: owns the current pixel buffer, the
/// undo/redo history and any live stroke or pixelation session, and wires
/// the engines together.
///
/// Operations run to completion on the calling thread; the exclusive borrow
/// is the mutual-exclusion gate for in-flight work, while the pixelation
/// session persists between calls and additionally disables every mutating
/// entry point until `depixelate` ends it.
pub struct PixelEditor {
    current: PixelBuffer,
    history: History,
    stroke: Option<BlockStroke>,
    pixelation: Option<PixelBuffer>,
}

impl PixelEditor {
    /// Fresh all-white canvas of the given size in buffer pixels.
    pub fn new(width: usize, height: usize, scale: f32) -> Self {
        Self::with_buffer(PixelBuffer::blank(width, height, scale))
    }

    /// Wrap an existing canvas, e.g. one restored from persisted bytes.
    pub fn with_buffer(buffer: PixelBuffer) -> Self {
        Self {
            current: buffer,
            history: History::new(),
            stroke: None,
            pixelation: None,
        }
    }

    /// The canvas as currently displayed.
    pub fn buffer(&self) -> &PixelBuffer {
        &self.current
    }

    pub fn is_pixelating(&self) -> bool {
        self.pixelation.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Whether mutating operations are currently locked out by a live
    /// pixelation or stroke session.
    fn gated(&self) -> bool {
        self.pixelation.is_some() || self.stroke.is_some()
    }

    /// Bucket-fill the same-colored region under `at`. Filling with a color
    /// approximately equal to the one already there is a no-op that leaves
    /// the history untouched.
    pub fn fill(
        &mut self,
        at: Point,
        color: Rgba32,
        region: VisibleRegion,
    ) -> Result<&PixelBuffer, EditError> {
        if self.gated() {
            return Ok(&self.current);
        }

        let region = region.clamped_to(self.current.height());
        let start = self.current.point_to_index(at)?;
        let (x, y) = self.current.coords_of(start);
        // A start outside the editable rows could never be painted, so the
        // traversal would revisit it forever; reject it up front.
        if !region.contains_row(y) {
            return Err(EditError::OutOfBounds {
                x: x as i64,
                y: y as i64,
            });
        }

        let original = self.current.as_slice()[start];
        if color.approx_eq(original) {
            debug!("fill is a no-op, target already {original:?}");
            return Ok(&self.current);
        }

        self.history.record(self.current.clone());
        flood_fill(&mut self.current, start, original, color, &region);
        Ok(&self.current)
    }

    /// Quantize the visible region into blocks of `block_points` UI points
    /// a side, remembering the previous canvas so `depixelate` can restore
    /// it exactly. Re-entrant calls are no-ops. Pixelation is a reversible
    /// viewing mode, not an edit: the history stacks are never involved.
    pub fn pixelate(&mut self, block_points: f32, region: VisibleRegion) -> &PixelBuffer {
        if self.gated() {
            return &self.current;
        }
        let block_px = ((block_points * self.current.scale()) as usize).max(1);
        self.pixelation = Some(self.current.clone());
        pixelate(&mut self.current, block_px, &region);
        &self.current
    }

    /// Restore the canvas saved by `pixelate` and end the session.
    pub fn depixelate(&mut self) -> &PixelBuffer {
        if let Some(original) = self.pixelation.take() {
            self.current = original;
        }
        &self.current
    }

    /// Begin a grid-block painting gesture: record one history entry for
    /// the whole gesture, then paint the cell under the pointer. A second
    /// start while a gesture is live is ignored.
    pub fn start_block_stroke(
        &mut self,
        at: Point,
        block_points: f32,
        color: Rgba32,
        region: VisibleRegion,
    ) -> Result<&PixelBuffer, EditError> {
        if self.gated() {
            return Ok(&self.current);
        }
        self.current.point_to_index(at)?;

        let mut stroke = BlockStroke::new(block_points, self.current.scale(), color, region);
        self.history.record(self.current.clone());
        stroke.paint_at(&mut self.current, at);
        self.stroke = Some(stroke);
        Ok(&self.current)
    }

    /// Continue the gesture at a new pointer location. Events inside the
    /// last painted cell, and events off the canvas, do nothing.
    pub fn move_block_stroke(&mut self, at: Point) -> &PixelBuffer {
        if let Some(stroke) = &mut self.stroke {
            stroke.paint_at(&mut self.current, at);
        }
        &self.current
    }

    /// End the gesture; the painted canvas is already the current state.
    pub fn finish_block_stroke(&mut self) {
        self.stroke = None;
    }

    /// Step back to the previous canvas state, if any.
    pub fn undo(&mut self) -> Option<&PixelBuffer> {
        if self.gated() {
            return None;
        }
        let previous = self.history.undo(&self.current)?;
        self.current = previous;
        Some(&self.current)
    }

    /// Re-apply the most recently undone state, if any.
    pub fn redo(&mut self) -> Option<&PixelBuffer> {
        if self.gated() {
            return None;
        }
        let next = self.history.redo(&self.current)?;
        self.current = next;
        Some(&self.current)
    }

    /// Reset to a blank white canvas and drop the history and any live
    /// session.
    pub fn clear(&mut self) -> &PixelBuffer {
        self.history.clear();
        self.stroke = None;
        self.pixelation = None;
        self.current = PixelBuffer::blank(
            self.current.width(),
            self.current.height(),
            self.current.scale(),
        );
        &self.current
    }

    /// Replace the canvas with an externally supplied image (photo import,
    /// restored drawing). Recorded in history like any other edit.
    pub fn upload(&mut self, image: PixelBuffer) -> &PixelBuffer {
        if self.gated() {
            return &self.current;
        }
        self.history.record(self.current.clone());
        self.current = image;
        &self.current
    }

    /// Color-picker read of the pixel under the pointer.
    pub fn color_at(&self, at: Point) -> Result<Rgba32, EditError> {
        let index = self.current.point_to_index(at)?;
        Ok(self.current.as_slice()[index])
    }
}
