use std::collections::HashMap;

use log::debug;
use rayon::prelude::*;

use crate::canvas::buffer::PixelBuffer;
use crate::utils::color::Rgba32;
use crate::utils::geom::VisibleRegion;
use crate::utils::profiler::ScopeTimer;

/// Quantize the visible region into `block_px`-sided squares, overwriting
/// every pixel of each square with the square's most frequent color.
///
/// Squares at the right and bottom edge may be partial; only in-bounds
/// pixels contribute to the histogram and only those are overwritten.
pub fn pixelate(buffer: &mut PixelBuffer, block_px: usize, region: &VisibleRegion) {
    let _timer = ScopeTimer::new("pixelate");

    let width = buffer.width();
    let region = region.clamped_to(buffer.height());
    let vis_rows = region.rows();
    let block = block_px.max(1);
    if width == 0 || vis_rows == 0 {
        return;
    }

    let cols = width.div_ceil(block);
    let rows = vis_rows.div_ceil(block);
    let top = region.top;

    // First pass: plurality color per square. Squares are disjoint, so the
    // histograms run in parallel over the read-only buffer.
    let block_colors: Vec<Rgba32> = {
        let data = buffer.as_slice();
        (0..rows * cols)
            .into_par_iter()
            .map(|i| dominant_color(data, width, top, vis_rows, block, i / cols, i % cols))
            .collect()
    };

    // Second pass: every visible row belongs to exactly one square row, so
    // the writes parallelize over pixel rows.
    buffer
        .as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            if y < top || y >= top + vis_rows {
                return;
            }
            let block_row = (y - top) / block;
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = block_colors[block_row * cols + x / block];
            }
        });

    debug!("pixelated {rows}x{cols} blocks of {block}px");
}

/// Histogram one square's in-bounds pixels and pick the winner. Ties
/// resolve to the color seen first in scan order, which keeps the result
/// deterministic regardless of the map's iteration order.
fn dominant_color(
    data: &[Rgba32],
    width: usize,
    top: usize,
    vis_rows: usize,
    block: usize,
    block_row: usize,
    block_col: usize,
) -> Rgba32 {
    let y0 = block_row * block;
    let x0 = block_col * block;

    let mut counts: HashMap<u32, u32> = HashMap::new();
    for dy in 0..block {
        let rel_y = y0 + dy;
        if rel_y >= vis_rows {
            break;
        }
        let row_start = (top + rel_y) * width;
        for dx in 0..block {
            let x = x0 + dx;
            if x >= width {
                break;
            }
            *counts.entry(data[row_start + x].bits()).or_insert(0) += 1;
        }
    }

    let best = counts.values().copied().max().unwrap_or(0);
    for dy in 0..block {
        let rel_y = y0 + dy;
        if rel_y >= vis_rows {
            break;
        }
        let row_start = (top + rel_y) * width;
        for dx in 0..block {
            let x = x0 + dx;
            if x >= width {
                break;
            }
            let color = data[row_start + x];
            if counts[&color.bits()] == best {
                return color;
            }
        }
    }
    Rgba32::CLEAR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn majority_color_wins_a_block() {
        let mut buffer = PixelBuffer::blank(4, 4, 1.0);
        // 5 black pixels against 11 white ones: white wins.
        for &(x, y) in &[(0, 0), (1, 1), (2, 2), (3, 3), (0, 3)] {
            buffer.set(x, y, Rgba32::BLACK);
        }
        pixelate(&mut buffer, 4, &VisibleRegion::new(0, 4));
        assert!(buffer.as_slice().iter().all(|&c| c == Rgba32::WHITE));
    }

    #[test]
    fn ties_resolve_to_scan_order() {
        let mut buffer = PixelBuffer::blank(2, 2, 1.0);
        buffer.set(0, 0, Rgba32::RED);
        buffer.set(1, 0, Rgba32::BLUE);
        buffer.set(0, 1, Rgba32::BLUE);
        buffer.set(1, 1, Rgba32::RED);
        // Two of each; red is encountered first at (0, 0).
        pixelate(&mut buffer, 2, &VisibleRegion::new(0, 2));
        assert!(buffer.as_slice().iter().all(|&c| c == Rgba32::RED));
    }

    #[test]
    fn reapplying_with_the_same_block_size_is_idempotent() {
        let mut buffer = PixelBuffer::blank(9, 9, 1.0);
        for y in 0..9 {
            for x in 0..9 {
                buffer.set(x, y, Rgba32::new((x * 28) as u8, (y * 28) as u8, 0, 255));
            }
        }
        let region = VisibleRegion::new(0, 9);

        pixelate(&mut buffer, 3, &region);
        let once = buffer.clone();
        pixelate(&mut buffer, 3, &region);
        assert_eq!(buffer, once);
    }

    #[test]
    fn partial_edge_blocks_use_only_in_bounds_pixels() {
        // 5x5 canvas, 3px blocks: the right column and bottom row of blocks
        // are 2 pixels narrow/short.
        let mut buffer = PixelBuffer::blank(5, 5, 1.0);
        for y in 0..5 {
            for x in 3..5 {
                buffer.set(x, y, Rgba32::BLUE);
            }
        }
        pixelate(&mut buffer, 3, &VisibleRegion::new(0, 5));

        for y in 0..5 {
            for x in 0..5 {
                let expected = if x < 3 { Rgba32::WHITE } else { Rgba32::BLUE };
                assert_eq!(buffer.get(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn rows_outside_the_region_are_untouched() {
        let mut buffer = PixelBuffer::blank(6, 8, 1.0);
        for x in 0..6 {
            buffer.set(x, 0, Rgba32::BLACK); // chrome row above the canvas
            buffer.set(x, 7, Rgba32::BLACK); // chrome row below
        }
        for y in 1..7 {
            for x in 0..6 {
                if (x + y) % 2 == 0 {
                    buffer.set(x, y, Rgba32::GREEN);
                }
            }
        }

        pixelate(&mut buffer, 6, &VisibleRegion::new(1, 7));

        for x in 0..6 {
            assert_eq!(buffer.get(x, 0), Some(Rgba32::BLACK));
            assert_eq!(buffer.get(x, 7), Some(Rgba32::BLACK));
        }
        // The single visible block collapsed to one color.
        let first = buffer.get(0, 1).unwrap();
        for y in 1..7 {
            for x in 0..6 {
                assert_eq!(buffer.get(x, y), Some(first));
            }
        }
    }
}
