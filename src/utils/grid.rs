const MIN_GRID_COLUMNS: usize = 8;
const MAX_GRID_COLUMNS: usize = 192;

/// Ordered ladder of grid cell sizes for a canvas of a given width, from
/// coarsest (few columns) to finest. The active entry is the side length,
/// in UI points, of one pixelation/paint block.
#[derive(Clone, Debug)]
pub struct GridSpec {
    sizes: Vec<f32>,
    current: usize,
}

impl GridSpec {
    /// Derive the ladder by walking column counts and deduplicating rounded
    /// cell sizes, so every entry is a distinct integral point size.
    pub fn for_width(width_points: f32) -> Self {
        let mut sizes = Vec::new();
        let mut columns = MIN_GRID_COLUMNS;

        loop {
            let cell = (width_points / columns as f32).round().max(1.0);
            sizes.push(cell);

            while (width_points / columns as f32).round().max(1.0) == cell
                && columns < MAX_GRID_COLUMNS
            {
                columns += 1;
            }
            if columns == MAX_GRID_COLUMNS {
                break;
            }
        }

        Self { sizes, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Side length of the active block, in UI points.
    pub fn current_size(&self) -> f32 {
        self.sizes[self.current]
    }

    pub fn size_at(&self, index: usize) -> Option<f32> {
        self.sizes.get(index).copied()
    }

    /// Switch the active entry; out-of-range or same-index requests are
    /// ignored, mirroring how the selector UI calls this.
    pub fn select(&mut self, index: usize) {
        if index != self.current && index < self.sizes.len() {
            self.current = index;
        }
    }
}
