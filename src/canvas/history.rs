use crate::canvas::buffer::PixelBuffer;

/// Stack-based undo/redo manager over whole-canvas snapshots.
///
/// Every mutating edit records the pre-mutation buffer; undoing swaps the
/// live canvas against the top of the undo stack, pushing the displaced
/// state onto the redo stack so the two stay symmetric.
pub struct History {
    undo_stack: Vec<PixelBuffer>,
    redo_stack: Vec<PixelBuffer>,
}

impl History {
    /// Create an empty history with no recorded snapshots.
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Record the pre-mutation canvas. A fresh edit invalidates anything
    /// that was undone, so the redo stack is dropped wholesale.
    pub fn record(&mut self, snapshot: PixelBuffer) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
    }

    /// Pop the previous state, parking `current` for redo. Returns `None`
    /// when there is nothing to undo (and `current` is left unparked).
    pub fn undo(&mut self, current: &PixelBuffer) -> Option<PixelBuffer> {
        let previous = self.undo_stack.pop()?;
        self.redo_stack.push(current.clone());
        Some(previous)
    }

    /// Re-apply the most recently undone state, parking `current` for undo.
    pub fn redo(&mut self, current: &PixelBuffer) -> Option<PixelBuffer> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Drop both stacks, e.g. when the canvas is cleared.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
