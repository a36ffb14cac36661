//! Reorder-by-drag input, reduced to discrete index intents.
//!
//! The session never sees pointer coordinates; this tracker settles hover
//! events into `(from, to)` pairs and the host forwards them to
//! [`crate::session::RuleEditSession::reorder`].

/// Tracks one pointer-drag gesture over the rules table.
#[derive(Debug, Clone)]
pub struct DragTracker {
    origin: usize,
    current: usize,
}

impl DragTracker {
    /// Begin a gesture on the row at `start_index`.
    pub fn new(start_index: usize) -> DragTracker {
        DragTracker {
            origin: start_index,
            current: start_index,
        }
    }

    /// Index the dragged row currently occupies.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Feed a hover over `hover_index`. `pointer_offset` is the pointer's
    /// distance from the hovered row's top edge, in the same units as
    /// `row_height`.
    ///
    /// A move intent is produced only once the pointer crosses the midpoint
    /// of the hovered row in the direction of travel; hovering short of it
    /// is ignored so rapid index reassignment cannot flicker. On a settled
    /// crossing the dragged row takes over `hover_index` and the
    /// `(from, to)` pair is returned.
    pub fn hover(
        &mut self,
        hover_index: usize,
        pointer_offset: f32,
        row_height: f32,
    ) -> Option<(usize, usize)> {
        let from = self.current;
        if from == hover_index {
            return None;
        }
        let midpoint = row_height / 2.0;
        // Dragging downwards: only actionable below the midpoint.
        if from < hover_index && pointer_offset < midpoint {
            return None;
        }
        // Dragging upwards: only actionable above the midpoint.
        if from > hover_index && pointer_offset > midpoint {
            return None;
        }
        self.current = hover_index;
        Some((from, hover_index))
    }

    /// Net movement of the whole gesture, or `None` if the row ended up
    /// where it started.
    pub fn finish(self) -> Option<(usize, usize)> {
        (self.origin != self.current).then_some((self.origin, self.current))
    }
}
