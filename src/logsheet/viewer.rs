use crate::foundation::error::TriplogResult;
use crate::foundation::generation::{Generation, GenerationCounter, Tagged};
use crate::logsheet::renderer::{LogSheetRenderer, LogSheetSet, RenderedLogImage};
use crate::trip::model::Trip;

/// Where the viewer is in its load/navigate cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewerState {
    /// Waiting for a set (also the state of a trip that is not ready yet).
    Loading,
    /// Showing the sheet at this index.
    Ready(usize),
    /// The trip has no logs.
    Empty,
    /// Rendering failed.
    Failed(String),
}

/// Carousel over the rendered sheets of one trip.
#[derive(Debug)]
pub struct LogSheetViewer {
    generations: GenerationCounter,
    state: ViewerState,
    sheets: LogSheetSet,
}

impl Default for LogSheetViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSheetViewer {
    /// Viewer with nothing loaded.
    pub fn new() -> Self {
        Self {
            generations: GenerationCounter::new(),
            state: ViewerState::Loading,
            sheets: LogSheetSet::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Start a new load, dropping the current set. Completions from earlier loads are ignored.
    pub fn begin_load(&mut self) -> Generation {
        self.state = ViewerState::Loading;
        self.sheets = LogSheetSet::default();
        self.generations.advance()
    }

    /// Apply the outcome of a load. Returns `false` when it belonged to a superseded load.
    pub fn finish_load(&mut self, outcome: Tagged<TriplogResult<LogSheetSet>>) -> bool {
        if !self.generations.is_current(outcome.generation) {
            tracing::warn!(
                stale = outcome.generation.0,
                latest = self.generations.latest().0,
                "discarding stale log sheet set"
            );
            return false;
        }
        match outcome.value {
            Ok(set) if set.is_empty() => self.state = ViewerState::Empty,
            Ok(set) => {
                self.sheets = set;
                self.state = ViewerState::Ready(0);
            }
            Err(e) if e.is_not_ready() => self.state = ViewerState::Loading,
            Err(e) => self.state = ViewerState::Failed(e.to_string()),
        }
        true
    }

    /// Render every sheet of `trip` and show the first one.
    pub fn load(&mut self, renderer: &mut LogSheetRenderer, trip: &Trip) -> &ViewerState {
        let generation = self.begin_load();
        let outcome = renderer.render_all_daily_logs(trip);
        self.finish_load(Tagged::new(generation, outcome));
        &self.state
    }

    /// Advance to the next sheet, wrapping after the last.
    pub fn next(&mut self) -> Option<usize> {
        self.step(1)
    }

    /// Go back one sheet, wrapping before the first.
    pub fn previous(&mut self) -> Option<usize> {
        self.step(self.sheets.len().checked_sub(1)?)
    }

    fn step(&mut self, by: usize) -> Option<usize> {
        let ViewerState::Ready(i) = self.state else {
            return None;
        };
        let n = self.sheets.len();
        if n == 0 {
            return None;
        }
        let next = (i + by) % n;
        self.state = ViewerState::Ready(next);
        Some(next)
    }

    /// Sheet being shown.
    pub fn current(&self) -> Option<&RenderedLogImage> {
        match self.state {
            ViewerState::Ready(i) => self.sheets.get(i),
            _ => None,
        }
    }

    /// `(index, count)` of the sheet being shown.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self.state {
            ViewerState::Ready(i) => Some((i, self.sheets.len())),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/logsheet/viewer.rs"]
mod tests;
