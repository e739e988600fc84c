use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request generation.
///
/// Every time the source trip changes a new generation is issued; only results tagged with the
/// latest generation may be observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

/// Issues increasing [`Generation`] values and remembers the latest one.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    latest: AtomicU64,
}

impl GenerationCounter {
    /// Create a counter; the first issued generation is `Generation(1)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new generation, making every previously issued one stale.
    pub fn advance(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Most recently issued generation (`Generation(0)` before the first `advance`).
    pub fn latest(&self) -> Generation {
        Generation(self.latest.load(Ordering::Acquire))
    }

    /// Return `true` when `g` is still the latest generation.
    pub fn is_current(&self, g: Generation) -> bool {
        self.latest() == g
    }
}

/// A value produced for a specific [`Generation`].
#[derive(Debug)]
pub struct Tagged<T> {
    /// Generation the value was requested under.
    pub generation: Generation,
    /// The produced value.
    pub value: T,
}

impl<T> Tagged<T> {
    /// Attach `generation` to `value`.
    pub fn new(generation: Generation, value: T) -> Self {
        Self { generation, value }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/generation.rs"]
mod tests;
