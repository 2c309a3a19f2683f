use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one fetch issued through a [`FetchGeneration`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation(u64);

/// Latest-request-wins guard for overlapping fetches.
///
/// Requests are never cancelled once started, so two fetches started back to
/// back both complete and both try to replace the displayed collection. The
/// display layer stamps each fetch with [`begin`](Self::begin) and drops any
/// completion whose generation is no longer current, so a stale response
/// cannot overwrite newer state.
#[derive(Debug, Default)]
pub struct FetchGeneration {
    counter: AtomicU64,
}

impl FetchGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new fetch, invalidating every earlier generation.
    pub fn begin(&self) -> Generation {
        Generation(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True while no newer fetch has begun since `generation`.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.counter.load(Ordering::SeqCst) == generation.0
    }
}
