//! Bounded per-metric sample history for external charting.
//!
//! Fixed-capacity ring buffer: the backing storage is allocated once and the
//! oldest sample is overwritten when full, so a push is O(1) and never allocates.

/// Samples retained per series.
pub const WATCH_CAPACITY: usize = 600;

#[derive(Debug, Clone)]
pub struct WatchSeries {
    buf: Box<[f64]>,
    head: usize,
    len: usize,
}

impl Default for WatchSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchSeries {
    pub fn new() -> Self {
        Self::with_capacity(WATCH_CAPACITY)
    }

    /// Capacity is clamped to at least one slot.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0.0; capacity.max(1)].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    /// Append a sample, evicting the oldest one when full.
    pub fn push(&mut self, sample: f64) {
        let cap = self.buf.len();
        let tail = (self.head + self.len) % cap;
        self.buf[tail] = sample;
        if self.len == cap {
            self.head = (self.head + 1) % cap;
        } else {
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Samples oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let cap = self.buf.len();
        (0..self.len).map(move |i| self.buf[(self.head + i) % cap])
    }

    pub fn samples(&self) -> Vec<f64> {
        self.iter().collect()
    }
}
