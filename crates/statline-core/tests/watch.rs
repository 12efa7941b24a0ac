#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use statline_core::{WatchSeries, WATCH_CAPACITY};

#[test]
fn fifo_eviction_at_capacity() {
    let mut s = WatchSeries::new();
    for i in 0..=WATCH_CAPACITY {
        s.push(i as f64);
    }

    assert_eq!(s.len(), WATCH_CAPACITY);
    let samples = s.samples();
    assert!(!samples.contains(&0.0), "oldest sample must be evicted");
    let want: Vec<f64> = (1..=WATCH_CAPACITY).map(|i| i as f64).collect();
    assert_eq!(samples, want);
}

#[test]
fn never_exceeds_capacity() {
    let mut s = WatchSeries::with_capacity(3);
    for i in 0..10 {
        s.push(i as f64);
        assert!(s.len() <= 3);
    }
    assert_eq!(s.samples(), vec![7.0, 8.0, 9.0]);
}

#[test]
fn empty_series_reads_empty() {
    let s = WatchSeries::new();
    assert!(s.is_empty());
    assert!(s.samples().is_empty());
    assert_eq!(s.capacity(), WATCH_CAPACITY);
}
