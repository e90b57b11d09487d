use crossbeam::utils::CachePadded;
use std::sync::atomic::{AtomicU64, Ordering};

/// A tally shared by rayon workers.  Each worker adds into its own
/// cache line; the total is only summed on read.
pub struct Counter(Vec<CachePadded<AtomicU64>>);

impl Counter {
    pub fn zero() -> Counter {
        let mut vec = Vec::new();

        vec.resize_with(num_cpus::get().max(1), || CachePadded::new(AtomicU64::new(0)));

        Counter(vec)
    }

    pub fn get(&self) -> u64 {
        self.0
            .iter()
            .map(|atomic| atomic.load(Ordering::Relaxed))
            .sum()
    }

    pub fn add(&self, n: u64) {
        let idx = rayon::current_thread_index().unwrap_or(0) % self.0.len();
        self.0[idx].fetch_add(n, Ordering::Relaxed);
    }
}
