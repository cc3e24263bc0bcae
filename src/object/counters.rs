use std::sync::atomic::{AtomicU64, Ordering};

/// Single-writer, many-reader 64-bit counter.
///
/// The real-time I/O path updates these; the property engine reads them
/// without taking any lock. Relaxed ordering is sufficient: each counter is
/// independent and readers only need an eventually-current value of the
/// individual counter, never an ordering between them.
#[derive(Debug, Default)]
pub struct AtomicCounter(AtomicU64);

impl AtomicCounter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn value(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn decrement(&self) -> u64 {
        self.0.fetch_sub(1, Ordering::Relaxed) - 1
    }

    pub fn store(&self, value: u64) {
        self.0.store(value, Ordering::Relaxed);
    }
}

/// Live timing/activity state of a device, updated by the I/O path.
#[derive(Debug, Default)]
pub struct RealtimeCounters {
    /// Number of currently active I/O sessions; nonzero means running
    pub io_active: AtomicCounter,
    /// Completed I/O cycles since the device came up
    pub cycles: AtomicCounter,
    /// Host time anchor of the most recent zero timestamp
    pub reference_host_time: AtomicCounter,
}

impl RealtimeCounters {
    pub fn new() -> Self {
        Self::default()
    }
}
