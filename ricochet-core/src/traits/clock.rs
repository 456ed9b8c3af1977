//! Monotonic time source

/// Millisecond clock used for the battery refresh timer
pub trait Clock {
    /// Milliseconds since an arbitrary fixed point, never decreasing
    fn now_ms(&self) -> u64;
}
