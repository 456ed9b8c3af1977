//! Tone emitter trait

/// Plays a single tone slot
///
/// The call returns once the slot has elapsed, so a ringtone is simply a
/// sequence of `emit` calls.
pub trait ToneEmitter {
    /// Sound `frequency_hz` for `duration_ms`
    ///
    /// A frequency of 0 is a rest: nothing sounds, but the duration still
    /// elapses.
    async fn emit(&mut self, frequency_hz: u16, duration_ms: u32);
}
