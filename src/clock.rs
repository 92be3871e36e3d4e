//! Free-running counter used to time the sensor's pulses.

/// A free-running hardware counter, such as a CPU cycle counter or a
/// microsecond timer.
///
/// The counter is expected to wrap around silently. Elapsed times are
/// computed with wrapping arithmetic, so a pulse that straddles the
/// rollover is measured correctly as long as it is shorter than one full
/// counter period.
///
/// # Example
///
/// An ESP32 running at 240 MHz exposes its cycle counter through `CCOUNT`:
///
/// ```ignore
/// struct CycleCounter;
///
/// impl dht21_sensor::Clock for CycleCounter {
///     const TICKS_PER_US: u32 = 240;
///
///     fn ticks(&mut self) -> u32 {
///         xtensa_lx::timer::get_cycle_count()
///     }
/// }
/// ```
pub trait Clock {
    /// Number of counter ticks per microsecond. Must be non-zero.
    const TICKS_PER_US: u32;

    /// Bits of the counter that are significant. Counters narrower than
    /// 32 bits must override this so rollover is handled at their width.
    ///
    /// The counter period must be longer than the longest data pulse
    /// (about 80 us), since a single pulse is timed from two readings.
    const COUNTER_MASK: u32 = u32::MAX;

    /// Returns the current counter value.
    fn ticks(&mut self) -> u32;

    /// Ticks between two counter values, accounting for rollover.
    fn elapsed_ticks(start: u32, now: u32) -> u32 {
        now.wrapping_sub(start) & Self::COUNTER_MASK
    }

    /// Microseconds between two counter values, accounting for rollover.
    fn elapsed_us(start: u32, now: u32) -> u32 {
        Self::elapsed_ticks(start, now) / Self::TICKS_PER_US
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    const TICKS_PER_US: u32 = T::TICKS_PER_US;
    const COUNTER_MASK: u32 = T::COUNTER_MASK;

    fn ticks(&mut self) -> u32 {
        T::ticks(self)
    }
}
