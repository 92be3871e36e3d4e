use embedded_hal::delay::DelayNs;

use crate::clock::Clock;
use crate::config::Config;
use crate::error::DhtError;
use crate::frame::{FRAME_LEN, Frame, Reading};
use crate::pin::IoPin;

/// Duration of the LOW pulse that wakes the sensor.
const WAKE_PULSE_US: u32 = 1000;

/// Duration the line is released HIGH before handing it to the sensor.
const REQUEST_PULSE_US: u32 = 30;

const FRAME_BITS: u8 = (FRAME_LEN * 8) as u8;

/// Shortest interval the sensor needs between two measurements.
///
/// The driver does not enforce it; polling faster returns stale or failed
/// readings.
pub const MIN_POLL_INTERVAL_MS: u32 = 2000;

/// Driver for the DHT21 (AM2301) temperature and humidity sensor.
pub struct Dht21<PIN, CLOCK, DELAY> {
    pin: PIN,
    clock: CLOCK,
    delay: DELAY,
    config: Config,
}

impl<PIN, CLOCK, DELAY, E> Dht21<PIN, CLOCK, DELAY>
where
    PIN: IoPin<Error = E>,
    CLOCK: Clock,
    DELAY: DelayNs,
{
    /// Creates a new instance of the DHT21 driver with default timing.
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the DHT21 data line.
    /// * `clock` - A free-running counter used to measure pulse widths.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    pub fn new(pin: PIN, clock: CLOCK, delay: DELAY) -> Self {
        Self::with_config(pin, clock, delay, Config::default())
    }

    /// Creates a new instance of the DHT21 driver with custom timing.
    ///
    /// # Panics
    ///
    /// In debug builds, if `config.one_bit_min_us > config.one_bit_max_us`.
    pub fn with_config(pin: PIN, clock: CLOCK, delay: DELAY, config: Config) -> Self {
        const { assert!(CLOCK::TICKS_PER_US > 0, "Clock::TICKS_PER_US must be non-zero") };
        debug_assert!(
            config.one_bit_min_us <= config.one_bit_max_us,
            "one-bit window is empty"
        );

        Dht21 {
            pin,
            clock,
            delay,
            config,
        }
    }

    /// Returns the timing the driver was configured with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consumes the driver, returning the pin, clock and delay.
    pub fn release(self) -> (PIN, CLOCK, DELAY) {
        (self.pin, self.clock, self.delay)
    }

    /// Drives the data line HIGH, the bus idle state.
    ///
    /// Call once after power-up, before the first [`poll`](Self::poll).
    pub fn init(&mut self) -> Result<(), DhtError<E>> {
        self.idle()
    }

    /// Reads a temperature and humidity measurement from the DHT21 sensor.
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if the read is successful and the checksum is valid.
    /// * `Err(DhtError)` if a communication or checksum error occurs.
    pub fn poll(&mut self) -> Result<Reading, DhtError<E>> {
        let frame = self.read_frame()?;

        if !frame.checksum_valid() {
            warn!("DHT21 checksum mismatch: parity {}", frame.parity());
            return Err(DhtError::ChecksumMismatch);
        }

        let reading = frame.reading();
        debug!(
            "DHT21 humidity {} temperature {} (tenths)",
            reading.humidity, reading.temperature
        );
        Ok(reading)
    }

    /// Runs one complete exchange with the sensor and returns the raw frame.
    ///
    /// The checksum is not verified. The line is returned to its idle state
    /// whether or not the exchange succeeds.
    pub fn read_frame(&mut self) -> Result<Frame, DhtError<E>> {
        self.start()?;

        let received = self.handshake().and_then(|()| self.receive());
        let idle = self.idle();

        let frame = received?;
        idle?;

        debug!("DHT21 frame {:?}", frame.as_bytes());
        Ok(frame)
    }

    /// Sends the start signal and hands the line over to the sensor.
    ///
    /// The line is pulled low for 1 ms to wake the sensor, then released
    /// high for 30 us before switching the pin to input.
    fn start(&mut self) -> Result<(), DhtError<E>> {
        self.pin.set_output_mode()?;
        self.pin.set_low()?;
        self.delay.delay_us(WAKE_PULSE_US);
        self.pin.set_high()?;
        self.delay.delay_us(REQUEST_PULSE_US);

        self.pin.set_input_mode()?;
        Ok(())
    }

    /// Waits for the sensor's 80us low, 80us high acknowledgment and the
    /// falling edge that starts the first data bit.
    fn handshake(&mut self) -> Result<(), DhtError<E>> {
        let timeout = self.config.handshake_timeout_us;

        for (phase, level) in [false, true, false].into_iter().enumerate() {
            if !self.wait_for_level(level, timeout)? {
                warn!("DHT21 handshake timed out in phase {}", phase);
                return Err(DhtError::HandshakeTimeout);
            }
        }

        Ok(())
    }

    /// Receives all 40 data bits into a fresh frame, MSB first.
    fn receive(&mut self) -> Result<Frame, DhtError<E>> {
        let mut bytes = [0u8; FRAME_LEN];

        for bit in 0..FRAME_BITS {
            let high_us = self.measure_high_pulse(bit)?;
            let is_one = self.config.classify(high_us);
            trace!("DHT21 bit {} high for {} us", bit, high_us);

            let byte = &mut bytes[usize::from(bit / 8)];
            *byte = (*byte << 1) | u8::from(is_one);
        }

        Ok(Frame::new(bytes))
    }

    /// Measures the HIGH pulse of one data bit, in microseconds.
    fn measure_high_pulse(&mut self, bit: u8) -> Result<u32, DhtError<E>> {
        let timeout = self.config.bit_timeout_us;

        if !self.wait_for_level(true, timeout)? {
            warn!("DHT21 bit {} never rose", bit);
            return Err(DhtError::BitTimeout { bit });
        }
        let rise = self.clock.ticks();

        if !self.wait_for_level(false, timeout)? {
            warn!("DHT21 bit {} never fell", bit);
            return Err(DhtError::BitTimeout { bit });
        }
        let fall = self.clock.ticks();

        Ok(CLOCK::elapsed_us(rise, fall))
    }

    /// Takes the line back as output and leaves it HIGH.
    fn idle(&mut self) -> Result<(), DhtError<E>> {
        self.pin.set_output_mode()?;
        self.pin.set_high()?;
        Ok(())
    }

    /// Polls the line until it reads `high`, or `timeout_us` elapses.
    ///
    /// Time is summed between consecutive counter readings, so the timeout
    /// holds even when it is longer than the counter period.
    ///
    /// Returns `Ok(false)` on timeout.
    fn wait_for_level(&mut self, high: bool, timeout_us: u32) -> Result<bool, E> {
        let timeout_ticks = u64::from(timeout_us) * u64::from(CLOCK::TICKS_PER_US);
        let mut waited: u64 = 0;
        let mut prev = self.clock.ticks();

        loop {
            if self.pin.is_high()? == high {
                return Ok(true);
            }
            let now = self.clock.ticks();
            waited += u64::from(CLOCK::elapsed_ticks(prev, now));
            prev = now;
            if waited >= timeout_ticks {
                return Ok(false);
            }
        }
    }
}
