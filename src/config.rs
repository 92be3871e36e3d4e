/// Receive timing for the DHT21 driver.
///
/// The defaults follow the AM2301 datasheet with generous margins. Sensor
/// timing drifts between units and with temperature, so the one-bit window
/// can be re-tuned if a particular part reads unreliably.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Longest wait for each phase of the sensor's LOW/HIGH/LOW acknowledgment.
    pub handshake_timeout_us: u32,
    /// Longest wait for either edge of a single data bit.
    pub bit_timeout_us: u32,
    /// Shortest HIGH pulse, inclusive, decoded as a `1` bit.
    ///
    /// Must not exceed `one_bit_max_us`, otherwise every bit decodes as `0`.
    pub one_bit_min_us: u32,
    /// Longest HIGH pulse, inclusive, decoded as a `1` bit.
    pub one_bit_max_us: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Nominal ACK phases are 80us each
            handshake_timeout_us: 200,
            // Nominal: 50us LOW, then 26-28us (0) or 70us (1) HIGH
            bit_timeout_us: 200,
            one_bit_min_us: 40,
            one_bit_max_us: 80,
        }
    }
}

impl Config {
    /// Decodes a measured HIGH pulse into a bit value.
    ///
    /// Pulses inside the inclusive one-bit window are `1`, anything else is `0`.
    pub fn classify(&self, high_us: u32) -> bool {
        (self.one_bit_min_us..=self.one_bit_max_us).contains(&high_us)
    }
}
