use core::fmt;

/// Possible errors from the DHT21 driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DhtError<E> {
    /// The sensor did not acknowledge the start signal in time.
    HandshakeTimeout,
    /// A data bit's pulse edge was never observed.
    BitTimeout {
        /// Index of the bit being received, `0..40`, MSB of the first byte first.
        bit: u8,
    },
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E: fmt::Debug> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HandshakeTimeout => f.write_str("sensor did not answer the start signal"),
            Self::BitTimeout { bit } => write!(f, "timed out receiving data bit {bit}"),
            Self::ChecksumMismatch => f.write_str("frame checksum mismatch"),
            Self::PinError(e) => write!(f, "pin error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for DhtError<E> {}
