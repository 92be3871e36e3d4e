/// Number of bytes the sensor transmits per measurement.
pub const FRAME_LEN: usize = 5;

/// Raw 40-bit transmission from the DHT21.
///
/// Byte order is `[humidity_high, humidity_low, temperature_high,
/// temperature_low, parity]`. A frame whose parity byte does not match the
/// data must not be trusted; see [`Frame::checksum_valid`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Frame([u8; FRAME_LEN]);

/// Decoded measurement in fixed-point tenths.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    /// Relative humidity in units of 0.1 %RH.
    pub humidity: u16,
    /// Temperature in units of 0.1 °C.
    pub temperature: i16,
}

impl Frame {
    /// Wraps five received bytes.
    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Frame(bytes)
    }

    /// Returns the raw bytes, parity last.
    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// The checksum byte as sent by the sensor.
    pub const fn parity(&self) -> u8 {
        self.0[4]
    }

    /// Returns `true` if the parity byte equals the low 8 bits of the sum of
    /// the four data bytes.
    pub fn checksum_valid(&self) -> bool {
        self.0[..4].iter().fold(0u8, |sum, v| sum.wrapping_add(*v)) == self.parity()
    }

    /// Relative humidity in 0.1 %RH, read as a big-endian `u16`.
    pub fn decode_humidity(&self) -> u16 {
        u16::from_be_bytes([self.0[0], self.0[1]])
    }

    /// Temperature in 0.1 °C.
    ///
    /// The sensor uses sign-magnitude encoding: bit 7 of the high byte is the
    /// sign and the remaining 15 bits are the magnitude.
    pub fn decode_temperature(&self) -> i16 {
        let [temp_hi, temp_lo] = [self.0[2], self.0[3]];

        let is_negative = (temp_hi >> 7) != 0;
        // At most 0x7FFF, always fits
        let magnitude = u16::from_be_bytes([temp_hi & 0b0111_1111, temp_lo]) as i16;
        if is_negative { -magnitude } else { magnitude }
    }

    /// Decodes both fields without checking the checksum.
    pub fn reading(&self) -> Reading {
        Reading {
            humidity: self.decode_humidity(),
            temperature: self.decode_temperature(),
        }
    }
}

impl From<[u8; FRAME_LEN]> for Frame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        Frame(bytes)
    }
}

impl From<Frame> for [u8; FRAME_LEN] {
    fn from(frame: Frame) -> Self {
        frame.0
    }
}

impl Reading {
    /// Relative humidity in percent.
    pub fn relative_humidity(&self) -> f32 {
        self.humidity as f32 / 10.0
    }

    /// Temperature in degrees Celsius.
    pub fn celsius(&self) -> f32 {
        self.temperature as f32 / 10.0
    }
}
