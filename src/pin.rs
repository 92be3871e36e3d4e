use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// A GPIO pin whose direction can be switched at runtime.
///
/// The DHT21 shares one line for the request and the response, so the
/// driver drives the pin as an output for the start signal and reads it as
/// an input for the reply. `embedded-hal` has no trait for reconfiguring a
/// pin, hence this one.
pub trait IoPin: ErrorType + InputPin + OutputPin {
    /// Switches the pin to input mode, letting the sensor drive the line.
    fn set_input_mode(&mut self) -> Result<(), <Self as ErrorType>::Error>;

    /// Switches the pin to output mode, making the MCU the line driver.
    fn set_output_mode(&mut self) -> Result<(), <Self as ErrorType>::Error>;
}

impl<T: IoPin + ?Sized> IoPin for &mut T {
    fn set_input_mode(&mut self) -> Result<(), <Self as ErrorType>::Error> {
        T::set_input_mode(self)
    }

    fn set_output_mode(&mut self) -> Result<(), <Self as ErrorType>::Error> {
        T::set_output_mode(self)
    }
}

/// Adapter for an open-drain pin with a pull-up, which can be read while
/// it is "driven" high.
///
/// Switching direction is a no-op: releasing the line with `set_high` is
/// enough for the sensor to pull it low.
#[derive(Debug, Clone)]
pub struct OpenDrain<P>(pub P);

impl<P> OpenDrain<P> {
    /// Returns the wrapped pin.
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: ErrorType> ErrorType for OpenDrain<P> {
    type Error = P::Error;
}

impl<P: InputPin> InputPin for OpenDrain<P> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.0.is_high()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.0.is_low()
    }
}

impl<P: OutputPin> OutputPin for OpenDrain<P> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }
}

impl<P: InputPin + OutputPin> IoPin for OpenDrain<P> {
    fn set_input_mode(&mut self) -> Result<(), P::Error> {
        Ok(())
    }

    fn set_output_mode(&mut self) -> Result<(), P::Error> {
        Ok(())
    }
}
