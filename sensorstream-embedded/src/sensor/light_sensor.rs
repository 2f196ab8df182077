use embedded_hal::digital::InputPin;
use embedded_io::Read;

use crate::error::{Error, Result};

use super::{LightLevel, LightSensor};

/// LM393 module read through its comparator output (DO).
pub struct DigitalLightSensor<Pin>
where
    Pin: InputPin,
{
    pin: Pin,
    inverted: bool,
}

impl<Pin> DigitalLightSensor<Pin>
where
    Pin: InputPin,
{
    pub fn new(pin: Pin) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    pub fn inverted(pin: Pin) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

impl<Pin> LightSensor for DigitalLightSensor<Pin>
where
    Pin: InputPin,
{
    fn read_light(&mut self) -> Result<LightLevel> {
        let high = self.pin.is_high().map_err(|_| Error::PinReadFailed)?;
        Ok(LightLevel::Digital(high != self.inverted))
    }
}

/// LM393 module read through its analog output (AO).
///
/// The converter delivers one big-endian `u16` per read. Values beyond the
/// converter's full scale are passed through and saturated by validation.
pub struct AnalogLightSensor<IO>
where
    IO: Read,
{
    io_device: IO,
    buffer: [u8; 2],
}

impl<IO> AnalogLightSensor<IO>
where
    IO: Read,
{
    pub fn new(io_device: IO) -> Self {
        Self {
            io_device,
            buffer: [0; 2],
        }
    }

    pub fn read_raw(&mut self) -> Result<u16> {
        self.buffer = [0; 2];

        let read_count = self
            .io_device
            .read(&mut self.buffer)
            .map_err(|_| Error::AdcReadFailed)?;

        if read_count < 2 {
            return Err(Error::AdcReadFailed);
        }

        Ok(u16::from_be_bytes(self.buffer))
    }
}

impl<IO> LightSensor for AnalogLightSensor<IO>
where
    IO: Read,
{
    fn read_light(&mut self) -> Result<LightLevel> {
        self.read_raw().map(LightLevel::Analog)
    }
}
