use embedded_hal::digital::InputPin;

use crate::error::{Error, Result};

use super::MotionSensor;

/// Passive-infrared module with a digital output.
pub struct PirSensor<Pin>
where
    Pin: InputPin,
{
    pin: Pin,
    inverted: bool,
}

impl<Pin> PirSensor<Pin>
where
    Pin: InputPin,
{
    /// Active-high output, as on the HC-SR501.
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

    pub fn release(self) -> Pin {
        self.pin
    }
}

impl<Pin> MotionSensor for PirSensor<Pin>
where
    Pin: InputPin,
{
    fn read_motion(&mut self) -> Result<bool> {
        let high = self.pin.is_high().map_err(|_| Error::PinReadFailed)?;
        Ok(high != self.inverted)
    }
}

#[cfg(test)]
pub mod mock {
    use core::convert::Infallible;

    use embedded_hal::digital::{ErrorKind, ErrorType};

    use super::*;

    #[derive(Debug)]
    pub struct MockPin {
        pub high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl InputPin for MockPin {
        fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    #[derive(Debug)]
    pub struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl InputPin for BrokenPin {
        fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_pir_levels() {
        const CASES: &[(bool, bool, bool)] = &[
            (true, false, true),
            (false, false, false),
            (true, true, false),
            (false, true, true),
        ];

        for &(high, inverted, expected) in CASES {
            let pin = MockPin { high };
            let mut sensor = if inverted {
                PirSensor::inverted(pin)
            } else {
                PirSensor::new(pin)
            };
            assert_eq!(sensor.read_motion().unwrap(), expected);
        }
    }

    #[test]
    fn test_pir_pin_error() {
        let mut sensor = PirSensor::new(BrokenPin);

        assert_eq!(sensor.read_motion(), Err(Error::PinReadFailed));
    }
}
