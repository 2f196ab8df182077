use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    PinReadFailed,
    AdcReadFailed,
    SerialWriteFailed,
    EncodeOverflow,
    InvalidConfig,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PinReadFailed => write!(f, "Digital input read failed"),
            Error::AdcReadFailed => write!(f, "Analog conversion read failed"),
            Error::SerialWriteFailed => write!(f, "Serial write failed"),
            Error::EncodeOverflow => write!(f, "Encoded line exceeds buffer capacity"),
            Error::InvalidConfig => write!(f, "Invalid sampler configuration"),
        }
    }
}

impl embedded_hal_nb::serial::Error for Error {
    fn kind(&self) -> embedded_hal_nb::serial::ErrorKind {
        embedded_hal_nb::serial::ErrorKind::Other
    }
}

pub type Result<T> = core::result::Result<T, Error>;
