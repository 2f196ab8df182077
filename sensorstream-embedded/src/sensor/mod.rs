mod climate_sensor;
mod controller;
mod encoder;
mod light_sensor;
mod motion_sensor;
mod validation;
mod window;

pub use climate_sensor::{Dht11Sensor, encode_dht11_frame};
pub use controller::*;
pub use encoder::*;
pub use light_sensor::{AnalogLightSensor, DigitalLightSensor};
pub use motion_sensor::PirSensor;
pub use validation::*;
pub use window::SampleWindow;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Serial link speed the host side expects.
pub const BAUD_RATE: u32 = 9600;

/// Time the DHT11 needs after power-up before its first read is trustworthy.
pub const SENSOR_SETTLE_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Minimum time between two emitted samples (ms)
    pub interval_ms: u32,
    /// Temperature clamp floor (℃)
    pub temp_min: f32,
    /// Temperature clamp ceiling (℃)
    pub temp_max: f32,
    /// Relative humidity clamp floor (%)
    pub humidity_min: f32,
    /// Relative humidity clamp ceiling (%)
    pub humidity_max: f32,
    /// Full-scale analog light reading, 10-bit ADC by default
    pub light_max_raw: u16,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            temp_min: 0.0, // DHT11 datasheet range
            temp_max: 50.0,
            humidity_min: 20.0,
            humidity_max: 90.0,
            light_max_raw: 1023,
        }
    }
}

impl SamplerConfig {
    /// Rejects configurations that would make clamping or the lux rescale
    /// ill-defined.
    pub fn check(&self) -> Result<()> {
        let ordered = |min: f32, max: f32| !min.is_nan() && !max.is_nan() && min <= max;

        if self.interval_ms == 0
            || self.light_max_raw == 0
            || !ordered(self.temp_min, self.temp_max)
            || !ordered(self.humidity_min, self.humidity_max)
        {
            return Err(Error::InvalidConfig);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    /// Temperature (℃), NaN when the sensor did not answer
    pub temperature_c: f32,
    /// Relative humidity (%), NaN when the sensor did not answer
    pub humidity_pct: f32,
}

impl ClimateReading {
    pub const UNAVAILABLE: Self = Self {
        temperature_c: f32::NAN,
        humidity_pct: f32::NAN,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightLevel {
    /// Comparator output of the digital module
    Digital(bool),
    /// Raw conversion result of the analog module
    Analog(u16),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    pub motion: bool,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub light: LightLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidatedLight {
    Digital(u8),
    Analog { raw: u16, lux: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedSample {
    pub motion: u8,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub light: ValidatedLight,
}

pub trait MotionSensor {
    fn read_motion(&mut self) -> Result<bool>;
}

pub trait ClimateSensor {
    fn read_climate(&mut self) -> ClimateReading;
}

pub trait LightSensor {
    fn read_light(&mut self) -> Result<LightLevel>;
}
