use std::convert::Infallible;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin};
use embedded_hal_nb::nb;
use embedded_hal_nb::serial::{ErrorType as SerialErrorType, Write};
use embedded_io::{ErrorType as IoErrorType, Read};
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError};
use sensorstream_embedded::{
    AnalogLightSensor, DigitalLightSensor, Error, LUX_FULL_SCALE, LightLevel, LightSensor, Result,
    encode_dht11_frame,
};

use crate::simulate::{simulated_humidity, simulated_temperature, simulation_lux};

/// Maps wall-clock time onto a repeating simulated day.
#[derive(Debug, Clone, Copy)]
pub struct DayClock {
    start: Instant,
    day_length: Duration,
}

impl DayClock {
    pub fn new(day_length: Duration) -> Self {
        Self {
            start: Instant::now(),
            day_length,
        }
    }

    pub fn day_fraction(&self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64();
        (elapsed / self.day_length.as_secs_f64()).fract()
    }
}

/// PIR output that fires at random.
pub struct SimulatedPin {
    rng: StdRng,
    probability: f64,
}

impl SimulatedPin {
    pub fn new(rng: StdRng, probability: f64) -> Self {
        Self { rng, probability }
    }
}

impl PinErrorType for SimulatedPin {
    type Error = Infallible;
}

impl InputPin for SimulatedPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(self.rng.random_bool(self.probability))
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

/// LM393 comparator output: high once the simulated light crosses the
/// threshold.
pub struct SimulatedLightPin {
    clock: DayClock,
    threshold_lux: f64,
}

impl SimulatedLightPin {
    pub fn new(clock: DayClock, threshold_lux: f64) -> Self {
        Self {
            clock,
            threshold_lux,
        }
    }
}

impl PinErrorType for SimulatedLightPin {
    type Error = Infallible;
}

impl InputPin for SimulatedLightPin {
    fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        Ok(simulation_lux(self.clock.day_fraction()) >= self.threshold_lux)
    }

    fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// DHT11 resolution is ±1 ℃ / ±5 %RH; a small spread is enough
const CLIMATE_NOISE_STD_DEV: f64 = 0.4;

/// Bus driver handing over DHT11 frames built from the diurnal curves.
pub struct SimulatedDhtBus {
    clock: DayClock,
    rng: StdRng,
    noise: Normal<f64>,
    frame_error_probability: f64,
}

impl SimulatedDhtBus {
    pub fn new(
        clock: DayClock,
        rng: StdRng,
        frame_error_probability: f64,
    ) -> core::result::Result<Self, NormalError> {
        Ok(Self {
            clock,
            rng,
            noise: Normal::new(0.0, CLIMATE_NOISE_STD_DEV)?,
            frame_error_probability,
        })
    }
}

impl IoErrorType for SimulatedDhtBus {
    type Error = Infallible;
}

impl Read for SimulatedDhtBus {
    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        let fraction = self.clock.day_fraction();
        let temperature = simulated_temperature(fraction) + self.noise.sample(&mut self.rng);
        let humidity = simulated_humidity(fraction) + self.noise.sample(&mut self.rng);

        let mut frame = encode_dht11_frame(temperature as f32, humidity as f32);
        if self.rng.random_bool(self.frame_error_probability) {
            frame[4] = frame[4].wrapping_add(1);
        }

        let count = frame.len().min(buf.len());
        buf[..count].copy_from_slice(&frame[..count]);
        Ok(count)
    }
}

/// 10-bit converter sampling the simulated light level.
pub struct SimulatedAdc {
    clock: DayClock,
    rng: StdRng,
    max_raw: u16,
    glitch_probability: f64,
}

impl SimulatedAdc {
    pub fn new(clock: DayClock, rng: StdRng, max_raw: u16, glitch_probability: f64) -> Self {
        Self {
            clock,
            rng,
            max_raw,
            glitch_probability,
        }
    }

    fn sample(&mut self) -> u16 {
        if self.rng.random_bool(self.glitch_probability) {
            return self.rng.random_range(self.max_raw.saturating_add(1)..=u16::MAX);
        }

        let lux = simulation_lux(self.clock.day_fraction());
        let scaled = (lux / LUX_FULL_SCALE as f64) * self.max_raw as f64;
        scaled.round().clamp(0.0, self.max_raw as f64) as u16
    }
}

impl IoErrorType for SimulatedAdc {
    type Error = Infallible;
}

impl Read for SimulatedAdc {
    fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
        if buf.len() < 2 {
            return Ok(0);
        }

        let bytes = self.sample().to_be_bytes();
        buf[..2].copy_from_slice(&bytes);
        Ok(2)
    }
}

/// Light sensor fitted to the simulated board, chosen at startup.
pub enum BoardLight {
    Digital(DigitalLightSensor<SimulatedLightPin>),
    Analog(AnalogLightSensor<SimulatedAdc>),
}

impl LightSensor for BoardLight {
    fn read_light(&mut self) -> Result<LightLevel> {
        match self {
            BoardLight::Digital(sensor) => sensor.read_light(),
            BoardLight::Analog(sensor) => sensor.read_light(),
        }
    }
}

/// Serial port backed by any byte sink, e.g. stdout.
pub struct IoSerial<W: io::Write> {
    writer: W,
}

impl<W: io::Write> IoSerial<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> SerialErrorType for IoSerial<W> {
    type Error = Error;
}

impl<W: io::Write> Write<u8> for IoSerial<W> {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.writer
            .write_all(&[word])
            .map_err(|_| nb::Error::Other(Error::SerialWriteFailed))
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.writer
            .flush()
            .map_err(|_| nb::Error::Other(Error::SerialWriteFailed))
    }
}

pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}
