use embedded_hal::delay::DelayNs;
use embedded_hal_nb::nb::block;
use embedded_hal_nb::serial::Write;

use crate::error::{Error, Result};

use super::window::SampleWindow;
use super::{
    ClimateSensor, LightSensor, MotionSensor, RawReading, SENSOR_SETTLE_MS, SamplerConfig,
    ValidatedSample, encode, validate,
};

fn write_all<S>(serial: &mut S, buffer: &[u8]) -> Result<()>
where
    S: Write<u8, Error = Error>,
{
    for &byte in buffer {
        block!(serial.write(byte))?;
    }
    Ok(())
}

fn send_line<S>(serial: &mut S, line: &str) -> Result<()>
where
    S: Write<u8, Error = Error>,
{
    write_all(serial, line.as_bytes())?;
    block!(serial.flush())?;
    Ok(())
}

pub struct SerialSensorController<Motion, Climate, Light, Serial>
where
    Motion: MotionSensor,
    Climate: ClimateSensor,
    Light: LightSensor,
    Serial: Write<u8, Error = Error>,
{
    motion_sensor: Motion,
    climate_sensor: Climate,
    light_sensor: Light,
    serial: Serial,
    config: SamplerConfig,
    window: SampleWindow,
}

impl<Motion, Climate, Light, Serial> SerialSensorController<Motion, Climate, Light, Serial>
where
    Motion: MotionSensor,
    Climate: ClimateSensor,
    Light: LightSensor,
    Serial: Write<u8, Error = Error>,
{
    pub fn new(
        motion_sensor: Motion,
        climate_sensor: Climate,
        light_sensor: Light,
        serial: Serial,
        config: SamplerConfig,
    ) -> Result<Self> {
        config.check()?;

        Ok(Self {
            motion_sensor,
            climate_sensor,
            light_sensor,
            serial,
            config,
            window: SampleWindow::new(config.interval_ms),
        })
    }

    /// Gives the climate sensor time to settle after power-up.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        log::info!("Waiting {SENSOR_SETTLE_MS} ms for sensors to settle");
        delay.delay_ms(SENSOR_SETTLE_MS);
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn serial(&self) -> &Serial {
        &self.serial
    }

    pub fn serial_mut(&mut self) -> &mut Serial {
        &mut self.serial
    }

    pub fn read_raw(&mut self) -> Result<RawReading> {
        let climate = self.climate_sensor.read_climate();
        let motion = self.motion_sensor.read_motion()?;
        let light = self.light_sensor.read_light()?;

        Ok(RawReading {
            motion,
            temperature_c: climate.temperature_c,
            humidity_pct: climate.humidity_pct,
            light,
        })
    }

    /// One pass of the polling loop.
    ///
    /// The interval is consumed as soon as the gate opens, so a skipped or
    /// failed cycle waits a full interval before the next attempt.
    pub fn process(&mut self, current_time_ms: u32) -> Result<Option<ValidatedSample>> {
        if !self.window.try_open(current_time_ms) {
            return Ok(None);
        }

        let raw = self.read_raw()?;

        let Some(sample) = validate(&raw, &self.config) else {
            log::warn!(
                "Skipping cycle at {current_time_ms} ms: temperature={} humidity={}",
                raw.temperature_c,
                raw.humidity_pct
            );
            return Ok(None);
        };

        let line = encode(&sample)?;

        send_line(&mut self.serial, &line)?;

        log::debug!("Sent sample: {}", line.trim_end());

        Ok(Some(sample))
    }
}
