use std::collections::VecDeque;

use embedded_hal_nb::nb;
use embedded_hal_nb::serial::{ErrorType, Write};
use sensorstream_embedded::{
    ClimateReading, ClimateSensor, Error, LightLevel, LightSensor, MotionSensor, RawReading,
    Result, SamplerConfig, SerialSensorController,
};

/// Replays a fixed script of raw readings, one per cycle. The last entry
/// repeats once the script runs out.
pub struct ScriptedSensors {
    readings: VecDeque<RawReading>,
    current: RawReading,
}

impl ScriptedSensors {
    pub fn new(readings: impl IntoIterator<Item = RawReading>) -> Self {
        let mut readings: VecDeque<RawReading> = readings.into_iter().collect();
        let current = readings.pop_front().expect("at least one scripted reading");
        Self { readings, current }
    }

    fn advance(&mut self) {
        if let Some(next) = self.readings.pop_front() {
            self.current = next;
        }
    }
}

pub struct ScriptedMotion<'a>(pub &'a std::cell::RefCell<ScriptedSensors>);
pub struct ScriptedClimate<'a>(pub &'a std::cell::RefCell<ScriptedSensors>);
pub struct ScriptedLight<'a>(pub &'a std::cell::RefCell<ScriptedSensors>);

impl ClimateSensor for ScriptedClimate<'_> {
    fn read_climate(&mut self) -> ClimateReading {
        let reading = self.0.borrow().current;
        ClimateReading {
            temperature_c: reading.temperature_c,
            humidity_pct: reading.humidity_pct,
        }
    }
}

impl MotionSensor for ScriptedMotion<'_> {
    fn read_motion(&mut self) -> Result<bool> {
        Ok(self.0.borrow().current.motion)
    }
}

impl LightSensor for ScriptedLight<'_> {
    // Light is read last in a cycle, so the script advances here.
    fn read_light(&mut self) -> Result<LightLevel> {
        let mut sensors = self.0.borrow_mut();
        let light = sensors.current.light;
        sensors.advance();
        Ok(light)
    }
}

#[derive(Default)]
pub struct CaptureSerial {
    pub bytes: Vec<u8>,
}

impl CaptureSerial {
    pub fn lines(&self) -> Vec<String> {
        String::from_utf8(self.bytes.clone())
            .unwrap()
            .split_inclusive('\n')
            .map(str::to_owned)
            .collect()
    }
}

impl ErrorType for CaptureSerial {
    type Error = Error;
}

impl Write<u8> for CaptureSerial {
    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        self.bytes.push(word);
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}

pub type ScriptedController<'a> =
    SerialSensorController<ScriptedMotion<'a>, ScriptedClimate<'a>, ScriptedLight<'a>, CaptureSerial>;

pub fn scripted_controller(
    sensors: &std::cell::RefCell<ScriptedSensors>,
    config: SamplerConfig,
) -> ScriptedController<'_> {
    SerialSensorController::new(
        ScriptedMotion(sensors),
        ScriptedClimate(sensors),
        ScriptedLight(sensors),
        CaptureSerial::default(),
        config,
    )
    .unwrap()
}

pub fn digital(motion: bool, temperature_c: f32, humidity_pct: f32, light: bool) -> RawReading {
    RawReading {
        motion,
        temperature_c,
        humidity_pct,
        light: LightLevel::Digital(light),
    }
}

pub fn analog(motion: bool, temperature_c: f32, humidity_pct: f32, light: u16) -> RawReading {
    RawReading {
        motion,
        temperature_c,
        humidity_pct,
        light: LightLevel::Analog(light),
    }
}
