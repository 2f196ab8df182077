use std::error::Error;

use sensorstream_embedded::SamplerConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Serial {
    pub baud_rate: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightVariant {
    Digital,
    Analog,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub light_variant: LightVariant,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Simulation {
    pub seed: Option<u64>,
    /// Wall-clock length of one simulated day
    pub day_length_secs: f64,
    pub motion_probability: f64,
    /// Chance that a DHT11 frame arrives with a bad checksum
    pub frame_error_probability: f64,
    /// Chance that the ADC returns a value beyond its full scale
    pub adc_glitch_probability: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub sampler: SamplerConfig,
    pub serial: Serial,
    pub board: Board,
    pub simulation: Simulation,
}

impl Settings {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::from_toml(include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../",
            "configs/default.toml"
        )))
    }

    pub fn from_toml(source: &str) -> Result<Self, Box<dyn Error>> {
        let settings: Settings = toml::from_str(source)?;

        settings.sampler.check().map_err(|e| e.to_string())?;

        if settings.board.poll_interval_ms == 0 {
            return Err("board.poll_interval_ms must be positive".into());
        }

        if !(settings.simulation.day_length_secs > 0.0) {
            return Err("simulation.day_length_secs must be positive".into());
        }

        let probabilities = [
            ("motion_probability", settings.simulation.motion_probability),
            ("frame_error_probability", settings.simulation.frame_error_probability),
            ("adc_glitch_probability", settings.simulation.adc_glitch_probability),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("simulation.{name} must be within [0, 1], got {value}").into());
            }
        }

        Ok(settings)
    }
}
