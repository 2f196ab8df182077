use super::{LightLevel, RawReading, SamplerConfig, ValidatedLight, ValidatedSample};

/// Upper end of the lux display range.
pub const LUX_FULL_SCALE: f32 = 1000.0;

/// Returns `None` when either climate value is NaN; the whole cycle is then
/// dropped. Every other out-of-range value saturates at its bound.
pub fn validate(raw: &RawReading, config: &SamplerConfig) -> Option<ValidatedSample> {
    if raw.temperature_c.is_nan() || raw.humidity_pct.is_nan() {
        return None;
    }

    let light = match raw.light {
        LightLevel::Digital(level) => ValidatedLight::Digital(level as u8),
        LightLevel::Analog(value) => {
            let raw = value.min(config.light_max_raw);
            ValidatedLight::Analog {
                raw,
                lux: raw_to_lux(raw, config.light_max_raw),
            }
        }
    };

    Some(ValidatedSample {
        motion: raw.motion as u8,
        temperature_c: raw.temperature_c.clamp(config.temp_min, config.temp_max),
        humidity_pct: raw.humidity_pct.clamp(config.humidity_min, config.humidity_max),
        light,
    })
}

/// Linear rescale of the relative analog level onto 0..=1000 lux.
///
/// This is a display estimate, not a calibrated photometric conversion: the
/// LM393 module's photoresistor response is neither linear nor characterised.
pub fn raw_to_lux(raw: u16, max_raw: u16) -> f32 {
    (raw as f32 / max_raw as f32) * LUX_FULL_SCALE
}
