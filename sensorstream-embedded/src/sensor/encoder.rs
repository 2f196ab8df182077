use core::fmt::Write;

use heapless::String;

use crate::error::{Error, Result};

use super::{ValidatedLight, ValidatedSample};

/// Fits the analog line at its widest default values with room to spare.
pub const LINE_CAPACITY: usize = 128;

pub const KEY_MOTION: &str = "pir";
pub const KEY_TEMPERATURE: &str = "dht11_temp_c";
pub const KEY_HUMIDITY: &str = "dht11_humidity";
pub const KEY_LIGHT_DIGITAL: &str = "lm393";
pub const KEY_LIGHT_RAW: &str = "lm393_raw";
pub const KEY_LIGHT_LUX: &str = "lm393_lux";

/// Serializes one sample as a minified JSON line.
///
/// Key order is fixed per light variant, floats carry one decimal and the
/// line ends with `\n`. No field can hold characters that need escaping.
pub fn encode(sample: &ValidatedSample) -> Result<String<LINE_CAPACITY>> {
    let mut line = String::new();
    write_line(&mut line, sample).map_err(|_| Error::EncodeOverflow)?;
    Ok(line)
}

fn write_line<W: Write>(out: &mut W, sample: &ValidatedSample) -> core::fmt::Result {
    write!(
        out,
        "{{\"{KEY_MOTION}\":{},\"{KEY_TEMPERATURE}\":{:.1},\"{KEY_HUMIDITY}\":{:.1}",
        sample.motion, sample.temperature_c, sample.humidity_pct
    )?;

    match sample.light {
        ValidatedLight::Digital(level) => write!(out, ",\"{KEY_LIGHT_DIGITAL}\":{level}")?,
        ValidatedLight::Analog { raw, lux } => {
            write!(out, ",\"{KEY_LIGHT_RAW}\":{raw},\"{KEY_LIGHT_LUX}\":{lux:.1}")?
        }
    }

    out.write_str("}\n")
}
