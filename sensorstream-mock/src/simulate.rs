use std::f64::consts::PI;

pub fn simulation_lux(day_fraction: f64) -> f64 {
    let radians = day_fraction * 2.0 * PI;

    // Define maximum sunlight and moonlight lux levels
    const MAX_SUNLIGHT_LUX: f64 = 800.0;
    const MAX_MOONLIGHT_LUX: f64 = 5.0;

    // Smooth transition factors
    const SUNRISE_START: f64 = 0.23;
    const SUNRISE_END: f64 = 0.25;
    const SUNSET_START: f64 = 0.73;
    const SUNSET_END: f64 = 0.75;

    if (SUNRISE_START..=SUNSET_END).contains(&day_fraction) {
        if day_fraction <= SUNRISE_END {
            // Sunrise - increase light smoothly using a sine function
            let sunrise_radians = ((day_fraction - SUNRISE_START) / (SUNRISE_END - SUNRISE_START)) * PI / 2.0;
            sunrise_radians.sin() * MAX_SUNLIGHT_LUX
        } else if day_fraction >= SUNSET_START {
            // Sunset - decrease light smoothly using a cosine function
            let sunset_radians = ((day_fraction - SUNSET_START) / (SUNSET_END - SUNSET_START)) * PI / 2.0;
            sunset_radians.cos() * MAX_SUNLIGHT_LUX
        } else {
            MAX_SUNLIGHT_LUX
        }
    } else {
        // Moonlight peaks at midnight
        (radians.cos().max(0.0) * (MAX_MOONLIGHT_LUX - 0.01)) + 0.01
    }
}

pub fn simulated_humidity(day_fraction: f64) -> f64 {
    let radians = day_fraction * 2.0 * PI;

    if (0.3..=0.7).contains(&day_fraction) {
        (radians.sin().max(0.0) * 25.0) + 65.0
    } else {
        (radians.cos().max(0.0) * 30.0) + 60.0
    }
}

/// Peaks in the afternoon and never drops below 10 ℃ overnight.
pub fn simulated_temperature(day_fraction: f64) -> f64 {
    let radians = (day_fraction - 0.25) * 2.0 * PI;

    radians.sin().max(0.0) * 20.0 + 10.0
}
