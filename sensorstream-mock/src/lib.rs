use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sensorstream_embedded::{
    AnalogLightSensor, DigitalLightSensor, Dht11Sensor, LUX_FULL_SCALE, PirSensor,
    SerialSensorController,
};
use tokio::{signal, time};

use crate::board::{
    BoardLight, DayClock, IoSerial, SimulatedAdc, SimulatedDhtBus, SimulatedLightPin,
    SimulatedPin, StdDelay,
};
use crate::settings::{LightVariant, Settings};

pub mod board;
pub mod settings;
pub mod simulate;

pub type MockController<W> =
    SerialSensorController<PirSensor<SimulatedPin>, Dht11Sensor<SimulatedDhtBus>, BoardLight, IoSerial<W>>;

pub fn build_controller<W: io::Write>(
    settings: &Settings,
    clock: DayClock,
    writer: W,
) -> Result<MockController<W>, Box<dyn Error>> {
    let simulation = &settings.simulation;
    let mut rng = match simulation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let motion = PirSensor::new(SimulatedPin::new(
        StdRng::seed_from_u64(rng.random()),
        simulation.motion_probability,
    ));

    let climate = Dht11Sensor::new(SimulatedDhtBus::new(
        clock,
        StdRng::seed_from_u64(rng.random()),
        simulation.frame_error_probability,
    )?);

    let light = match settings.board.light_variant {
        LightVariant::Digital => BoardLight::Digital(DigitalLightSensor::new(
            SimulatedLightPin::new(clock, LUX_FULL_SCALE as f64 / 2.0),
        )),
        LightVariant::Analog => BoardLight::Analog(AnalogLightSensor::new(SimulatedAdc::new(
            clock,
            StdRng::seed_from_u64(rng.random()),
            settings.sampler.light_max_raw,
            simulation.adc_glitch_probability,
        ))),
    };

    let controller = SerialSensorController::new(
        motion,
        climate,
        light,
        IoSerial::new(writer),
        settings.sampler,
    )
    .map_err(|e| e.to_string())?;

    Ok(controller)
}

pub async fn run(settings: &Arc<Settings>) -> Result<(), Box<dyn Error>> {
    let clock = DayClock::new(Duration::from_secs_f64(settings.simulation.day_length_secs));
    let mut controller = build_controller(settings, clock, io::BufWriter::new(io::stdout()))?;

    tracing::info!(
        "Simulated board on serial at {} baud, {:?} light sensor, sampling every {} ms",
        settings.serial.baud_rate,
        settings.board.light_variant,
        settings.sampler.interval_ms,
    );

    tokio::task::block_in_place(|| controller.init(&mut StdDelay));

    let started = Instant::now();
    let mut interval = time::interval(Duration::from_millis(settings.board.poll_interval_ms));
    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Truncation wraps like a hardware millisecond counter
                let now_ms = started.elapsed().as_millis() as u32;

                match controller.process(now_ms) {
                    Ok(Some(sample)) => tracing::trace!("Emitted: {:?}", sample),
                    Ok(None) => {}
                    Err(e) => tracing::error!("Sample cycle at {} ms failed: {}", now_ms, e),
                }
            },
            result = &mut shutdown => {
                result?;
                tracing::info!("Shutting down simulated board");
                break;
            }
        }
    }

    Ok(())
}
