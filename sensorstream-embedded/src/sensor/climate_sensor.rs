use embedded_io::Read;

use super::{ClimateReading, ClimateSensor};

const FRAME_LEN: usize = 5;
const SIGN_BIT: u8 = 0x80;

/// DHT11 temperature/humidity sensor fed by a bus driver that hands over the
/// raw 40-bit data frame.
///
/// Frame layout: humidity integral, humidity decimal, temperature integral,
/// temperature decimal (bit 7 set for sub-zero values), checksum. Any bus
/// failure is reported as NaN.
pub struct Dht11Sensor<IO>
where
    IO: Read,
{
    io_device: IO,
    frame: [u8; FRAME_LEN],
}

impl<IO> Dht11Sensor<IO>
where
    IO: Read,
{
    pub fn new(io_device: IO) -> Self {
        Self {
            io_device,
            frame: [0; FRAME_LEN],
        }
    }

    fn read_frame(&mut self) -> Option<[u8; FRAME_LEN]> {
        self.frame = [0; FRAME_LEN];

        let read_count = match self.io_device.read(&mut self.frame) {
            Ok(count) => count,
            Err(_) => {
                log::warn!("DHT11 bus read failed");
                return None;
            }
        };

        if read_count < FRAME_LEN {
            log::warn!("DHT11 frame truncated: {read_count} of {FRAME_LEN} bytes");
            return None;
        }

        let checksum = self.frame[..4]
            .iter()
            .fold(0u8, |sum, &byte| sum.wrapping_add(byte));
        if checksum != self.frame[4] {
            log::warn!("DHT11 checksum mismatch: {checksum:#04x} != {:#04x}", self.frame[4]);
            return None;
        }

        Some(self.frame)
    }
}

impl<IO> ClimateSensor for Dht11Sensor<IO>
where
    IO: Read,
{
    fn read_climate(&mut self) -> ClimateReading {
        match self.read_frame() {
            Some(frame) => decode_frame(&frame),
            None => ClimateReading::UNAVAILABLE,
        }
    }
}

fn decode_frame(frame: &[u8; FRAME_LEN]) -> ClimateReading {
    let humidity_pct = frame[0] as f32 + frame[1] as f32 * 0.1;

    let magnitude = frame[2] as f32 + (frame[3] & !SIGN_BIT) as f32 * 0.1;
    let temperature_c = if frame[3] & SIGN_BIT != 0 {
        -magnitude
    } else {
        magnitude
    };

    ClimateReading {
        temperature_c,
        humidity_pct,
    }
}

/// Builds the frame a DHT11 would send for the given values. Used by host
/// simulators and tests.
pub fn encode_dht11_frame(temperature_c: f32, humidity_pct: f32) -> [u8; FRAME_LEN] {
    let (humidity_int, humidity_dec) = split_tenths(humidity_pct.abs());
    let (temp_int, mut temp_dec) = split_tenths(temperature_c.abs());
    if temperature_c < 0.0 && (temp_int, temp_dec) != (0, 0) {
        temp_dec |= SIGN_BIT;
    }

    let mut frame = [humidity_int, humidity_dec, temp_int, temp_dec, 0];
    frame[4] = frame[..4]
        .iter()
        .fold(0u8, |sum, &byte| sum.wrapping_add(byte));
    frame
}

fn split_tenths(value: f32) -> (u8, u8) {
    let tenths = (value * 10.0 + 0.5) as u32;
    let tenths = tenths.min(255 * 10 + 9);
    ((tenths / 10) as u8, (tenths % 10) as u8)
}

#[cfg(test)]
pub mod mock {
    use super::*;

    #[derive(Debug)]
    pub struct MockIO {
        pub frame: [u8; FRAME_LEN],
        pub len: usize,
    }

    impl MockIO {
        pub fn with_values(temperature_c: f32, humidity_pct: f32) -> Self {
            Self {
                frame: encode_dht11_frame(temperature_c, humidity_pct),
                len: FRAME_LEN,
            }
        }
    }

    impl embedded_io::ErrorType for MockIO {
        type Error = embedded_io::ErrorKind;
    }

    impl Read for MockIO {
        fn read(&mut self, buf: &mut [u8]) -> core::result::Result<usize, Self::Error> {
            let count = self.len.min(buf.len());
            buf[..count].copy_from_slice(&self.frame[..count]);
            Ok(count)
        }
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 0.05,
            "{actual:.2} not within 0.05 of {expected:.2}"
        );
    }

    #[test]
    fn test_dht11_sensor() {
        const CASES: &[(f32, f32)] = &[(29.4, 61.2), (0.0, 20.0), (50.0, 90.0), (-5.3, 35.0)];

        for &(t, h) in CASES {
            let mut sensor = Dht11Sensor::new(MockIO::with_values(t, h));
            let reading = sensor.read_climate();
            assert_close(reading.temperature_c, t);
            assert_close(reading.humidity_pct, h);
        }
    }

    #[test]
    fn test_dht11_known_frame() {
        let io = MockIO {
            frame: [61, 2, 29, 4, 96],
            len: FRAME_LEN,
        };

        let reading = Dht11Sensor::new(io).read_climate();

        assert_close(reading.temperature_c, 29.4);
        assert_close(reading.humidity_pct, 61.2);
    }

    #[test]
    fn test_dht11_checksum_mismatch_is_nan() {
        let mut io = MockIO::with_values(21.0, 40.0);
        io.frame[4] = io.frame[4].wrapping_add(1);

        let reading = Dht11Sensor::new(io).read_climate();

        assert!(reading.temperature_c.is_nan());
        assert!(reading.humidity_pct.is_nan());
    }

    #[test]
    fn test_dht11_truncated_frame_is_nan() {
        let mut io = MockIO::with_values(21.0, 40.0);
        io.len = 3;

        let reading = Dht11Sensor::new(io).read_climate();

        assert!(reading.temperature_c.is_nan());
        assert!(reading.humidity_pct.is_nan());
    }
}
