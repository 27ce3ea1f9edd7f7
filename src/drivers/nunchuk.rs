//! Wii Nunchuk over I2C, unencrypted init sequence.

use crate::{
    input::{AccelSample, ControllerSample, ControllerSource},
    platform::{DelayOps, I2cOps},
};

pub const NUNCHUK_ADDR: u8 = 0x52;

const INIT_STEP_1: [u8; 2] = [0xF0, 0x55];
const INIT_STEP_2: [u8; 2] = [0xFB, 0x00];
const REG_DATA: u8 = 0x00;
const REPORT_LEN: usize = 6;
const INIT_SETTLE_MS: u32 = 1;
// Conversion time between the register write and the report read.
const CONVERSION_US: u32 = 200;

const BUTTON_Z_BIT: u8 = 0x01;
const BUTTON_C_BIT: u8 = 0x02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NunchukError<E> {
    Bus(E),
    NotDetected,
    /// Report of all 0xFF: the extension is unplugged or not initialized.
    NoData,
}

pub struct Nunchuk<I2C, D> {
    i2c: I2C,
    delay: D,
}

impl<I2C, D> Nunchuk<I2C, D>
where
    I2C: I2cOps,
    D: DelayOps,
{
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self { i2c, delay }
    }

    pub fn init(&mut self) -> Result<(), NunchukError<I2C::Error>> {
        if !self.i2c.probe(NUNCHUK_ADDR).map_err(NunchukError::Bus)? {
            return Err(NunchukError::NotDetected);
        }
        self.i2c
            .write(NUNCHUK_ADDR, &INIT_STEP_1)
            .map_err(NunchukError::Bus)?;
        self.delay.delay_ms(INIT_SETTLE_MS);
        self.i2c
            .write(NUNCHUK_ADDR, &INIT_STEP_2)
            .map_err(NunchukError::Bus)?;
        self.delay.delay_ms(INIT_SETTLE_MS);
        Ok(())
    }

    pub fn read_report(&mut self) -> Result<[u8; REPORT_LEN], NunchukError<I2C::Error>> {
        self.i2c
            .write(NUNCHUK_ADDR, &[REG_DATA])
            .map_err(NunchukError::Bus)?;
        self.delay.delay_us(CONVERSION_US);
        let mut report = [0u8; REPORT_LEN];
        self.i2c
            .read(NUNCHUK_ADDR, &mut report)
            .map_err(NunchukError::Bus)?;
        if report.iter().all(|&byte| byte == 0xFF) {
            return Err(NunchukError::NoData);
        }
        Ok(report)
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

/// Report layout: stick X, stick Y, accel X/Y/Z high bits, then a byte
/// holding the accel low bits and the active-low Z and C buttons.
pub fn decode_report(report: &[u8; REPORT_LEN]) -> ControllerSample {
    let extra = report[5];
    let accel = |high: u8, shift: u8| ((high as u16) << 2) | ((extra >> shift) & 0x03) as u16;
    ControllerSample {
        stick_x: report[0],
        stick_y: report[1],
        accel: AccelSample {
            x: accel(report[2], 2),
            y: accel(report[3], 4),
            z: accel(report[4], 6),
        },
        button_primary: extra & BUTTON_C_BIT == 0,
        button_secondary: extra & BUTTON_Z_BIT == 0,
    }
}

impl<I2C, D> ControllerSource for Nunchuk<I2C, D>
where
    I2C: I2cOps,
    D: DelayOps,
{
    type Error = NunchukError<I2C::Error>;

    fn read_sample(&mut self) -> Result<ControllerSample, Self::Error> {
        self.read_report().map(|report| decode_report(&report))
    }
}
