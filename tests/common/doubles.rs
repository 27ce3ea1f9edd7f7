//! Host doubles for the hardware seams, shared by the in-crate unit tests
//! and the scenario tests under `tests/`.

#![allow(dead_code)]

use core::{cell::Cell, convert::Infallible};
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use embedded_storage::{ReadStorage, Storage};

use mecanum_setup::{
    config::{CALIBRATION_STORE_REGION_LEN, SCREEN_HEIGHT, SCREEN_WIDTH},
    input::{ControllerSample, ControllerSource},
    led::{IndicatorLight, LedColor},
    motor::{MotorDriverIo, MotorUnderTest},
    platform::{DelayOps, I2cOps},
    ui::SetupDisplay,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptExhausted;

#[derive(Default)]
pub struct ScriptedController {
    script: VecDeque<Option<ControllerSample>>,
}

impl ScriptedController {
    pub fn from_samples(samples: &[ControllerSample]) -> Self {
        Self {
            script: samples.iter().copied().map(Some).collect(),
        }
    }

    pub fn push(&mut self, sample: ControllerSample) {
        self.script.push_back(Some(sample));
    }

    pub fn push_failure(&mut self) {
        self.script.push_back(None);
    }
}

impl ControllerSource for ScriptedController {
    type Error = ScriptExhausted;

    fn read_sample(&mut self) -> Result<ControllerSample, Self::Error> {
        self.script.pop_front().flatten().ok_or(ScriptExhausted)
    }
}

#[derive(Clone)]
pub struct RamStorage {
    pub bytes: [u8; CALIBRATION_STORE_REGION_LEN],
    pub fail_writes: bool,
}

impl RamStorage {
    pub fn erased() -> Self {
        Self {
            bytes: [0xFF; CALIBRATION_STORE_REGION_LEN],
            fail_writes: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RamStorageError {
    OutOfBounds,
    WriteRejected,
}

impl RamStorage {
    fn range(&self, offset: u32, len: usize) -> Result<core::ops::Range<usize>, RamStorageError> {
        let start = offset as usize;
        let end = start + len;
        if end > self.bytes.len() {
            return Err(RamStorageError::OutOfBounds);
        }
        Ok(start..end)
    }
}

impl ReadStorage for RamStorage {
    type Error = RamStorageError;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let range = self.range(offset, bytes.len())?;
        bytes.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.bytes.len()
    }
}

impl Storage for RamStorage {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(RamStorageError::WriteRejected);
        }
        let range = self.range(offset, bytes.len())?;
        self.bytes[range].copy_from_slice(bytes);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorEvent {
    Direction(MotorUnderTest, bool),
    Step(MotorUnderTest, bool),
    Enabled(bool),
}

#[derive(Default)]
pub struct RecordingMotors {
    pub events: Vec<MotorEvent>,
}

impl RecordingMotors {
    pub fn last_direction(&self, motor: MotorUnderTest) -> Option<bool> {
        self.events.iter().rev().find_map(|event| match *event {
            MotorEvent::Direction(m, level) if m == motor => Some(level),
            _ => None,
        })
    }

    pub fn rising_edges(&self, motor: MotorUnderTest) -> usize {
        self.events
            .iter()
            .filter(|event| **event == MotorEvent::Step(motor, true))
            .count()
    }

    pub fn enabled(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|event| match *event {
            MotorEvent::Enabled(on) => Some(on),
            _ => None,
        })
    }
}

impl MotorDriverIo for RecordingMotors {
    type Error = Infallible;

    fn set_direction(&mut self, motor: MotorUnderTest, high: bool) -> Result<(), Self::Error> {
        self.events.push(MotorEvent::Direction(motor, high));
        Ok(())
    }

    fn set_step(&mut self, motor: MotorUnderTest, high: bool) -> Result<(), Self::Error> {
        self.events.push(MotorEvent::Step(motor, high));
        Ok(())
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.events.push(MotorEvent::Enabled(enabled));
        Ok(())
    }
}

#[derive(Default)]
pub struct NoopDelay {
    total_us: Cell<u64>,
}

impl NoopDelay {
    pub fn total_us(&self) -> u64 {
        self.total_us.get()
    }
}

impl DelayOps for NoopDelay {
    fn delay_us(&self, micros: u32) {
        self.total_us.set(self.total_us.get() + micros as u64);
    }

    fn delay_ms(&self, millis: u32) {
        self.delay_us(millis.saturating_mul(1000));
    }
}

#[derive(Clone, Default)]
pub struct SharedPin {
    level: Rc<Cell<bool>>,
}

impl SharedPin {
    pub fn is_high(&self) -> bool {
        self.level.get()
    }
}

impl embedded_hal::digital::ErrorType for SharedPin {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for SharedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.level.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.level.set(true);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingLight {
    pending: (LedColor, u8),
    pub committed: Vec<(LedColor, u8)>,
}

impl RecordingLight {
    pub fn last(&self) -> Option<(LedColor, u8)> {
        self.committed.last().copied()
    }
}

impl IndicatorLight for RecordingLight {
    type Error = Infallible;

    fn set_color(&mut self, color: LedColor) {
        self.pending.0 = color;
    }

    fn set_brightness(&mut self, level: u8) {
        self.pending.1 = level;
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.committed.push(self.pending);
        Ok(())
    }
}

/// 128x64 monochrome framebuffer, one `u128` per row.
pub struct FrameDisplay {
    rows: [u128; SCREEN_HEIGHT as usize],
    pub flushes: usize,
}

impl Default for FrameDisplay {
    fn default() -> Self {
        Self {
            rows: [0; SCREEN_HEIGHT as usize],
            flushes: 0,
        }
    }
}

impl FrameDisplay {
    pub fn lit_pixels(&self) -> u32 {
        self.rows.iter().map(|row| row.count_ones()).sum()
    }

    pub fn is_lit(&self, x: i32, y: i32) -> bool {
        (0..SCREEN_WIDTH).contains(&x)
            && (0..SCREEN_HEIGHT).contains(&y)
            && self.rows[y as usize] & (1u128 << x) != 0
    }

    pub fn lit_in_rows(&self, rows: core::ops::Range<i32>) -> u32 {
        rows.filter(|y| (0..SCREEN_HEIGHT).contains(y))
            .map(|y| self.rows[y as usize].count_ones())
            .sum()
    }
}

impl OriginDimensions for FrameDisplay {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }
}

impl DrawTarget for FrameDisplay {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if !(0..SCREEN_WIDTH).contains(&point.x) || !(0..SCREEN_HEIGHT).contains(&point.y) {
                continue;
            }
            let mask = 1u128 << point.x;
            let row = &mut self.rows[point.y as usize];
            match color {
                BinaryColor::On => *row |= mask,
                BinaryColor::Off => *row &= !mask,
            }
        }
        Ok(())
    }
}

impl SetupDisplay for FrameDisplay {
    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusNack;

/// I2C double: records writes, answers reads from a queue. Clones share the
/// read queue, so reports can still be queued after the bus is handed off.
#[derive(Clone, Default)]
pub struct ScriptedI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    reads: Rc<RefCell<VecDeque<Result<Vec<u8>, BusNack>>>>,
    pub present: bool,
}

impl ScriptedI2c {
    pub fn with_device() -> Self {
        Self {
            present: true,
            ..Self::default()
        }
    }

    pub fn queue_read(&mut self, bytes: &[u8]) {
        self.reads.borrow_mut().push_back(Ok(bytes.to_vec()));
    }

    pub fn pending_reads(&self) -> usize {
        self.reads.borrow().len()
    }

    pub fn queue_nack(&mut self) {
        self.reads.borrow_mut().push_back(Err(BusNack));
    }
}

impl I2cOps for ScriptedI2c {
    type Error = BusNack;

    fn read(&mut self, _addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        let bytes = self.reads.borrow_mut().pop_front().unwrap_or(Err(BusNack))?;
        let len = buffer.len().min(bytes.len());
        buffer[..len].copy_from_slice(&bytes[..len]);
        Ok(())
    }

    fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        if !self.present {
            return Err(BusNack);
        }
        self.writes.push((addr, bytes.to_vec()));
        Ok(())
    }

    fn write_read(&mut self, addr: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.write(addr, bytes)?;
        self.read(addr, buffer)
    }

    fn probe(&mut self, _addr: u8) -> Result<bool, Self::Error> {
        Ok(self.present)
    }
}
