//! Bench harness: the real Nunchuk driver on a scripted bus inside a full
//! runner, with the operator's gestures as helpers.

#![allow(dead_code)]

pub mod doubles;

use mecanum_setup::{
    config::{SetupConfig, UI_TICK_MS},
    drivers::Nunchuk,
    runtime::{SetupPeripherals, SetupRunner},
    storage::CalibrationStore,
};

use doubles::{FrameDisplay, NoopDelay, RamStorage, RecordingLight, RecordingMotors, ScriptedI2c};

pub const CENTER: u8 = 128;
pub const LOW: u8 = 10;
pub const HIGH: u8 = 250;

/// Raw 6-byte report with the buttons encoded active-low.
pub fn report(x: u8, y: u8, c: bool, z: bool) -> [u8; 6] {
    let mut extra = 0x03;
    if c {
        extra &= !0x02;
    }
    if z {
        extra &= !0x01;
    }
    [x, y, 0x80, 0x80, 0x80, extra]
}

pub type BenchRunner = SetupRunner<
    Nunchuk<ScriptedI2c, NoopDelay>,
    RamStorage,
    FrameDisplay,
    RecordingLight,
    RecordingMotors,
    NoopDelay,
>;

/// A powered robot on the bench: the operator queues controller reports
/// and the runner consumes one per tick. An empty queue reads as a NACK.
pub struct Bench {
    pub runner: BenchRunner,
    pub bus: ScriptedI2c,
    pub now_ms: u64,
}

impl Bench {
    pub fn boot(flash: RamStorage) -> Self {
        let bus = ScriptedI2c::with_device();
        let mut controller = Nunchuk::new(bus.clone(), NoopDelay::default());
        controller.init().expect("nunchuk init");
        let runner = SetupRunner::new(
            SetupConfig::default(),
            SetupPeripherals {
                controller,
                store: CalibrationStore::new(flash, 0),
                display: FrameDisplay::default(),
                light: RecordingLight::default(),
                motors: RecordingMotors::default(),
                delay: NoopDelay::default(),
            },
        );
        Self {
            runner,
            bus,
            now_ms: 0,
        }
    }

    /// Power cycle: a fresh runner over the same flash contents.
    pub fn reboot(mut self) -> Self {
        let flash = self.runner.store_mut().storage_mut().clone();
        Self::boot(flash)
    }

    pub fn flash(&mut self) -> RamStorage {
        self.runner.store_mut().storage_mut().clone()
    }

    pub fn tick(&mut self) {
        self.now_ms += UI_TICK_MS;
        self.runner.tick(self.now_ms);
    }

    /// Ticks until every queued report has been read.
    pub fn drain(&mut self) {
        while self.bus.pending_reads() > 0 {
            self.tick();
        }
    }

    pub fn hold(&mut self, x: u8, y: u8, c: bool, z: bool) {
        self.bus.queue_read(&report(x, y, c, z));
        self.drain();
    }

    pub fn press_c_at(&mut self, x: u8, y: u8) {
        self.hold(x, y, true, false);
        self.hold(x, y, false, false);
    }

    pub fn press_c(&mut self) {
        self.press_c_at(CENTER, CENTER);
    }

    pub fn press_z(&mut self) {
        self.hold(CENTER, CENTER, false, true);
        self.hold(CENTER, CENTER, false, false);
    }

    pub fn flick(&mut self, x: u8, y: u8) {
        self.hold(x, y, false, false);
        self.hold(CENTER, CENTER, false, false);
    }

    pub fn up(&mut self) {
        self.flick(CENTER, HIGH);
    }

    pub fn down(&mut self) {
        self.flick(CENTER, LOW);
    }

    pub fn left(&mut self) {
        self.flick(LOW, CENTER);
    }

    pub fn right(&mut self) {
        self.flick(HIGH, CENTER);
    }

    /// Init, left, right, up, down, then center at (128, 130).
    pub fn calibrate(&mut self) {
        self.press_c();
        for (x, y) in [(LOW, CENTER), (HIGH, CENTER), (CENTER, HIGH), (CENTER, LOW)] {
            self.press_c_at(x, y);
        }
        self.press_c_at(CENTER, 130);
    }
}
