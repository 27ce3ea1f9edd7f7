//! Per-wheel stepper exercise: wheel-to-pin mapping, mirrored direction
//! sense and open-loop step trains.

mod session;
mod stepper_bank;

pub use session::{MicrostepDiagnostic, MotorSession};
pub use stepper_bank::{StepperBank, WheelPins};

use crate::{config::PulseTiming, platform::DelayOps};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotorUnderTest {
    FrontLeft,
    RearLeft,
    RearRight,
    FrontRight,
}

impl MotorUnderTest {
    pub const ALL: [Self; 4] = [
        Self::FrontLeft,
        Self::RearLeft,
        Self::RearRight,
        Self::FrontRight,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::FrontLeft => 0,
            Self::RearLeft => 1,
            Self::RearRight => 2,
            Self::FrontRight => 3,
        }
    }

    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FrontLeft => "Front Left",
            Self::RearLeft => "Rear Left",
            Self::RearRight => "Rear Right",
            Self::FrontRight => "Front Right",
        }
    }

    /// Right-side wheels are mounted mirrored, so their direction line is
    /// inverted to keep "clockwise" meaning "drive forward".
    pub const fn direction_level(self, clockwise: bool) -> bool {
        match self {
            Self::FrontLeft | Self::RearLeft => clockwise,
            Self::RearRight | Self::FrontRight => !clockwise,
        }
    }
}

pub trait MotorDriverIo {
    type Error: core::fmt::Debug;

    fn set_direction(&mut self, motor: MotorUnderTest, high: bool) -> Result<(), Self::Error>;
    fn set_step(&mut self, motor: MotorUnderTest, high: bool) -> Result<(), Self::Error>;
    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::Error>;
}

/// Drives `steps` pulses on one wheel. Blocks for roughly
/// `steps * (high_us + low_us)` microseconds.
pub fn run_steps<M, D>(
    io: &mut M,
    delay: &D,
    timing: &PulseTiming,
    motor: MotorUnderTest,
    clockwise: bool,
    steps: u32,
) -> Result<(), M::Error>
where
    M: MotorDriverIo,
    D: DelayOps,
{
    io.set_direction(motor, motor.direction_level(clockwise))?;
    delay.delay_us(timing.settle_us);
    io.set_step(motor, false)?;
    delay.delay_us(timing.settle_us);

    for _ in 0..steps {
        io.set_step(motor, true)?;
        delay.delay_us(timing.high_us);
        io.set_step(motor, false)?;
        delay.delay_us(timing.low_us);
    }
    Ok(())
}
