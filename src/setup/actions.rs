use crate::{led::LedColor, motor::MotorUnderTest, storage::CalibrationRecord};

/// Most actions a single tick can emit (LED test entry plus a light update).
pub const MAX_TICK_ACTIONS: usize = 4;

/// Hardware side effects requested by the setup machine, executed in order
/// by the runner after the tick that produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupAction {
    SaveCalibration(CalibrationRecord),
    ClearCalibration,
    ShowLight { color: LedColor, brightness: u8 },
    LightOff,
    EnableMotors(bool),
    RunSteps {
        motor: MotorUnderTest,
        clockwise: bool,
        steps: u32,
    },
}

pub type SetupActions = heapless::Vec<SetupAction, MAX_TICK_ACTIONS>;
