use crate::{
    input::ControllerSample,
    led::LedColor,
    motor::MotorSession,
    storage::CalibrationRecord,
};

use super::{
    calibration::CalibrationStage,
    menu::{JoystickMenuItem, MainMenuItem, Menu},
};

/// Everything the display shows for the current state. The runner redraws
/// only when this value changes between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    DisplayCheck {
        yes: bool,
        failed: bool,
    },
    JoystickCheck {
        sample: ControllerSample,
        stick_moved: bool,
        move_hint: bool,
    },
    MainMenu {
        menu: Menu<MainMenuItem>,
    },
    LedTest {
        color: LedColor,
        level_index: usize,
        brightness: u8,
    },
    JoystickMenu {
        menu: Menu<JoystickMenuItem>,
        status: Option<&'static str>,
    },
    Calibration {
        stage: CalibrationStage,
        sample: ControllerSample,
    },
    AccelCalibration,
    Telemetry {
        sample: ControllerSample,
        calibration: CalibrationRecord,
        seconds_left: u32,
    },
    ClearConfirm {
        yes: bool,
    },
    MotorTest {
        session: MotorSession,
    },
    Complete,
}
