use statig::blocking::IntoStateMachineExt as _;

use crate::{
    config::SetupConfig,
    input::InputFrame,
    motor::MotorSession,
    storage::CalibrationRecord,
};

use super::actions::SetupActions;
use super::calibration::CalibrationStage;
use super::events::SetupTick;
use super::machine::{DispatchContext, SetupMachine, View};
use super::menu::{JoystickMenuItem, MainMenuItem};
use super::screen::Screen;
use super::types::SetupMode;

#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub before: SetupMode,
    pub after: SetupMode,
    pub actions: SetupActions,
}

impl TickOutcome {
    pub fn mode_changed(&self) -> bool {
        self.before != self.after
    }
}

/// The whole setup wizard state. Pure: input frames in, actions out.
pub struct SetupEngine {
    machine: statig::blocking::StateMachine<SetupMachine>,
}

impl SetupEngine {
    /// `stored` is the record loaded at startup; `None` forces calibration
    /// during the basic joystick check.
    pub fn new(config: SetupConfig, stored: Option<CalibrationRecord>) -> Self {
        Self {
            machine: SetupMachine::new(config, stored).state_machine(),
        }
    }

    /// Advances by one loop iteration. `frame` is `None` when the controller
    /// could not be read this tick; timeouts still progress.
    pub fn tick(&mut self, now_ms: u64, frame: Option<InputFrame>) -> TickOutcome {
        let before = self.mode();
        let frame = frame.unwrap_or_else(|| InputFrame::quiet(self.machine.inner().sample));
        let mut context = DispatchContext::default();
        self.machine
            .handle_with_context(&SetupTick { now_ms, frame }, &mut context);
        TickOutcome {
            before,
            after: self.mode(),
            actions: context.actions,
        }
    }

    pub fn mode(&self) -> SetupMode {
        self.machine.inner().mode()
    }

    pub fn screen(&self) -> Screen {
        self.machine.inner().screen()
    }

    pub fn calibration(&self) -> CalibrationRecord {
        self.machine.inner().calibration
    }

    pub fn calibration_loaded(&self) -> bool {
        self.machine.inner().calibration_loaded
    }

    pub fn main_menu_selection(&self) -> MainMenuItem {
        self.machine.inner().main_menu.selected()
    }

    pub fn joystick_menu_selection(&self) -> JoystickMenuItem {
        self.machine.inner().joystick_menu.selected()
    }

    /// Stage of the running XY calibration, if one is on screen.
    pub fn calibration_stage(&self) -> Option<CalibrationStage> {
        let inner = self.machine.inner();
        (inner.view == View::XyCalibration).then(|| inner.xy.stage())
    }

    pub fn motor_session(&self) -> MotorSession {
        self.machine.inner().motor
    }

    pub fn is_complete(&self) -> bool {
        self.mode() == SetupMode::Complete
    }
}
