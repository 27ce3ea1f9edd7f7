use log::{debug, info, warn};
use statig::prelude::*;

use crate::{
    config::SetupConfig,
    input::{ControllerSample, InputFrame},
    led::LedPreview,
    motor::MotorSession,
    storage::CalibrationRecord,
};

use super::actions::{SetupAction, SetupActions};
use super::calibration::{CalibrationProgress, XyCalibration};
use super::events::SetupTick;
use super::menu::{JoystickMenuItem, MainMenuItem, Menu};
use super::prompts::{ConfirmPrompt, TelemetryView};
use super::screen::Screen;
use super::types::{CalibrationOrigin, SetupMode};

const STATUS_SAVED: &str = "Calibration saved";
const STATUS_CANCELLED: &str = "Calibration cancelled";
const STATUS_CLEARED: &str = "Calibration cleared";
const STATUS_CLEAR_KEPT: &str = "Clear cancelled";

/// Mirrors the active `statig` state so screens and modes can be derived
/// without inspecting the generated state enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum View {
    DisplayCheck,
    JoystickCheck,
    MainMenu,
    LedTest,
    JoystickMenu,
    XyCalibration,
    AccelCalibration,
    Telemetry,
    ClearConfirm,
    MotorTest,
    Complete,
}

pub(super) struct SetupMachine {
    pub(super) config: SetupConfig,
    pub(super) view: View,
    pub(super) now_ms: u64,
    pub(super) sample: ControllerSample,
    pub(super) calibration: CalibrationRecord,
    pub(super) calibration_loaded: bool,
    display_prompt: ConfirmPrompt,
    display_failed: bool,
    stick_moved: bool,
    move_hint: bool,
    pub(super) main_menu: Menu<MainMenuItem>,
    pub(super) joystick_menu: Menu<JoystickMenuItem>,
    joystick_status: Option<&'static str>,
    pub(super) led: LedPreview,
    pub(super) xy: XyCalibration,
    calibration_origin: CalibrationOrigin,
    clear_prompt: ConfirmPrompt,
    telemetry: TelemetryView,
    pub(super) motor: MotorSession,
}

#[derive(Default)]
pub(super) struct DispatchContext {
    pub(super) actions: SetupActions,
}

impl DispatchContext {
    fn emit(&mut self, action: SetupAction) {
        if let Err(action) = self.actions.push(action) {
            warn!("setup action dropped: {:?}", action);
        }
    }
}

impl SetupMachine {
    pub(super) fn new(config: SetupConfig, stored: Option<CalibrationRecord>) -> Self {
        let stored = stored.filter(|record| {
            let usable = record.is_consistent();
            if !usable {
                warn!("stored calibration rejected: {:?}", record);
            }
            usable
        });
        let calibration = stored.unwrap_or_default();
        Self {
            config,
            view: View::DisplayCheck,
            now_ms: 0,
            sample: ControllerSample::centered(),
            calibration,
            calibration_loaded: stored.is_some(),
            display_prompt: ConfirmPrompt::defaulting_to(true),
            display_failed: false,
            stick_moved: false,
            move_hint: false,
            main_menu: Menu::default(),
            joystick_menu: Menu::default(),
            joystick_status: None,
            led: LedPreview::default(),
            xy: XyCalibration::new(calibration),
            calibration_origin: CalibrationOrigin::JoystickMenu,
            clear_prompt: ConfirmPrompt::defaulting_to(false),
            telemetry: TelemetryView::starting_at(0, 0),
            motor: MotorSession::default(),
        }
    }

    pub(super) fn mode(&self) -> SetupMode {
        match self.view {
            View::DisplayCheck => SetupMode::DisplayCheck,
            View::JoystickCheck => SetupMode::BasicJoystickCheck,
            View::MainMenu => SetupMode::MainMenu,
            View::LedTest => SetupMode::LedTest,
            View::JoystickMenu
            | View::AccelCalibration
            | View::Telemetry
            | View::ClearConfirm => SetupMode::JoystickSubmenu,
            View::XyCalibration => match self.calibration_origin {
                CalibrationOrigin::JoystickCheck => SetupMode::BasicJoystickCheck,
                CalibrationOrigin::JoystickMenu => SetupMode::JoystickSubmenu,
            },
            View::MotorTest => SetupMode::MotorTest,
            View::Complete => SetupMode::Complete,
        }
    }

    pub(super) fn screen(&self) -> Screen {
        match self.view {
            View::DisplayCheck => Screen::DisplayCheck {
                yes: self.display_prompt.is_yes(),
                failed: self.display_failed,
            },
            View::JoystickCheck => Screen::JoystickCheck {
                sample: self.sample,
                stick_moved: self.stick_moved,
                move_hint: self.move_hint,
            },
            View::MainMenu => Screen::MainMenu {
                menu: self.main_menu,
            },
            View::LedTest => Screen::LedTest {
                color: self.led.color(),
                level_index: self.led.level_index(),
                brightness: self.led.brightness(),
            },
            View::JoystickMenu => Screen::JoystickMenu {
                menu: self.joystick_menu,
                status: self.joystick_status,
            },
            View::XyCalibration => Screen::Calibration {
                stage: self.xy.stage(),
                sample: self.sample,
            },
            View::AccelCalibration => Screen::AccelCalibration,
            View::Telemetry => Screen::Telemetry {
                sample: self.sample,
                calibration: self.calibration,
                seconds_left: self.telemetry.seconds_remaining(self.now_ms),
            },
            View::ClearConfirm => Screen::ClearConfirm {
                yes: self.clear_prompt.is_yes(),
            },
            View::MotorTest => Screen::MotorTest {
                session: self.motor,
            },
            View::Complete => Screen::Complete,
        }
    }

    fn observe(&mut self, event: &SetupTick) -> InputFrame {
        self.now_ms = event.now_ms;
        if event.frame.fresh {
            self.sample = event.frame.sample;
        }
        event.frame
    }

    fn enter(&mut self, view: View) {
        let before = self.mode();
        self.view = view;
        let after = self.mode();
        if before != after {
            info!("setup mode {} -> {}", before.label(), after.label());
        }
    }

    fn light_action(&self) -> SetupAction {
        SetupAction::ShowLight {
            color: self.led.color(),
            brightness: self.led.brightness(),
        }
    }

    fn open_main_menu(&mut self) -> Outcome<State> {
        self.enter(View::MainMenu);
        Transition(State::main_menu())
    }

    fn open_joystick_menu(&mut self, status: Option<&'static str>) -> Outcome<State> {
        self.joystick_status = status;
        self.enter(View::JoystickMenu);
        Transition(State::joystick_menu())
    }

    fn begin_joystick_check(&mut self) -> Outcome<State> {
        self.stick_moved = false;
        self.move_hint = false;
        if self.calibration_loaded {
            self.enter(View::JoystickCheck);
            Transition(State::basic_joystick_check())
        } else {
            info!("no stored calibration, calibrating first");
            self.start_calibration(CalibrationOrigin::JoystickCheck)
        }
    }

    fn start_calibration(&mut self, origin: CalibrationOrigin) -> Outcome<State> {
        self.xy = XyCalibration::new(self.calibration);
        self.calibration_origin = origin;
        self.enter(View::XyCalibration);
        Transition(State::xy_calibration())
    }
}

#[state_machine(initial = "State::display_check()")]
impl SetupMachine {
    #[state]
    fn display_check(&mut self, event: &SetupTick) -> Outcome<State> {
        let frame = self.observe(event);
        if frame.primary_pressed {
            if self.display_prompt.is_yes() {
                info!("display confirmed by operator");
                return self.begin_joystick_check();
            }
            if !self.display_failed {
                warn!("display reported unreadable, check wiring and I2C address");
            }
            self.display_failed = true;
            return Handled;
        }
        self.display_prompt.steer(&frame.stick);
        Handled
    }

    #[state]
    fn basic_joystick_check(&mut self, event: &SetupTick) -> Outcome<State> {
        let frame = self.observe(event);
        self.stick_moved |= frame.deflected;
        if frame.primary_pressed {
            if self.stick_moved {
                return self.open_main_menu();
            }
            self.move_hint = true;
        }
        Handled
    }

    #[state]
    fn main_menu(&mut self, context: &mut DispatchContext, event: &SetupTick) -> Outcome<State> {
        let frame = self.observe(event);
        if frame.primary_pressed {
            return match self.main_menu.selected() {
                MainMenuItem::LedTest => {
                    self.led = LedPreview::default();
                    context.emit(self.light_action());
                    self.enter(View::LedTest);
                    Transition(State::led_test())
                }
                MainMenuItem::JoystickTest => self.open_joystick_menu(None),
                MainMenuItem::MotorTest => {
                    self.motor = MotorSession::default();
                    context.emit(SetupAction::EnableMotors(true));
                    self.enter(View::MotorTest);
                    Transition(State::motor_test())
                }
                MainMenuItem::Exit => {
                    info!("setup complete");
                    self.enter(View::Complete);
                    Transition(State::complete())
                }
            };
        }
        if frame.stick.up {
            self.main_menu.up();
        } else if frame.stick.down {
            self.main_menu.down();
        }
        Handled
    }

    #[state]
    fn led_test(&mut self, context: &mut DispatchContext, event: &SetupTick) -> Outcome<State> {
        let frame = self.observe(event);
        if frame.secondary_pressed {
            context.emit(SetupAction::LightOff);
            return self.open_main_menu();
        }

        let before = self.led;
        if frame.stick.left {
            self.led.previous_color();
        } else if frame.stick.right {
            self.led.next_color();
        }
        if frame.stick.up {
            self.led.brighter();
        } else if frame.stick.down {
            self.led.dimmer();
        }
        if self.led != before {
            debug!(
                "led preview {} level {}",
                self.led.color().label(),
                self.led.brightness()
            );
            context.emit(self.light_action());
        }
        Handled
    }

    #[state]
    fn joystick_menu(&mut self, event: &SetupTick) -> Outcome<State> {
        let frame = self.observe(event);
        if frame.secondary_pressed {
            self.joystick_status = None;
            return self.open_main_menu();
        }
        if frame.primary_pressed {
            self.joystick_status = None;
            return match self.joystick_menu.selected() {
                JoystickMenuItem::XyCalibration => {
                    self.start_calibration(CalibrationOrigin::JoystickMenu)
                }
                JoystickMenuItem::AccelCalibration => {
                    self.enter(View::AccelCalibration);
                    Transition(State::accel_calibration())
                }
                JoystickMenuItem::ViewValues => {
                    self.telemetry =
                        TelemetryView::starting_at(self.now_ms, self.config.telemetry_view_ms);
                    self.enter(View::Telemetry);
                    Transition(State::telemetry_view())
                }
                JoystickMenuItem::ClearStorage => {
                    self.clear_prompt = ConfirmPrompt::defaulting_to(false);
                    self.enter(View::ClearConfirm);
                    Transition(State::clear_confirm())
                }
                JoystickMenuItem::Exit => self.open_main_menu(),
            };
        }
        if frame.stick.up {
            self.joystick_menu.up();
        } else if frame.stick.down {
            self.joystick_menu.down();
        }
        Handled
    }

    #[state]
    fn xy_calibration(
        &mut self,
        context: &mut DispatchContext,
        event: &SetupTick,
    ) -> Outcome<State> {
        let frame = self.observe(event);
        if frame.secondary_pressed {
            return match self.calibration_origin {
                CalibrationOrigin::JoystickMenu => {
                    info!("calibration cancelled, stored values kept");
                    self.open_joystick_menu(Some(STATUS_CANCELLED))
                }
                CalibrationOrigin::JoystickCheck => {
                    info!("calibration restarted");
                    self.xy = XyCalibration::new(self.calibration);
                    Handled
                }
            };
        }

        match self.xy.advance(&frame) {
            CalibrationProgress::Waiting => Handled,
            CalibrationProgress::Advanced(stage) => {
                debug!("calibration stage {:?}", stage);
                Handled
            }
            CalibrationProgress::Finished(record) => {
                info!("calibration captured: {:?}", record);
                self.calibration = record;
                self.calibration_loaded = true;
                context.emit(SetupAction::SaveCalibration(record));
                match self.calibration_origin {
                    CalibrationOrigin::JoystickCheck => {
                        self.stick_moved = false;
                        self.move_hint = false;
                        self.enter(View::JoystickCheck);
                        Transition(State::basic_joystick_check())
                    }
                    CalibrationOrigin::JoystickMenu => self.open_joystick_menu(Some(STATUS_SAVED)),
                }
            }
        }
    }

    #[state]
    fn accel_calibration(&mut self, event: &SetupTick) -> Outcome<State> {
        let frame = self.observe(event);
        if frame.secondary_pressed {
            return self.open_joystick_menu(None);
        }
        Handled
    }

    #[state]
    fn telemetry_view(&mut self, event: &SetupTick) -> Outcome<State> {
        let frame = self.observe(event);
        if frame.secondary_pressed || self.telemetry.expired(self.now_ms) {
            return self.open_joystick_menu(None);
        }
        Handled
    }

    #[state]
    fn clear_confirm(&mut self, context: &mut DispatchContext, event: &SetupTick) -> Outcome<State> {
        let frame = self.observe(event);
        if frame.secondary_pressed {
            return self.open_joystick_menu(Some(STATUS_CLEAR_KEPT));
        }
        if frame.primary_pressed {
            if !self.clear_prompt.is_yes() {
                return self.open_joystick_menu(Some(STATUS_CLEAR_KEPT));
            }
            info!("stored calibration cleared");
            context.emit(SetupAction::ClearCalibration);
            self.calibration_loaded = false;
            return self.open_joystick_menu(Some(STATUS_CLEARED));
        }
        self.clear_prompt.steer(&frame.stick);
        Handled
    }

    #[state]
    fn motor_test(&mut self, context: &mut DispatchContext, event: &SetupTick) -> Outcome<State> {
        let frame = self.observe(event);
        if frame.secondary_pressed {
            context.emit(SetupAction::EnableMotors(false));
            return self.open_main_menu();
        }
        if frame.primary_pressed {
            let diagnostic = self.motor.confirm_revolution(&self.config.motor);
            if diagnostic.matches() {
                info!("microstep check ok: {:?}", diagnostic);
            } else {
                warn!("microstep mismatch: {:?}", diagnostic);
            }
            return Handled;
        }

        if frame.stick.left {
            self.motor.select(self.motor.motor.previous());
        } else if frame.stick.right {
            self.motor.select(self.motor.motor.next());
        }
        if frame.stick.up || frame.stick.down {
            let steps = self.config.motor.nudge_steps;
            context.emit(SetupAction::RunSteps {
                motor: self.motor.motor,
                clockwise: frame.stick.up,
                steps,
            });
            self.motor.record_steps(steps);
        }
        Handled
    }

    #[state]
    fn complete(&mut self, event: &SetupTick) -> Outcome<State> {
        self.observe(event);
        Handled
    }
}
