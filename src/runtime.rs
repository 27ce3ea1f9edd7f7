//! Glue between the setup engine and the hardware seams.

use embedded_storage::{ReadStorage, Storage};
use log::{debug, info, warn};

use crate::{
    config::SetupConfig,
    input::{ControllerInput, ControllerSource},
    led::{IndicatorLight, LedColor},
    motor::{run_steps, MotorDriverIo},
    platform::DelayOps,
    setup::{Screen, SetupAction, SetupEngine, SetupMode, TickOutcome},
    storage::CalibrationStore,
    ui::{render_screen, SetupDisplay},
};

pub struct SetupPeripherals<C, S, D, L, M, Y> {
    pub controller: C,
    pub store: CalibrationStore<S>,
    pub display: D,
    pub light: L,
    pub motors: M,
    pub delay: Y,
}

/// Owns every collaborator. One `tick` per loop iteration: poll the
/// controller, advance the engine, run its actions, redraw on change.
pub struct SetupRunner<C, S, D, L, M, Y> {
    config: SetupConfig,
    input: ControllerInput<C>,
    store: CalibrationStore<S>,
    display: D,
    light: L,
    motors: M,
    delay: Y,
    engine: SetupEngine,
    last_screen: Option<Screen>,
}

impl<C, S, D, L, M, Y> SetupRunner<C, S, D, L, M, Y>
where
    C: ControllerSource,
    S: ReadStorage + Storage,
    <S as ReadStorage>::Error: core::fmt::Debug,
    D: SetupDisplay,
    D::Error: core::fmt::Debug,
    L: IndicatorLight,
    M: MotorDriverIo,
    Y: DelayOps,
{
    /// Loads the stored calibration and puts the outputs in a known state.
    pub fn new(config: SetupConfig, peripherals: SetupPeripherals<C, S, D, L, M, Y>) -> Self {
        let SetupPeripherals {
            controller,
            mut store,
            display,
            light,
            motors,
            delay,
        } = peripherals;
        let stored = store.load();
        match stored {
            Some(record) => info!("calibration loaded: {:?}", record),
            None => info!("calibration missing, defaults in use"),
        }

        let mut runner = Self {
            config,
            input: ControllerInput::new(controller, config.stick),
            store,
            display,
            light,
            motors,
            delay,
            engine: SetupEngine::new(config, stored),
            last_screen: None,
        };
        runner.apply(SetupAction::LightOff);
        runner.apply(SetupAction::EnableMotors(false));
        runner
    }

    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        let frame = self.input.poll();
        let outcome = self.engine.tick(now_ms, frame);
        for action in outcome.actions.iter().copied() {
            self.apply(action);
        }
        self.redraw_if_changed();
        outcome
    }

    pub fn mode(&self) -> SetupMode {
        self.engine.mode()
    }

    pub fn engine(&self) -> &SetupEngine {
        &self.engine
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn light(&self) -> &L {
        &self.light
    }

    pub fn motors(&self) -> &M {
        &self.motors
    }

    pub fn delay(&self) -> &Y {
        &self.delay
    }

    pub fn store_mut(&mut self) -> &mut CalibrationStore<S> {
        &mut self.store
    }

    fn redraw_if_changed(&mut self) {
        let screen = self.engine.screen();
        if self.last_screen == Some(screen) {
            return;
        }
        render_screen(&mut self.display, &screen);
        if let Err(err) = self.display.flush() {
            warn!("display flush failed: {:?}", err);
        }
        self.last_screen = Some(screen);
    }

    fn apply(&mut self, action: SetupAction) {
        debug!("setup action {:?}", action);
        match action {
            SetupAction::SaveCalibration(record) => {
                if let Err(err) = self.store.save(&record) {
                    warn!("calibration save failed: {:?}", err);
                }
            }
            SetupAction::ClearCalibration => {
                if let Err(err) = self.store.clear() {
                    warn!("calibration clear failed: {:?}", err);
                }
            }
            SetupAction::ShowLight { color, brightness } => self.show_light(color, brightness),
            SetupAction::LightOff => self.show_light(LedColor::Off, 0),
            SetupAction::EnableMotors(enabled) => {
                if let Err(err) = self.motors.set_enabled(enabled) {
                    warn!("motor enable failed: {:?}", err);
                }
            }
            SetupAction::RunSteps {
                motor,
                clockwise,
                steps,
            } => {
                info!(
                    "{} {} steps {}",
                    motor.label(),
                    steps,
                    if clockwise { "cw" } else { "ccw" }
                );
                if let Err(err) = run_steps(
                    &mut self.motors,
                    &self.delay,
                    &self.config.motor.pulse,
                    motor,
                    clockwise,
                    steps,
                ) {
                    warn!("step train aborted: {:?}", err);
                }
            }
        }
    }

    fn show_light(&mut self, color: LedColor, brightness: u8) {
        self.light.set_color(color);
        self.light.set_brightness(brightness);
        if let Err(err) = self.light.commit() {
            warn!("indicator update failed: {:?}", err);
        }
    }
}
