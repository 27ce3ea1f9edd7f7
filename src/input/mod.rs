//! Hand-controller polling and edge detection.
//!
//! Every successful poll is compared against the sample of the previous
//! successful poll; a failed poll produces no frame and leaves the history
//! untouched, so a press is never reported twice.

use log::debug;

use crate::config::StickConfig;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccelSample {
    pub x: u16,
    pub y: u16,
    pub z: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerSample {
    pub stick_x: u8,
    pub stick_y: u8,
    pub accel: AccelSample,
    /// C button on a Nunchuk.
    pub button_primary: bool,
    /// Z button on a Nunchuk.
    pub button_secondary: bool,
}

impl ControllerSample {
    pub const fn centered() -> Self {
        Self {
            stick_x: crate::config::STICK_CENTER,
            stick_y: crate::config::STICK_CENTER,
            accel: AccelSample { x: 0, y: 0, z: 0 },
            button_primary: false,
            button_secondary: false,
        }
    }

    pub const fn with_stick(mut self, x: u8, y: u8) -> Self {
        self.stick_x = x;
        self.stick_y = y;
        self
    }

    pub const fn with_buttons(mut self, primary: bool, secondary: bool) -> Self {
        self.button_primary = primary;
        self.button_secondary = secondary;
        self
    }
}

impl Default for ControllerSample {
    fn default() -> Self {
        Self::centered()
    }
}

pub trait ControllerSource {
    type Error: core::fmt::Debug;

    /// Non-blocking attempt; an error means "no new data this tick".
    fn read_sample(&mut self) -> Result<ControllerSample, Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisZone {
    Low,
    Center,
    High,
}

impl StickConfig {
    pub fn zone(&self, value: u8) -> AxisZone {
        let value = value as i32;
        let center = self.center as i32;
        let dead_zone = self.dead_zone as i32;
        if value < center - dead_zone {
            AxisZone::Low
        } else if value > center + dead_zone {
            AxisZone::High
        } else {
            AxisZone::Center
        }
    }

    pub fn deflected(&self, sample: &ControllerSample) -> bool {
        self.zone(sample.stick_x) != AxisZone::Center
            || self.zone(sample.stick_y) != AxisZone::Center
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StickEdges {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl StickEdges {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    fn between(
        previous: &ControllerSample,
        current: &ControllerSample,
        config: &StickConfig,
    ) -> Self {
        let entered = |prev: u8, cur: u8, zone: AxisZone| {
            config.zone(cur) == zone && config.zone(prev) != zone
        };
        Self {
            left: entered(previous.stick_x, current.stick_x, AxisZone::Low),
            right: entered(previous.stick_x, current.stick_x, AxisZone::High),
            up: entered(previous.stick_y, current.stick_y, AxisZone::High),
            down: entered(previous.stick_y, current.stick_y, AxisZone::Low),
        }
    }
}

/// One tick worth of input: the latest sample plus the edges it produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputFrame {
    pub sample: ControllerSample,
    /// False when the poll failed and `sample` is the last known one.
    pub fresh: bool,
    pub primary_pressed: bool,
    pub secondary_pressed: bool,
    pub stick: StickEdges,
    pub deflected: bool,
}

impl InputFrame {
    pub fn between(
        previous: &ControllerSample,
        current: &ControllerSample,
        config: &StickConfig,
    ) -> Self {
        Self {
            sample: *current,
            fresh: true,
            primary_pressed: current.button_primary && !previous.button_primary,
            secondary_pressed: current.button_secondary && !previous.button_secondary,
            stick: StickEdges::between(previous, current, config),
            deflected: config.deflected(current),
        }
    }

    pub fn quiet(sample: ControllerSample) -> Self {
        Self {
            sample,
            fresh: false,
            primary_pressed: false,
            secondary_pressed: false,
            stick: StickEdges::default(),
            deflected: false,
        }
    }
}

pub struct ControllerInput<S> {
    source: S,
    config: StickConfig,
    previous: ControllerSample,
    current: ControllerSample,
    last_frame: Option<InputFrame>,
}

impl<S: ControllerSource> ControllerInput<S> {
    pub fn new(source: S, config: StickConfig) -> Self {
        Self {
            source,
            config,
            previous: ControllerSample::centered(),
            current: ControllerSample::centered(),
            last_frame: None,
        }
    }

    pub fn poll(&mut self) -> Option<InputFrame> {
        match self.source.read_sample() {
            Ok(sample) => {
                let frame = InputFrame::between(&self.current, &sample, &self.config);
                self.previous = self.current;
                self.current = sample;
                self.last_frame = Some(frame);
                Some(frame)
            }
            Err(err) => {
                debug!("controller poll skipped: {:?}", err);
                self.last_frame = None;
                None
            }
        }
    }

    pub fn current(&self) -> ControllerSample {
        self.current
    }

    pub fn previous(&self) -> ControllerSample {
        self.previous
    }

    pub fn primary_edge(&self) -> bool {
        self.last_frame.is_some_and(|frame| frame.primary_pressed)
    }

    pub fn secondary_edge(&self) -> bool {
        self.last_frame.is_some_and(|frame| frame.secondary_pressed)
    }

    pub fn stick_deflected(&self) -> bool {
        self.config.deflected(&self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedController;

    fn input(script: ScriptedController) -> ControllerInput<ScriptedController> {
        ControllerInput::new(script, StickConfig::default())
    }

    #[test]
    fn held_button_reports_a_single_edge() {
        let pressed = ControllerSample::centered().with_buttons(true, false);
        let mut input = input(ScriptedController::from_samples(&[pressed, pressed, pressed]));

        assert!(input.poll().expect("first").primary_pressed);
        assert!(input.primary_edge());
        assert!(!input.poll().expect("second").primary_pressed);
        assert!(!input.poll().expect("third").primary_pressed);
        assert!(!input.primary_edge());
    }

    #[test]
    fn failed_poll_keeps_history_and_clears_edges() {
        let idle = ControllerSample::centered();
        let pressed = idle.with_buttons(false, true);
        let mut script = ScriptedController::default();
        script.push(idle);
        script.push_failure();
        script.push(pressed);
        script.push_failure();
        script.push(pressed);
        let mut input = input(script);

        assert!(input.poll().is_some());
        assert!(input.poll().is_none());
        assert_eq!(input.current(), idle);

        let frame = input.poll().expect("pressed");
        assert!(frame.secondary_pressed);
        assert_eq!(input.previous(), idle);

        assert!(input.poll().is_none());
        assert!(!input.secondary_edge());
        assert!(!input.poll().expect("held").secondary_pressed);
    }

    #[test]
    fn stick_edges_fire_on_entering_a_zone() {
        let c = ControllerSample::centered();
        let mut input = input(ScriptedController::from_samples(&[
            c.with_stick(20, 128),
            c.with_stick(10, 128),
            c.with_stick(128, 128),
            c.with_stick(240, 128),
            c.with_stick(128, 250),
            c.with_stick(128, 5),
        ]));

        let left = input.poll().expect("left");
        assert!(left.stick.left && !left.stick.right);
        assert!(left.deflected);
        assert!(!input.poll().expect("held left").stick.any());
        assert!(input.stick_deflected());
        let centered = input.poll().expect("center");
        assert!(!centered.stick.any());
        assert!(!centered.deflected);
        assert!(!input.stick_deflected());
        assert!(input.poll().expect("right").stick.right);
        let up = input.poll().expect("up");
        assert!(up.stick.up && !up.stick.right);
        assert!(input.poll().expect("down").stick.down);
    }

    #[test]
    fn dead_zone_boundary_is_not_deflection() {
        let config = StickConfig::default();
        let edge = config.center + config.dead_zone;
        assert_eq!(config.zone(edge), AxisZone::Center);
        assert_eq!(config.zone(edge + 1), AxisZone::High);
        assert_eq!(config.zone(config.center - config.dead_zone), AxisZone::Center);
        assert_eq!(config.zone(config.center - config.dead_zone - 1), AxisZone::Low);
    }
}
