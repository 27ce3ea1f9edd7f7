use embedded_hal::digital::{OutputPin, PinState};

use super::{MotorDriverIo, MotorUnderTest};

pub struct WheelPins<P> {
    pub direction: P,
    pub step: P,
}

/// Four step/dir drivers sharing one enable line. Wheels are indexed by
/// `MotorUnderTest::index`.
pub struct StepperBank<P> {
    wheels: [WheelPins<P>; 4],
    enable: P,
    enable_active_low: bool,
}

impl<P: OutputPin> StepperBank<P> {
    /// Leaves the drivers disabled.
    pub fn new(
        wheels: [WheelPins<P>; 4],
        enable: P,
        enable_active_low: bool,
    ) -> Result<Self, P::Error> {
        let mut bank = Self {
            wheels,
            enable,
            enable_active_low,
        };
        bank.set_enabled(false)?;
        Ok(bank)
    }

    fn wheel(&mut self, motor: MotorUnderTest) -> &mut WheelPins<P> {
        &mut self.wheels[motor.index()]
    }
}

impl<P: OutputPin> MotorDriverIo for StepperBank<P> {
    type Error = P::Error;

    fn set_direction(&mut self, motor: MotorUnderTest, high: bool) -> Result<(), Self::Error> {
        self.wheel(motor).direction.set_state(PinState::from(high))
    }

    fn set_step(&mut self, motor: MotorUnderTest, high: bool) -> Result<(), Self::Error> {
        self.wheel(motor).step.set_state(PinState::from(high))
    }

    fn set_enabled(&mut self, enabled: bool) -> Result<(), Self::Error> {
        let level = enabled != self.enable_active_low;
        self.enable.set_state(PinState::from(level))
    }
}
