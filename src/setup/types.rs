#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetupMode {
    DisplayCheck,
    BasicJoystickCheck,
    MainMenu,
    LedTest,
    JoystickSubmenu,
    MotorTest,
    Complete,
}

impl SetupMode {
    pub const fn label(self) -> &'static str {
        match self {
            Self::DisplayCheck => "display-check",
            Self::BasicJoystickCheck => "joystick-check",
            Self::MainMenu => "main-menu",
            Self::LedTest => "led-test",
            Self::JoystickSubmenu => "joystick-menu",
            Self::MotorTest => "motor-test",
            Self::Complete => "complete",
        }
    }
}

/// Where an XY calibration run returns to when it finishes or is aborted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationOrigin {
    /// Forced by the basic joystick check because nothing valid was stored.
    JoystickCheck,
    JoystickMenu,
}
