use u8g2_fonts::{fonts, FontRenderer};

pub const SCREEN_WIDTH: i32 = 128;
pub const SCREEN_HEIGHT: i32 = 64;
pub(crate) const TEXT_FONT: FontRenderer = FontRenderer::new::<fonts::u8g2_font_ncenB08_tr>();
pub(crate) const TITLE_Y: i32 = 10;
pub(crate) const TITLE_RULE_Y: i32 = 12;
pub(crate) const BODY_FIRST_Y: i32 = 25;
pub(crate) const BODY_LINE_STEP: i32 = 13;
pub(crate) const MENU_FIRST_Y: i32 = 25;
pub(crate) const MENU_LINE_STEP: i32 = 12;
pub(crate) const MENU_VISIBLE_ROWS: usize = 3;
pub(crate) const FOOTER_Y: i32 = 63;

pub const UI_TICK_MS: u64 = 20;

pub const STICK_MIN: i32 = 0;
pub const STICK_MAX: i32 = 255;
pub const STICK_CENTER: u8 = 128;
pub const STICK_DEAD_ZONE: u8 = 50;

pub const CALIBRATION_STORE_MAGIC: u16 = 0xCAFE;
pub const CALIBRATION_STORE_REGION_LEN: usize = 64;
pub const CALIBRATION_RECORD_LEN: usize = 2 + 6 * 4 + 2;

pub const LED_BRIGHTNESS_LEVELS: [u8; 5] = [25, 50, 100, 180, 255];
pub const LED_DEFAULT_BRIGHTNESS_LEVEL: usize = 2;

pub const STEP_PULSE_HIGH_US: u32 = 500;
pub const STEP_PULSE_LOW_US: u32 = 500;
pub const STEP_DIRECTION_SETTLE_US: u32 = 10;
pub const STEPS_PER_MECHANICAL_REV: u32 = 200;
pub const DRIVER_MICROSTEPS: u32 = 8;
pub const MOTOR_NUDGE_STEPS: u32 = STEPS_PER_MECHANICAL_REV * DRIVER_MICROSTEPS;

pub const TELEMETRY_VIEW_MS: u64 = 10_000;

/// Dead-zone band around the nominal stick center used for direction edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StickConfig {
    pub center: u8,
    pub dead_zone: u8,
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            center: STICK_CENTER,
            dead_zone: STICK_DEAD_ZONE,
        }
    }
}

/// Step pulse shape. Each step is `high_us` high followed by `low_us` low;
/// `settle_us` is waited after every direction change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseTiming {
    pub high_us: u32,
    pub low_us: u32,
    pub settle_us: u32,
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self {
            high_us: STEP_PULSE_HIGH_US,
            low_us: STEP_PULSE_LOW_US,
            settle_us: STEP_DIRECTION_SETTLE_US,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotorConfig {
    pub nudge_steps: u32,
    pub steps_per_rev: u32,
    pub microsteps: u32,
    pub pulse: PulseTiming,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            nudge_steps: MOTOR_NUDGE_STEPS,
            steps_per_rev: STEPS_PER_MECHANICAL_REV,
            microsteps: DRIVER_MICROSTEPS,
            pulse: PulseTiming::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetupConfig {
    pub stick: StickConfig,
    pub motor: MotorConfig,
    pub telemetry_view_ms: u64,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            stick: StickConfig::default(),
            motor: MotorConfig::default(),
            telemetry_view_ms: TELEMETRY_VIEW_MS,
        }
    }
}
