//! Setup wizard state machine.
//!
//! `SetupEngine` owns every piece of wizard state and is advanced once per
//! loop iteration with the latest input frame. Side effects come back as
//! `SetupAction`s for the runner to execute; nothing here touches hardware.

pub mod actions;
pub mod calibration;
mod engine;
pub(crate) mod events;
mod machine;
pub mod menu;
pub mod prompts;
pub mod screen;
pub mod types;

pub use actions::{SetupAction, SetupActions, MAX_TICK_ACTIONS};
pub use calibration::{CalibrationProgress, CalibrationStage, XyCalibration};
pub use engine::{SetupEngine, TickOutcome};
pub use menu::{JoystickMenuItem, MainMenuItem, Menu, MenuItem};
pub use prompts::{ConfirmPrompt, TelemetryView};
pub use screen::Screen;
pub use types::{CalibrationOrigin, SetupMode};
