//! OLED screens for the setup wizard.

mod widgets;

use core::fmt::Write;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use heapless::String;

use crate::{
    config::{BODY_FIRST_Y, BODY_LINE_STEP, LED_BRIGHTNESS_LEVELS},
    input::ControllerSample,
    motor::MotorSession,
    setup::{CalibrationStage, Screen},
    storage::CalibrationRecord,
};

use widgets::{draw_choice, draw_footer, draw_level_bar, draw_menu, draw_text, draw_title};

const MENU_FOOTER: &str = "C:Select Z:Back";
const LINE_CAPACITY: usize = 32;

type TextLine = String<LINE_CAPACITY>;

/// Monochrome framebuffer that can push its contents to the panel.
pub trait SetupDisplay: DrawTarget<Color = BinaryColor> {
    fn flush(&mut self) -> Result<(), Self::Error>;
}

#[cfg(feature = "esp-hal-runtime")]
impl<DI, SIZE> SetupDisplay
    for ssd1306::Ssd1306<DI, SIZE, ssd1306::mode::BufferedGraphicsMode<SIZE>>
where
    DI: ssd1306::prelude::WriteOnlyDataCommand,
    SIZE: ssd1306::size::DisplaySize,
{
    fn flush(&mut self) -> Result<(), Self::Error> {
        ssd1306::Ssd1306::flush(self)
    }
}

const fn body_y(row: i32) -> i32 {
    BODY_FIRST_Y + row * BODY_LINE_STEP
}

/// Clears the framebuffer and draws `screen`. Does not flush.
pub fn render_screen<D>(display: &mut D, screen: &Screen)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let _ = display.clear(BinaryColor::Off);
    match *screen {
        Screen::DisplayCheck { yes, failed } => {
            draw_text(display, "Is display visible?", 0, 12);
            if failed {
                draw_text(display, "Check OLED wiring", 0, 30);
            }
            draw_choice(display, yes);
        }
        Screen::JoystickCheck {
            sample,
            stick_moved,
            move_hint,
        } => render_joystick_check(display, &sample, stick_moved, move_hint),
        Screen::MainMenu { menu } => {
            draw_text(display, "=== Setup Menu ===", 0, 10);
            draw_menu(display, &menu);
            draw_footer(display, MENU_FOOTER);
        }
        Screen::LedTest {
            color,
            level_index,
            brightness,
        } => {
            draw_title(display, "LED Test");
            draw_text(display, "Color:", 0, body_y(0));
            draw_text(display, color.label(), 45, body_y(0));
            let mut line = TextLine::new();
            let _ = write!(
                line,
                "Level {}/{} ({})",
                level_index + 1,
                LED_BRIGHTNESS_LEVELS.len(),
                brightness
            );
            draw_text(display, &line, 0, body_y(1));
            draw_level_bar(
                display,
                Point::new(0, body_y(1) + 3),
                Size::new(128, 8),
                level_index as u32 + 1,
                LED_BRIGHTNESS_LEVELS.len() as u32,
            );
            draw_footer(display, "Z:Back");
        }
        Screen::JoystickMenu { menu, status } => {
            draw_text(display, "=== Joystick ===", 0, 10);
            draw_menu(display, &menu);
            draw_footer(display, status.unwrap_or(MENU_FOOTER));
        }
        Screen::Calibration { stage, sample } => render_calibration(display, stage, &sample),
        Screen::AccelCalibration => {
            draw_title(display, "Accel Calibration");
            draw_text(display, "Not implemented", 0, body_y(0));
            draw_footer(display, "Z:Back");
        }
        Screen::Telemetry {
            sample,
            calibration,
            seconds_left,
        } => render_telemetry(display, &sample, &calibration, seconds_left),
        Screen::ClearConfirm { yes } => {
            draw_text(display, "Clear calibration?", 0, 12);
            draw_text(display, "Stored values lost", 0, 30);
            draw_choice(display, yes);
        }
        Screen::MotorTest { session } => render_motor_test(display, &session),
        Screen::Complete => {
            draw_title(display, "Setup Complete");
            draw_text(display, "Restart to drive", 0, body_y(0));
        }
    }
}

fn render_joystick_check<D>(
    display: &mut D,
    sample: &ControllerSample,
    stick_moved: bool,
    move_hint: bool,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_title(display, "Joystick Check");
    let mut line = TextLine::new();
    let _ = write!(line, "X:{} Y:{}", sample.stick_x, sample.stick_y);
    draw_text(display, &line, 0, body_y(0));
    let status = match (stick_moved, move_hint) {
        (true, _) => "Stick OK",
        (false, true) => "Move the stick first",
        (false, false) => "Move the stick",
    };
    draw_text(display, status, 0, body_y(1));
    draw_footer(display, "C:Continue");
}

fn render_calibration<D>(display: &mut D, stage: CalibrationStage, sample: &ControllerSample)
where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut title = TextLine::new();
    let _ = match stage.step_number() {
        Some(step) => write!(title, "XY Calib {}/5", step),
        None => write!(title, "XY Calibration"),
    };
    draw_title(display, &title);
    draw_text(display, stage.instruction(), 0, body_y(0));
    let mut line = TextLine::new();
    let _ = write!(line, "X:{} Y:{}", sample.stick_x, sample.stick_y);
    draw_text(display, &line, 0, body_y(1));
    draw_footer(display, "C:Next Z:Cancel");
}

fn render_telemetry<D>(
    display: &mut D,
    sample: &ControllerSample,
    calibration: &CalibrationRecord,
    seconds_left: u32,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    let mut title = TextLine::new();
    let _ = write!(title, "Values ({}s)", seconds_left);
    draw_title(display, &title);

    let mut line = TextLine::new();
    let _ = write!(
        line,
        "X:{} ({}%)",
        sample.stick_x,
        calibration.normalized_x(sample.stick_x)
    );
    draw_text(display, &line, 0, body_y(0));

    line.clear();
    let _ = write!(
        line,
        "Y:{} ({}%)",
        sample.stick_y,
        calibration.normalized_y(sample.stick_y)
    );
    draw_text(display, &line, 0, body_y(1));

    line.clear();
    let _ = write!(
        line,
        "C:{} Z:{}",
        sample.button_primary as u8, sample.button_secondary as u8
    );
    draw_text(display, &line, 0, body_y(2));

    // Accelerometer replaces the footer; Z still leaves early.
    line.clear();
    let _ = write!(
        line,
        "A:{} {} {}",
        sample.accel.x, sample.accel.y, sample.accel.z
    );
    draw_footer(display, &line);
}

fn render_motor_test<D>(display: &mut D, session: &MotorSession)
where
    D: DrawTarget<Color = BinaryColor>,
{
    draw_title(display, session.motor.label());

    let mut line = TextLine::new();
    let _ = write!(line, "Steps: {}", session.steps_accumulated);
    draw_text(display, &line, 0, body_y(0));

    line.clear();
    let _ = match session.last_diagnostic {
        Some(diagnostic) => write!(
            line,
            "Micro {}/{} {}",
            diagnostic.inferred_microsteps,
            diagnostic.configured_microsteps,
            if diagnostic.matches() { "OK" } else { "BAD" }
        ),
        None => write!(line, "C: one rev done"),
    };
    draw_text(display, &line, 0, body_y(1));
    draw_footer(display, "U/D:Run L/R:Wheel");
}
