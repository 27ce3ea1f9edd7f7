use esp_hal::{gpio::Output, i2c::master::I2c, Blocking};
use esp_hal_smartled::Ws2812SmartLeds;
use esp_storage::FlashStorage;
use mecanum_setup::{
    drivers::Nunchuk,
    led::SmartLedIndicator,
    motor::StepperBank,
    platform::{BusyDelay, HalI2c},
    runtime::SetupRunner,
};
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

use super::config::LED_BUFFER_LEN;

pub(crate) type OledPanel = Ssd1306<
    I2CInterface<I2c<'static, Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;
pub(crate) type Controller = Nunchuk<HalI2c<'static>, BusyDelay>;
pub(crate) type Light = SmartLedIndicator<Ws2812SmartLeds<'static, LED_BUFFER_LEN, Blocking>>;
pub(crate) type Motors = StepperBank<Output<'static>>;

pub(crate) type FirmwareRunner =
    SetupRunner<Controller, FlashStorage<'static>, OledPanel, Light, Motors, BusyDelay>;

pub(crate) fn oled_panel(bus: I2c<'static, Blocking>) -> OledPanel {
    Ssd1306::new(
        I2CDisplayInterface::new(bus),
        DisplaySize128x64,
        DisplayRotation::Rotate0,
    )
    .into_buffered_graphics_mode()
}
