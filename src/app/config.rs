/// WS2812 RMT buffer: 24 pulses per LED plus the end marker.
pub(crate) const LED_COUNT: usize = 1;
pub(crate) const LED_BUFFER_LEN: usize = LED_COUNT * 24 + 1;

pub(crate) const OLED_I2C_KHZ: u32 = 400;
// Nunchuk clones stop answering above standard mode.
pub(crate) const NUNCHUK_I2C_KHZ: u32 = 100;
pub(crate) const I2C_TRANSACTION_TIMEOUT_MS: u64 = 40;

/// A4988/DRV8825 style drivers: enable is low-active.
pub(crate) const STEPPER_ENABLE_ACTIVE_LOW: bool = true;
