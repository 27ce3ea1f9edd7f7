use smart_leds::{brightness, SmartLedsWrite, RGB8};

use crate::config::{LED_BRIGHTNESS_LEVELS, LED_DEFAULT_BRIGHTNESS_LEVEL};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LedColor {
    #[default]
    Off,
    Red,
    Green,
    Blue,
}

impl LedColor {
    pub const CYCLE: [Self; 3] = [Self::Red, Self::Green, Self::Blue];

    pub const fn rgb(self) -> RGB8 {
        match self {
            Self::Off => RGB8 { r: 0, g: 0, b: 0 },
            Self::Red => RGB8 { r: 255, g: 0, b: 0 },
            Self::Green => RGB8 { r: 0, g: 255, b: 0 },
            Self::Blue => RGB8 { r: 0, g: 0, b: 255 },
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }
}

pub trait IndicatorLight {
    type Error: core::fmt::Debug;

    fn set_color(&mut self, color: LedColor);
    fn set_brightness(&mut self, level: u8);
    fn commit(&mut self) -> Result<(), Self::Error>;
}

/// Single WS2812-style pixel behind any `SmartLedsWrite` driver.
pub struct SmartLedIndicator<W> {
    writer: W,
    color: LedColor,
    level: u8,
}

impl<W> SmartLedIndicator<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            color: LedColor::Off,
            level: 0,
        }
    }
}

impl<W> IndicatorLight for SmartLedIndicator<W>
where
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: core::fmt::Debug,
{
    type Error = W::Error;

    fn set_color(&mut self, color: LedColor) {
        self.color = color;
    }

    fn set_brightness(&mut self, level: u8) {
        self.level = level;
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.writer
            .write(brightness(core::iter::once(self.color.rgb()), self.level))
    }
}

/// LED test selection: one of three hues at one of five brightness levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LedPreview {
    color_index: usize,
    level_index: usize,
}

impl Default for LedPreview {
    fn default() -> Self {
        Self {
            color_index: 0,
            level_index: LED_DEFAULT_BRIGHTNESS_LEVEL,
        }
    }
}

impl LedPreview {
    pub fn color(&self) -> LedColor {
        LedColor::CYCLE[self.color_index]
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn brightness(&self) -> u8 {
        LED_BRIGHTNESS_LEVELS[self.level_index]
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % LedColor::CYCLE.len();
    }

    pub fn previous_color(&mut self) {
        self.color_index = (self.color_index + LedColor::CYCLE.len() - 1) % LedColor::CYCLE.len();
    }

    pub fn brighter(&mut self) {
        self.level_index = (self.level_index + 1).min(LED_BRIGHTNESS_LEVELS.len() - 1);
    }

    pub fn dimmer(&mut self) {
        self.level_index = self.level_index.saturating_sub(1);
    }
}
