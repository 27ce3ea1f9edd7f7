use core::marker::PhantomData;

pub trait MenuItem: Copy + PartialEq + 'static {
    const ITEMS: &'static [Self];

    fn label(self) -> &'static str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MainMenuItem {
    LedTest,
    JoystickTest,
    MotorTest,
    Exit,
}

impl MenuItem for MainMenuItem {
    const ITEMS: &'static [Self] = &[Self::LedTest, Self::JoystickTest, Self::MotorTest, Self::Exit];

    fn label(self) -> &'static str {
        match self {
            Self::LedTest => "LED Setup",
            Self::JoystickTest => "Joystick Setup",
            Self::MotorTest => "Motor Setup",
            Self::Exit => "Exit",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoystickMenuItem {
    XyCalibration,
    AccelCalibration,
    ViewValues,
    ClearStorage,
    Exit,
}

impl MenuItem for JoystickMenuItem {
    const ITEMS: &'static [Self] = &[
        Self::XyCalibration,
        Self::AccelCalibration,
        Self::ViewValues,
        Self::ClearStorage,
        Self::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::XyCalibration => "XY Calibration",
            Self::AccelCalibration => "Accel Calibration",
            Self::ViewValues => "View Values",
            Self::ClearStorage => "Clear Storage",
            Self::Exit => "Back",
        }
    }
}

/// Cursor over a fixed item list. Moves clamp at both ends, never wrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Menu<T> {
    index: usize,
    items: PhantomData<T>,
}

impl<T: MenuItem> Default for Menu<T> {
    fn default() -> Self {
        Self {
            index: 0,
            items: PhantomData,
        }
    }
}

impl<T: MenuItem> Menu<T> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> T {
        T::ITEMS[self.index]
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn down(&mut self) {
        self.index = (self.index + 1).min(T::ITEMS.len() - 1);
    }

    /// First row to draw so the selection stays inside `visible` rows.
    pub fn scroll_offset(&self, visible: usize) -> usize {
        if visible == 0 || self.index < visible {
            0
        } else {
            self.index + 1 - visible
        }
    }
}
