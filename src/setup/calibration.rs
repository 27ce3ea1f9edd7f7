use crate::{input::InputFrame, storage::CalibrationRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationStage {
    Init,
    Left,
    Right,
    Up,
    Down,
    Center,
    Done,
}

impl CalibrationStage {
    const fn next(self) -> Self {
        match self {
            Self::Init => Self::Left,
            Self::Left => Self::Right,
            Self::Right => Self::Up,
            Self::Up => Self::Down,
            Self::Down => Self::Center,
            Self::Center | Self::Done => Self::Done,
        }
    }

    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Init => "Release stick",
            Self::Left => "Push stick LEFT",
            Self::Right => "Push stick RIGHT",
            Self::Up => "Push stick UP",
            Self::Down => "Push stick DOWN",
            Self::Center => "Release to center",
            Self::Done => "Calibration done",
        }
    }

    /// 1-based position among the capture stages, `None` outside them.
    pub const fn step_number(self) -> Option<u8> {
        match self {
            Self::Left => Some(1),
            Self::Right => Some(2),
            Self::Up => Some(3),
            Self::Down => Some(4),
            Self::Center => Some(5),
            Self::Init | Self::Done => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationProgress {
    Waiting,
    Advanced(CalibrationStage),
    Finished(CalibrationRecord),
}

/// Five-stage stick capture. Each stage tracks its extremum on every fresh
/// sample and advances on a primary-button edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XyCalibration {
    stage: CalibrationStage,
    working: CalibrationRecord,
}

impl XyCalibration {
    pub fn new(start: CalibrationRecord) -> Self {
        Self {
            stage: CalibrationStage::Init,
            working: start.capture_seed(),
        }
    }

    pub fn stage(&self) -> CalibrationStage {
        self.stage
    }

    pub fn working(&self) -> &CalibrationRecord {
        &self.working
    }

    pub fn advance(&mut self, frame: &InputFrame) -> CalibrationProgress {
        if self.stage == CalibrationStage::Done {
            return CalibrationProgress::Finished(self.working);
        }
        if frame.fresh {
            self.track(frame);
        }
        if !frame.primary_pressed {
            return CalibrationProgress::Waiting;
        }

        if self.stage == CalibrationStage::Center {
            self.working.center_x = frame.sample.stick_x as i32;
            self.working.center_y = frame.sample.stick_y as i32;
        }
        self.stage = self.stage.next();
        if self.stage == CalibrationStage::Done {
            self.working = self.working.enclose_center();
            CalibrationProgress::Finished(self.working)
        } else {
            CalibrationProgress::Advanced(self.stage)
        }
    }

    fn track(&mut self, frame: &InputFrame) {
        let x = frame.sample.stick_x as i32;
        let y = frame.sample.stick_y as i32;
        let record = &mut self.working;
        match self.stage {
            CalibrationStage::Left => record.min_x = record.min_x.min(x),
            CalibrationStage::Right => record.max_x = record.max_x.max(x),
            CalibrationStage::Up => record.max_y = record.max_y.max(y),
            CalibrationStage::Down => record.min_y = record.min_y.min(y),
            CalibrationStage::Init | CalibrationStage::Center | CalibrationStage::Done => {}
        }
    }
}
