use embedded_storage::{ReadStorage, Storage};
use log::{info, warn};

use crate::config::{
    CALIBRATION_RECORD_LEN, CALIBRATION_STORE_MAGIC, CALIBRATION_STORE_REGION_LEN, STICK_CENTER,
    STICK_MAX, STICK_MIN,
};

const MAGIC_LEN: usize = 2;
const FIELD_LEN: usize = 4;
const CHECKSUM_OFFSET: usize = CALIBRATION_RECORD_LEN - 2;

const _: () = assert!(CALIBRATION_RECORD_LEN <= CALIBRATION_STORE_REGION_LEN);

/// Joystick extents and rest position in raw stick units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalibrationRecord {
    pub center_x: i32,
    pub center_y: i32,
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Default for CalibrationRecord {
    fn default() -> Self {
        Self {
            center_x: STICK_CENTER as i32,
            center_y: STICK_CENTER as i32,
            min_x: STICK_MIN,
            max_x: STICK_MAX,
            min_y: STICK_MIN,
            max_y: STICK_MAX,
        }
    }
}

impl CalibrationRecord {
    /// Extrema seeded at the opposite end of the range so the first sample
    /// of each capture stage always replaces them.
    pub fn capture_seed(self) -> Self {
        Self {
            min_x: STICK_MAX,
            max_x: STICK_MIN,
            min_y: STICK_MAX,
            max_y: STICK_MIN,
            ..self
        }
    }

    /// Every field inside the stick range and each center between its extents.
    pub fn is_consistent(&self) -> bool {
        let in_range = |value: &i32| (STICK_MIN..=STICK_MAX).contains(value);
        self.fields().iter().all(in_range)
            && self.min_x <= self.center_x
            && self.center_x <= self.max_x
            && self.min_y <= self.center_y
            && self.center_y <= self.max_y
    }

    /// Widens the extents so that the captured center lies inside them.
    pub fn enclose_center(self) -> Self {
        Self {
            min_x: self.min_x.min(self.center_x),
            max_x: self.max_x.max(self.center_x),
            min_y: self.min_y.min(self.center_y),
            max_y: self.max_y.max(self.center_y),
            ..self
        }
    }

    pub fn normalized_x(&self, raw: u8) -> i32 {
        normalize_axis(raw as i32, self.min_x, self.center_x, self.max_x)
    }

    pub fn normalized_y(&self, raw: u8) -> i32 {
        normalize_axis(raw as i32, self.min_y, self.center_y, self.max_y)
    }

    pub fn checksum(&self) -> u16 {
        self.fields()
            .iter()
            .fold(0u16, |acc, &value| acc.wrapping_add(value as u16))
    }

    fn fields(&self) -> [i32; 6] {
        [
            self.center_x,
            self.center_y,
            self.min_x,
            self.max_x,
            self.min_y,
            self.max_y,
        ]
    }

    pub fn record_bytes(&self) -> [u8; CALIBRATION_RECORD_LEN] {
        let mut record = [0u8; CALIBRATION_RECORD_LEN];
        record[..MAGIC_LEN].copy_from_slice(&CALIBRATION_STORE_MAGIC.to_be_bytes());
        for (index, value) in self.fields().iter().enumerate() {
            let start = MAGIC_LEN + index * FIELD_LEN;
            record[start..start + FIELD_LEN].copy_from_slice(&value.to_le_bytes());
        }
        record[CHECKSUM_OFFSET..].copy_from_slice(&self.checksum().to_le_bytes());
        record
    }

    pub fn from_record(record: &[u8; CALIBRATION_RECORD_LEN]) -> Option<Self> {
        if u16::from_be_bytes([record[0], record[1]]) != CALIBRATION_STORE_MAGIC {
            return None;
        }
        let field = |index: usize| {
            let start = MAGIC_LEN + index * FIELD_LEN;
            i32::from_le_bytes([
                record[start],
                record[start + 1],
                record[start + 2],
                record[start + 3],
            ])
        };
        let decoded = Self {
            center_x: field(0),
            center_y: field(1),
            min_x: field(2),
            max_x: field(3),
            min_y: field(4),
            max_y: field(5),
        };
        let stored = u16::from_le_bytes([record[CHECKSUM_OFFSET], record[CHECKSUM_OFFSET + 1]]);
        if stored != decoded.checksum() {
            return None;
        }
        Some(decoded)
    }
}

/// Maps a raw reading onto -100..=100 with the center at 0, each half scaled
/// against its own extent.
fn normalize_axis(raw: i32, min: i32, center: i32, max: i32) -> i32 {
    let value = if raw >= center {
        let span = (max - center).max(1);
        (raw - center) * 100 / span
    } else {
        let span = (center - min).max(1);
        (raw - center) * 100 / span
    };
    value.clamp(-100, 100)
}

pub struct CalibrationStore<S> {
    storage: S,
    offset: u32,
}

impl<S> CalibrationStore<S>
where
    S: ReadStorage + Storage,
    <S as ReadStorage>::Error: core::fmt::Debug,
{
    pub fn new(storage: S, offset: u32) -> Self {
        Self { storage, offset }
    }

    pub fn load(&mut self) -> Option<CalibrationRecord> {
        let mut marker = [0u8; MAGIC_LEN];
        if let Err(err) = self.storage.read(self.offset, &mut marker) {
            warn!("calibration read failed: {:?}", err);
            return None;
        }
        if u16::from_be_bytes(marker) != CALIBRATION_STORE_MAGIC {
            info!("no stored calibration");
            return None;
        }

        let mut record = [0u8; CALIBRATION_RECORD_LEN];
        if let Err(err) = self.storage.read(self.offset, &mut record) {
            warn!("calibration read failed: {:?}", err);
            return None;
        }
        let decoded = CalibrationRecord::from_record(&record);
        if decoded.is_none() {
            warn!("stored calibration failed checksum");
        }
        decoded
    }

    pub fn save(&mut self, record: &CalibrationRecord) -> Result<(), <S as ReadStorage>::Error> {
        self.storage.write(self.offset, &record.record_bytes())?;
        info!("calibration saved: {:?}", record);
        Ok(())
    }

    /// Invalidates the stored record by zeroing the marker. Field bytes stay
    /// on the medium.
    pub fn clear(&mut self) -> Result<(), <S as ReadStorage>::Error> {
        self.storage.write(self.offset, &[0u8; MAGIC_LEN])?;
        info!("calibration marker cleared");
        Ok(())
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
