mod calibration_store;

pub use calibration_store::{CalibrationRecord, CalibrationStore};
