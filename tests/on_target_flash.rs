//! On-target check of the calibration record against the real flash sector.
//! Runs under embedded-test on xtensa/ESP32; the host suite never builds it.

#![no_std]
#![no_main]

#[cfg(test)]
#[embedded_test::tests(executor = esp_rtos::embassy::Executor::new())]
mod tests {
    use embedded_storage::ReadStorage;
    use esp_storage::FlashStorage;
    use mecanum_setup::storage::{CalibrationRecord, CalibrationStore};

    #[init]
    fn init() -> FlashStorage<'static> {
        let peripherals = esp_hal::init(esp_hal::Config::default());
        let timg0 = esp_hal::timer::timg::TimerGroup::new(peripherals.TIMG0);
        esp_rtos::start(timg0.timer0);
        FlashStorage::new(peripherals.FLASH).multicore_auto_park()
    }

    #[test]
    async fn calibration_survives_save_load_and_clear(flash: FlashStorage<'static>) {
        let offset = (flash.capacity() as u32).saturating_sub(FlashStorage::SECTOR_SIZE);
        let mut store = CalibrationStore::new(flash, offset);
        let record = CalibrationRecord {
            center_x: 127,
            center_y: 131,
            min_x: 22,
            max_x: 231,
            min_y: 30,
            max_y: 226,
        };

        store.save(&record).unwrap();
        assert_eq!(store.load(), Some(record));

        store.clear().unwrap();
        assert_eq!(store.load(), None);

        embassy_time::Timer::after(embassy_time::Duration::from_millis(10)).await;
    }
}
