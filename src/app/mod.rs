mod config;
mod types;

use embassy_time::{Duration, Instant, Ticker};
use embedded_storage::ReadStorage;
use esp_hal::{
    gpio::{Level, Output, OutputConfig},
    i2c::master::{Config as I2cConfig, I2c, SoftwareTimeout},
    rmt::Rmt,
    time::{Duration as HalDuration, Rate},
    timer::timg::TimerGroup,
};
use esp_hal_smartled::Ws2812SmartLeds;
use esp_storage::FlashStorage;
use log::{info, warn};
use mecanum_setup::{
    config::{SetupConfig, UI_TICK_MS},
    drivers::Nunchuk,
    led::SmartLedIndicator,
    motor::{StepperBank, WheelPins},
    platform::{BusyDelay, HalI2c},
    runtime::{SetupPeripherals, SetupRunner},
    setup::SetupMode,
    storage::CalibrationStore,
};

use self::{
    config::{
        I2C_TRANSACTION_TIMEOUT_MS, LED_BUFFER_LEN, NUNCHUK_I2C_KHZ, OLED_I2C_KHZ,
        STEPPER_ENABLE_ACTIVE_LOW,
    },
    types::{oled_panel, FirmwareRunner},
};

pub(crate) fn run() -> ! {
    esp_println::logger::init_logger(log::LevelFilter::Info);
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let i2c_cfg = |khz| {
        I2cConfig::default()
            .with_frequency(Rate::from_khz(khz))
            .with_software_timeout(SoftwareTimeout::Transaction(HalDuration::from_millis(
                I2C_TRANSACTION_TIMEOUT_MS,
            )))
    };
    let oled_bus = I2c::new(peripherals.I2C0, i2c_cfg(OLED_I2C_KHZ))
        .expect("failed to init I2C0")
        .with_sda(peripherals.GPIO21)
        .with_scl(peripherals.GPIO22);
    let nunchuk_bus = I2c::new(peripherals.I2C1, i2c_cfg(NUNCHUK_I2C_KHZ))
        .expect("failed to init I2C1")
        .with_sda(peripherals.GPIO18)
        .with_scl(peripherals.GPIO19);

    let mut display = oled_panel(oled_bus);
    if let Err(err) = display.init() {
        warn!("oled init failed: {:?}", err);
    }

    let mut controller = Nunchuk::new(HalI2c::new(nunchuk_bus), BusyDelay::new());
    if let Err(err) = controller.init() {
        warn!("nunchuk init failed: {:?}", err);
    }

    let rmt = Rmt::new(peripherals.RMT, Rate::from_mhz(80)).expect("failed to init RMT");
    let led = Ws2812SmartLeds::<LED_BUFFER_LEN, _>::new(rmt.channel0, peripherals.GPIO4)
        .expect("failed to create WS2812 driver");

    let out = OutputConfig::default();
    let wheels = [
        WheelPins {
            direction: Output::new(peripherals.GPIO25, Level::Low, out),
            step: Output::new(peripherals.GPIO26, Level::Low, out),
        },
        WheelPins {
            direction: Output::new(peripherals.GPIO27, Level::Low, out),
            step: Output::new(peripherals.GPIO14, Level::Low, out),
        },
        WheelPins {
            direction: Output::new(peripherals.GPIO32, Level::Low, out),
            step: Output::new(peripherals.GPIO33, Level::Low, out),
        },
        WheelPins {
            direction: Output::new(peripherals.GPIO13, Level::Low, out),
            step: Output::new(peripherals.GPIO23, Level::Low, out),
        },
    ];
    let enable = Output::new(peripherals.GPIO17, Level::High, out);
    let motors = match StepperBank::new(wheels, enable, STEPPER_ENABLE_ACTIVE_LOW) {
        Ok(bank) => bank,
        Err(err) => match err {},
    };

    let flash = FlashStorage::new(peripherals.FLASH).multicore_auto_park();
    let offset = (flash.capacity() as u32).saturating_sub(FlashStorage::SECTOR_SIZE);

    let runner = SetupRunner::new(
        SetupConfig::default(),
        SetupPeripherals {
            controller,
            store: CalibrationStore::new(flash, offset),
            display,
            light: SmartLedIndicator::new(led),
            motors,
            delay: BusyDelay::new(),
        },
    );

    let mut executor = esp_rtos::embassy::Executor::new();
    let executor = unsafe { make_static(&mut executor) };
    executor.run(move |spawner| {
        spawner.must_spawn(setup_task(runner));
    });
}

#[embassy_executor::task]
async fn setup_task(mut runner: FirmwareRunner) {
    let boot_instant = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(UI_TICK_MS));

    loop {
        let now_ms = Instant::now()
            .saturating_duration_since(boot_instant)
            .as_millis();
        let outcome = runner.tick(now_ms);
        if outcome.mode_changed() && outcome.after == SetupMode::Complete {
            info!("setup finished, idling");
        }
        ticker.next().await;
    }
}

unsafe fn make_static<T>(value: &mut T) -> &'static mut T {
    unsafe { core::mem::transmute(value) }
}
