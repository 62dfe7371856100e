#![allow(missing_docs)]
#![no_std]
#![no_main]

use core::{convert::Infallible, panic};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::{Duration, Timer};
use key_envoy::{
    Result,
    event_queue::EventQueue,
    key::{DEFAULT_SCAN_PERIOD, KeyDevice, KeyTiming, PinSample, PressedTo},
    key_scanner::{KeyRegistry, KeyScanner},
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

type KeyPin = PinSample<Input<'static>>;
type Scanner = KeyScanner<'static, KeyPin, 1, 16>;

// Written by the scan task, read by main.
static KEY_EVENTS: EventQueue<16> = EventQueue::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // One key on GPIO 13, wired to GND (pull-up, reads LOW when pressed).
    let key13 = PinSample::new(Input::new(p.PIN_13, Pull::Up), PressedTo::Ground);
    let registry = KeyRegistry::new([KeyDevice::new(0, KeyTiming::DEFAULT, key13)])?;

    static SCANNER: StaticCell<Scanner> = StaticCell::new();
    let scanner = SCANNER.init(KeyScanner::new(registry, &KEY_EVENTS));
    defmt::unwrap!(spawner.spawn(scan_task(scanner)));

    // The queue holds 16 events, far more than a person can click in 100 ms.
    loop {
        while let Some(event) = KEY_EVENTS.pop() {
            defmt::info!("key {}: {}", event.key_id(), event.kind());
        }
        Timer::after(Duration::from_millis(100)).await;
    }
}

#[embassy_executor::task]
async fn scan_task(scanner: &'static mut Scanner) -> ! {
    scanner.run(DEFAULT_SCAN_PERIOD).await
}
