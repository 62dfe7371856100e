#![allow(missing_docs)]
#![no_std]
#![no_main]

use core::{convert::Infallible, panic};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Timer};
use key_envoy::{
    Result,
    event_queue::EventQueue,
    key::{DEFAULT_SCAN_PERIOD, KeyDevice, KeyTiming, PinSample, PressedTo},
    key_event::KeyEventKind,
    key_scanner::{KeyRegistry, KeyScanner},
};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

type KeyPin = PinSample<Input<'static>>;
type Scanner = KeyScanner<'static, KeyPin, 2, 16>;

static KEY_EVENTS: EventQueue<16> = EventQueue::new();

const BLINK_DELAY: Duration = Duration::from_millis(150);

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    // Key 1 gets a snappier double click and a shorter long press.
    let fast_timing = KeyTiming::from_durations(
        DEFAULT_SCAN_PERIOD,
        Duration::from_millis(10),
        Duration::from_millis(800),
        Duration::from_millis(200),
    )?;
    let key13 = PinSample::new(Input::new(p.PIN_13, Pull::Up), PressedTo::Ground);
    let key14 = PinSample::new(Input::new(p.PIN_14, Pull::Up), PressedTo::Ground);
    let registry = KeyRegistry::new([
        KeyDevice::new(0, KeyTiming::DEFAULT, key13),
        KeyDevice::new(1, fast_timing, key14),
    ])?;

    static SCANNER: StaticCell<Scanner> = StaticCell::new();
    let scanner = SCANNER.init(KeyScanner::new(registry, &KEY_EVENTS));
    defmt::unwrap!(spawner.spawn(scan_task(scanner)));

    let mut led = Output::new(p.PIN_25, Level::Low);
    loop {
        // Poll with the C-style packed reader, one event per pass.
        let Some(event) = key_envoy::key_event::KeyEvent::decode(KEY_EVENTS.read_raw()) else {
            Timer::after(Duration::from_millis(20)).await;
            continue;
        };
        defmt::info!("key {}: {}", event.key_id(), event.kind());
        match event.kind() {
            KeyEventKind::ShortPress => led.toggle(),
            KeyEventKind::DoublePress => {
                for _ in 0..event.key_id().saturating_add(2) {
                    led.toggle();
                    Timer::after(BLINK_DELAY).await;
                    led.toggle();
                    Timer::after(BLINK_DELAY).await;
                }
            }
            KeyEventKind::LongPress => led.set_high(),
            KeyEventKind::LongReleaseUp => led.set_low(),
        }
    }
}

#[embassy_executor::task]
async fn scan_task(scanner: &'static mut Scanner) -> ! {
    scanner.run(DEFAULT_SCAN_PERIOD).await
}
