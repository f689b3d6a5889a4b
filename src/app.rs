//! Embassy application: peripherals, producer tasks, and the consumer loop.
//!
//! Builds only for the ARM target; the host sees a stub `main` instead.

use defmt::{debug, info};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::uart::{Blocking, Config as UartConfig, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Ticker, Timer};
use fsae_dash::config::{
    DISPLAY_BAUD,
    FRAME_ENGINE_SPEED,
    FRAME_ENGINE_STATUS,
    FRAME_FUEL_LAMBDA,
    FRAME_GEAR,
    FRAME_OIL_PRESSURE,
    FRAME_THROTTLE,
    FRAME_WHEEL_SPEED,
};
use fsae_dash::{BusFrame, Dashboard, DisplayLink, Event, LedPattern};
use {defmt_rtt as _, panic_probe as _};

use crate::button::PageButton;

// Program metadata for `picotool info`
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"fsae-dash"),
    embassy_rp::binary_info::rp_program_description!(c"CAN telemetry dashboard on RP2350"),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

// =============================================================================
// Event Channel
// =============================================================================

/// All producer tasks post here; the main loop is the single consumer.
static EVENTS: Channel<CriticalSectionRawMutex, Event, 32> = Channel::new();

// =============================================================================
// Display Link
// =============================================================================

/// Display link over the blocking UART transmitter.
///
/// Commands are a handful of bytes at 9600 baud; blocking writes keep the
/// emitter simple and preserve command ordering.
struct NextionUart {
    tx: UartTx<'static, Blocking>,
}

impl DisplayLink for NextionUart {
    fn write_bytes(
        &mut self,
        bytes: &[u8],
    ) {
        self.tx.blocking_write(bytes).ok();
    }
}

// =============================================================================
// Shift LEDs
// =============================================================================

/// The four tachometer LED outputs. Wired active-low: driven low = on.
struct TachLeds {
    green: Output<'static>,
    orange: Output<'static>,
    red: Output<'static>,
    white: Output<'static>,
}

impl TachLeds {
    fn apply(
        &mut self,
        pattern: LedPattern,
    ) {
        set_led(&mut self.green, pattern.green);
        set_led(&mut self.orange, pattern.orange);
        set_led(&mut self.red, pattern.red);
        set_led(&mut self.white, pattern.white);
    }
}

fn set_led(
    led: &mut Output<'static>,
    on: bool,
) {
    if on {
        led.set_low();
    } else {
        led.set_high();
    }
}

/// Power-on light sweep: climb the ladder, double-blink the shift light,
/// then climb back down.
async fn startup_sweep(leds: &mut TachLeds) {
    const STEP_MS: u64 = 90;
    const BLINK_MS: u64 = 80;

    leds.apply(LedPattern::OFF);
    Timer::after_millis(100).await;

    leds.green.set_low();
    Timer::after_millis(STEP_MS).await;
    leds.orange.set_low();
    Timer::after_millis(STEP_MS).await;
    leds.red.set_low();
    Timer::after_millis(STEP_MS).await;

    leds.white.set_low();
    Timer::after_millis(BLINK_MS).await;
    leds.white.set_high();
    Timer::after_millis(BLINK_MS).await;
    leds.white.set_low();
    Timer::after_millis(BLINK_MS).await;
    leds.white.set_high();
    Timer::after_millis(STEP_MS).await;

    leds.red.set_high();
    Timer::after_millis(STEP_MS).await;
    leds.orange.set_high();
    Timer::after_millis(STEP_MS).await;
    leds.green.set_high();
    Timer::after_millis(1000).await;
}

// =============================================================================
// Producer Tasks
// =============================================================================

/// Demo frame source - stands in for the CAN transceiver bridge.
///
/// Generates sine-driven telemetry at roughly bus-realistic rates: the
/// engine speed frame every cycle, the slower frames staggered across
/// cycles.
#[embassy_executor::task]
async fn demo_frame_task(start: Instant) {
    info!("Demo frame task started");

    let mut ticker = Ticker::every(Duration::from_millis(10));
    let mut cycle = 0u32;

    loop {
        let t = start.elapsed().as_millis() as f32 / 1000.0;

        // Engine sweeps between idle and the limiter.
        let rpm = (7000.0 + 6500.0 * micromath::F32(t * 0.4).sin().0) as u16;
        send_frame(BusFrame::new(FRAME_ENGINE_SPEED, &rpm_payload(rpm, t))).await;

        match cycle % 5 {
            0 => {
                // Coolant ~90-110C, oil ~95-120C, battery ~13V
                let coolant_c = 100.0 + 10.0 * micromath::F32(t * 0.05).sin().0;
                let oil_c = 107.0 + 13.0 * micromath::F32(t * 0.04).sin().0;
                let batt = (130.0 + 8.0 * micromath::F32(t * 0.15).sin().0) as u8;
                let payload = [(coolant_c as u8) + 40, (oil_c as u8) + 40, 0, 0, 0, batt, 0, 0];
                send_frame(BusFrame::new(FRAME_ENGINE_STATUS, &payload)).await;
            }
            1 => {
                // Oil pressure tracks RPM, fuel holds near 43 PSI
                let oil_raw = 1500 + (rpm / 4);
                let fuel_raw = (2965.0 + 200.0 * micromath::F32(t * 0.3).sin().0) as u16;
                let lambda_raw = (95.0 + 10.0 * micromath::F32(t * 0.7).sin().0) as u16;
                let [oh, ol] = oil_raw.to_be_bytes();
                send_frame(BusFrame::new(FRAME_OIL_PRESSURE, &[0, 0, 0, 0, 0, 0, oh, ol])).await;
                let [fh, fl] = fuel_raw.to_be_bytes();
                let [lh, ll] = lambda_raw.to_be_bytes();
                send_frame(BusFrame::new(FRAME_FUEL_LAMBDA, &[0, 0, lh, ll, fh, fl, 0, 0])).await;
            }
            2 => {
                let gear = ((t / 4.0) as u32 % 7) as u8;
                send_frame(BusFrame::new(FRAME_GEAR, &[0, 0, 0, 0, 0, 0, gear, 0])).await;
            }
            3 => {
                let throttle_raw = (500.0 + 480.0 * micromath::F32(t * 0.4).sin().0) as u16;
                let [th, tl] = throttle_raw.to_be_bytes();
                send_frame(BusFrame::new(FRAME_THROTTLE, &[th, tl, 0, 0, 0, 0, 0, 0])).await;
            }
            _ => {
                let ws_raw = (600.0 + 550.0 * micromath::F32(t * 0.2).sin().0) as u16;
                let [wh, wl] = ws_raw.to_be_bytes();
                send_frame(BusFrame::new(FRAME_WHEEL_SPEED, &[0, 0, 0, 0, 0, 0, wh, wl])).await;
            }
        }

        cycle = cycle.wrapping_add(1);
        ticker.next().await;
    }
}

fn rpm_payload(
    rpm: u16,
    t: f32,
) -> [u8; 8] {
    let [rh, rl] = rpm.to_be_bytes();
    // Manifold pressure in kPa tenths, swinging around atmospheric
    let map_raw = (1000.0 + 300.0 * micromath::F32(t * 0.4).sin().0) as u16;
    let [mh, ml] = map_raw.to_be_bytes();
    [rh, rl, mh, ml, 0, 0, 0, 0]
}

async fn send_frame(frame: BusFrame) {
    debug!("frame id={=u16} data={=[u8]:x}", frame.id, &frame.data[..frame.len as usize]);
    EVENTS.send(Event::Frame(frame)).await;
}

/// Scheduler tick source.
#[embassy_executor::task]
async fn tick_task() {
    let mut ticker = Ticker::every(Duration::from_millis(10));
    loop {
        ticker.next().await;
        EVENTS.send(Event::Tick).await;
    }
}

/// Page button poller with debounce.
#[embassy_executor::task]
async fn button_task(pin: Input<'static>) {
    info!("Button task started");

    let mut state = PageButton::new();
    let mut ticker = Ticker::every(Duration::from_millis(10));
    loop {
        ticker.next().await;
        if state.just_pressed(pin.is_low()) {
            EVENTS.send(Event::PageButton).await;
        }
    }
}

// =============================================================================
// Main
// =============================================================================

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dashboard starting...");

    let p = embassy_rp::init(Default::default());

    // Display UART: TX on GPIO0 at the display's fixed baud rate.
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = DISPLAY_BAUD;
    let tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config);
    let mut link = NextionUart { tx };
    info!("Display link up at {} baud", DISPLAY_BAUD);

    // Shift LEDs (active-low). Green=2, Orange=3, Red=4, White=5.
    let mut leds = TachLeds {
        green: Output::new(p.PIN_2, Level::High),
        orange: Output::new(p.PIN_3, Level::High),
        red: Output::new(p.PIN_4, Level::High),
        white: Output::new(p.PIN_5, Level::High),
    };

    // Page button (active-low with internal pull-up).
    let page_button = Input::new(p.PIN_15, Pull::Up);

    startup_sweep(&mut leds).await;
    info!("Startup sweep done");

    let start = Instant::now();
    spawner.spawn(demo_frame_task(start)).unwrap();
    spawner.spawn(tick_task()).unwrap();
    spawner.spawn(button_task(page_button)).unwrap();

    // Single owner of all dashboard state.
    let mut dash = Dashboard::new();
    dash.startup(&mut link);
    info!("Opening screen: {=str}", dash.current_screen().name());

    let receiver = EVENTS.receiver();
    loop {
        let event = receiver.receive().await;
        let now_ms = Instant::now().as_millis();

        let prev_screen = dash.current_screen();
        dash.handle_event(event, now_ms, &mut link);

        if dash.current_screen() != prev_screen {
            info!("Screen: {=str}", dash.current_screen().name());
        }

        leds.apply(dash.shift_lights());
    }
}
