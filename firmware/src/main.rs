//! dump the wired device over uart as hexadecimal text

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

mod pins;

use esp_backtrace as _;
use esp_hal::{
    clock::CpuClock,
    gpio::Flex,
    timer::timg::TimerGroup,
    uart::{DataBits, Parity, StopBits},
};
use embassy_executor::Spawner;
use embassy_time::{Duration, Ticker, Timer};
use esp_println as _;
use log::*;

use promdump::{
    dump::Dumper,
    relay::{Serial, wait_start},
    };

use crate::pins::Pins;


esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(_spawner: Spawner) {
    // init hardware
    esp_println::logger::init_logger_from_env();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // take every wired gpio, in pinout order
    info!("setting up wiring");
    let mut port = Pins::new([
        Flex::new(peripherals.GPIO1),
        Flex::new(peripherals.GPIO2),
        Flex::new(peripherals.GPIO4),
        Flex::new(peripherals.GPIO5),
        Flex::new(peripherals.GPIO6),
        Flex::new(peripherals.GPIO7),
        Flex::new(peripherals.GPIO8),
        Flex::new(peripherals.GPIO9),
        Flex::new(peripherals.GPIO10),
        Flex::new(peripherals.GPIO11),
        Flex::new(peripherals.GPIO12),
        Flex::new(peripherals.GPIO13),
        Flex::new(peripherals.GPIO14),
        Flex::new(peripherals.GPIO21),
        Flex::new(peripherals.GPIO33),
        Flex::new(peripherals.GPIO34),
        Flex::new(peripherals.GPIO38),
        Flex::new(peripherals.GPIO39),
        Flex::new(peripherals.GPIO40),
        Flex::new(peripherals.GPIO41),
        Flex::new(peripherals.GPIO42),
        Flex::new(peripherals.GPIO45),
        Flex::new(peripherals.GPIO46),
        Flex::new(peripherals.GPIO47),
        Flex::new(peripherals.GPIO48),
        Flex::new(peripherals.GPIO35),
        Flex::new(peripherals.GPIO36),
        Flex::new(peripherals.GPIO15),
        Flex::new(peripherals.GPIO16),
        Flex::new(peripherals.GPIO3),
    ]);
    let mut dumper = Dumper::new(pins::PINOUT);
    dumper.bring_up(&mut port);

    let config = esp_hal::uart::Config::default()
        .with_baudrate(115_200)
        .with_data_bits(DataBits::_8)
        .with_stop_bits(StopBits::_1)
        .with_parity(Parity::None)
        ;
    let mut uart = esp_hal::uart::Uart::new(peripherals.UART1, config).unwrap()
        .with_rx(peripherals.GPIO18)
        .with_tx(peripherals.GPIO17);

    // the dump only starts on operator demand
    info!("press enter to start");
    wait_start(&mut uart).unwrap();

    // one phase per character time at 115200 baud keeps the uart saturated
    // without ever blocking on it
    let mut relay = Serial::new(uart);
    let mut ticker = Ticker::every(Duration::from_micros(100));
    info!("dumping");
    while !dumper.done() {
        ticker.next().await;
        dumper.tick(&mut port, &mut relay);
    }
    info!("dump complete");
    loop {
        Timer::after(Duration::from_secs(60)).await;
    }
}
