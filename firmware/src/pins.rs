/*!
    wiring table of the memory device and gpio access on the esp32s3

    gpio numbers avoid the flash and usb pins of the devkit. the uart to the
    host lives on gpio 17 (tx) and 18 (rx), outside this table.
*/

use esp_hal::gpio::{DriveMode, Flex, InputConfig, OutputConfig};
use heapless::Vec;

use promdump::{
    bus::{Bus, Drive, Level, Line, Mode, Port, Pull},
    lines,
    wiring::{Control, Controls, Pinout},
    };


/// a 27c040 class device: 19 address lines, 8 data lines, 2^19 cells
pub const PINOUT: Pinout<19, 8> = Pinout::new(
    Bus::new(lines![
        (0, 1), (0, 2), (0, 4), (0, 5), (0, 6), (0, 7), (0, 8), (0, 9), (0, 10),
        (0, 11), (0, 12), (0, 13), (0, 14), (0, 21), (0, 33), (0, 34), (0, 38),
        (0, 39), (0, 40),
    ]),
    Bus::new(lines![(0, 41), (0, 42), (0, 45), (0, 46), (0, 47), (0, 48), (0, 35), (0, 36)]),
    Controls {
        output_enable: Control::active_low(Line::new(0, 15)),
        chip_enable: Control::active_low(Line::new(0, 16)),
        write_enable: Control::active_low(Line::new(0, 3)),
    },
);

/// wired lines overall: address, data, then the three controls
pub const COUNT: usize = 19 + 8 + 3;

/**
    [Port] over the esp32s3 gpio matrix

    the chip has a single gpio bank, so the port field of every [Line] is 0
    and the index is the gpio number.
*/
pub struct Pins {
    lines: Vec<(Line, Flex<'static>), COUNT>,
}
impl Pins {
    /// attach flex handles to the wiring table, given in pinout order:
    /// address lines lsb first, data lines lsb first, then oe, ce, we
    pub fn new(flex: [Flex<'static>; COUNT]) -> Self {
        let order = (0 .. PINOUT.address.width()).map(|bit| PINOUT.address.line(bit))
            .chain((0 .. PINOUT.data.width()).map(|bit| PINOUT.data.line(bit)))
            .chain([
                PINOUT.control.output_enable.line,
                PINOUT.control.chip_enable.line,
                PINOUT.control.write_enable.line,
            ]);
        let mut lines = Vec::new();
        for couple in order.zip(flex) {
            let _ = lines.push(couple);
        }
        Self {lines}
    }
    fn pin(&mut self, line: Line) -> &mut Flex<'static> {
        &mut self.lines.iter_mut()
            .find(|(wired, _)| *wired == line)
            .unwrap()
            .1
    }
}
impl Port for Pins {
    fn configure(&mut self, line: Line, mode: Mode) {
        let pin = self.pin(line);
        match mode {
            Mode::Input(pull) => {
                pin.apply_input_config(&InputConfig::default().with_pull(match pull {
                    Pull::Floating => esp_hal::gpio::Pull::None,
                    Pull::Up => esp_hal::gpio::Pull::Up,
                    Pull::Down => esp_hal::gpio::Pull::Down,
                }));
                pin.set_output_enable(false);
                pin.set_input_enable(true);
            }
            Mode::Output(drive) => {
                pin.apply_output_config(&OutputConfig::default().with_drive_mode(match drive {
                    Drive::PushPull => DriveMode::PushPull,
                    Drive::OpenDrain => DriveMode::OpenDrain,
                }));
                pin.set_output_enable(true);
            }
        }
    }
    fn set(&mut self, line: Line, level: Level) {
        self.pin(line).set_level(match level {
            Level::Low => esp_hal::gpio::Level::Low,
            Level::High => esp_hal::gpio::Level::High,
        });
    }
    fn get(&mut self, line: Line) -> Level {
        if self.pin(line).is_high() {Level::High} else {Level::Low}
    }
}
