/*!
    simulated wiring for running the sequencers off target

    [Board] plays the gpio hardware with an eprom like chip soldered to it,
    [Terminal] plays the serial link and whoever listens on the other end.
    both record everything so a test can check what actually reached them.
*/

use core::convert::Infallible;

use heapless::{Deque, Vec};

use crate::{
    bus::{Level, Line, Mode, Port},
    wiring::Pinout,
    };


/// how many distinct lines a simulated board can hold
const LINES: usize = 64;

/**
    gpio port with a memory chip wired to it

    the chip presents `contents[address]` on the data bus whenever chip enable
    and output enable are both at their active level, like the real device
    once its access time elapsed. lines never driven read back high, like a
    floating ttl input, and addresses past the contents read as erased cells.
*/
pub struct Board<'m, const ADDRESS: usize, const DATA: usize> {
    pinout: Pinout<ADDRESS, DATA>,
    contents: &'m [u8],
    driven: Vec<(Line, Level), LINES>,
    configured: Vec<(Line, Mode), LINES>,
    /// number of `set` calls so far
    pub sets: usize,
    /// number of `get` calls so far
    pub gets: usize,
}
impl<'m, const ADDRESS: usize, const DATA: usize> Board<'m, ADDRESS, DATA> {
    pub fn new(pinout: Pinout<ADDRESS, DATA>, contents: &'m [u8]) -> Self {
        Self {
            pinout,
            contents,
            driven: Vec::new(),
            configured: Vec::new(),
            sets: 0,
            gets: 0,
        }
    }
    /// level a line is currently driven to, high when never driven
    pub fn level(&self, line: Line) -> Level {
        self.driven.iter()
            .find(|(driven, _)| *driven == line)
            .map(|(_, level)| *level)
            .unwrap_or(Level::High)
    }
    /// mode a line was last configured to, if ever
    pub fn mode(&self, line: Line) -> Option<Mode> {
        self.configured.iter()
            .find(|(configured, _)| *configured == line)
            .map(|(_, mode)| *mode)
    }
    /// value currently driven on the address bus
    pub fn address(&self) -> u32 {
        let mut value = 0;
        for i in 0 .. ADDRESS {
            if self.level(self.pinout.address.line(i)) == Level::High {
                value |= 1 << i;
            }
        }
        value
    }
    /// whether the chip is currently driving the data bus
    fn selected(&self) -> bool {
        let control = &self.pinout.control;
        self.level(control.chip_enable.line) == control.chip_enable.active
        && self.level(control.output_enable.line) == control.output_enable.active
    }
}
impl<const ADDRESS: usize, const DATA: usize> Port for Board<'_, ADDRESS, DATA> {
    fn configure(&mut self, line: Line, mode: Mode) {
        match self.configured.iter_mut().find(|(configured, _)| *configured == line) {
            Some(entry) => entry.1 = mode,
            None => self.configured.push((line, mode)).unwrap(),
        }
    }
    fn set(&mut self, line: Line, level: Level) {
        self.sets += 1;
        match self.driven.iter_mut().find(|(driven, _)| *driven == line) {
            Some(entry) => entry.1 = level,
            None => self.driven.push((line, level)).unwrap(),
        }
    }
    fn get(&mut self, line: Line) -> Level {
        self.gets += 1;
        if self.selected() {
            for i in 0 .. DATA {
                if self.pinout.data.line(i) == line {
                    let byte = self.contents.get(self.address() as usize).copied().unwrap_or(0xff);
                    return match byte >> i & 1 {
                        0 => Level::Low,
                        _ => Level::High,
                        }
                }
            }
        }
        self.level(line)
    }
}

/**
    serial link double for the sequencer side

    collects every accepted byte in [sent](Self::sent), scripts transmit
    backpressure with [hold](Self::hold) and operator input with
    [press](Self::press).
*/
pub struct Terminal {
    /// every byte accepted so far
    pub sent: Vec<u8, 4096>,
    input: Deque<u8, 16>,
    busy: u32,
}
impl Terminal {
    pub fn new() -> Self {
        Self {sent: Vec::new(), input: Deque::new(), busy: 0}
    }
    /// report the transmitter busy for the next `checks` readiness checks
    pub fn hold(&mut self, checks: u32) {
        self.busy = checks;
    }
    /// queue a byte as if the operator typed it
    pub fn press(&mut self, byte: u8) {
        self.input.push_back(byte).unwrap();
    }
}
impl embedded_io::ErrorType for Terminal {
    type Error = Infallible;
}
impl embedded_io::Read for Terminal {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        if buf.is_empty()
            {return Ok(0)}
        match self.input.pop_front() {
            Some(byte) => {
                buf[0] = byte;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
impl embedded_io::Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Infallible> {
        self.sent.extend_from_slice(buf).unwrap();
        Ok(buf.len())
    }
    fn flush(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}
impl embedded_io::WriteReady for Terminal {
    fn write_ready(&mut self) -> Result<bool, Infallible> {
        if self.busy > 0 {
            self.busy -= 1;
            return Ok(false)
        }
        Ok(true)
    }
}
