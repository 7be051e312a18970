/*!
    discrete gpio lines grouped into parallel buses

    the whole crate speaks [Line] and [Level] and reaches the actual hardware
    through the [Port] capability, implemented once per target platform. a
    [Bus] turns an arbitrary ordered set of lines into one integer value, so
    the sequencers are plain arithmetic instead of per-pin special cases.
*/

use bilge::prelude::*;


/// one gpio line, identified by hardware port (bank) and index in this port
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Line {
    /// gpio bank, 0 on single bank targets
    pub port: u8,
    /// line index in the bank
    pub index: u8,
}
impl Line {
    pub const fn new(port: u8, index: u8) -> Self {
        Self {port, index}
    }
}

/// electrical level of a line
#[bitsize(1)]
#[derive(Copy, Clone, FromBits, PartialEq, Debug)]
pub enum Level {
    Low = 0,
    High = 1,
}
impl core::ops::Not for Level {
    type Output = Level;
    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// direction of a line together with its electrical configuration
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Mode {
    Input(Pull),
    Output(Drive),
}
/// input bias
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Pull {
    Floating,
    Up,
    Down,
}
/// output stage
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Drive {
    PushPull,
    OpenDrain,
}

/**
    capability to the target's gpio hardware

    implementations are infallible: a [Line] that cannot be configured or
    driven is a wiring table mistake, not a runtime condition. `get` takes
    `&mut self` since sampling may touch hardware registers.
*/
pub trait Port {
    /// set direction and electrical configuration of a line
    fn configure(&mut self, line: Line, mode: Mode);
    /// drive a line to the given level
    fn set(&mut self, line: Line, level: Level);
    /// sample the current level of a line
    fn get(&mut self, line: Line) -> Level;
}

/**
    an ordered group of lines carrying one multi-bit value

    lines are listed lsb first: line `i` carries bit `i` of the value. lines
    may belong to different hardware ports and need not be contiguous, the
    wiring order is data rather than code.
*/
#[derive(Copy, Clone, Debug)]
pub struct Bus<const WIDTH: usize> {
    lines: [Line; WIDTH],
}
impl<const WIDTH: usize> Bus<WIDTH> {
    pub const fn new(lines: [Line; WIDTH]) -> Self {
        Self {lines}
    }
    /// number of lines
    pub const fn width(&self) -> usize {WIDTH}
    /// number of distinct values the bus can carry, one past its highest value
    pub const fn range(&self) -> u32 {1 << WIDTH}
    /// line carrying bit `bit` of the value
    pub const fn line(&self, bit: usize) -> Line {self.lines[bit]}

    /// apply the same mode to every line, in bus order. safe to call again
    pub fn configure(&self, port: &mut impl Port, mode: Mode) {
        for line in self.lines {
            port.configure(line, mode);
        }
    }
    /// present `value` on the bus, bit `i` driving line `i`. bits past the bus width are ignored
    pub fn write(&self, port: &mut impl Port, value: u32) {
        for (i, line) in self.lines.into_iter().enumerate() {
            port.set(line, Level::from(u1::new((value >> i & 1) as u8)));
        }
    }
    /// sample every line into one value, bit `i` coming from line `i`. bits past the bus width are 0
    pub fn read(&self, port: &mut impl Port) -> u32 {
        let mut value = 0;
        for (i, line) in self.lines.into_iter().enumerate() {
            value |= u32::from(u1::from(port.get(line)).value()) << i;
        }
        value
    }
}
