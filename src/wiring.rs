/*!
    description of how the memory device is wired to the target

    a [Pinout] is meant to be declared as a `const` table next to the firmware
    entry point and never changed afterward. polarity of each control line is
    resolved here once, as its active [Level], so the sequencers only ever
    speak assert/deassert.
*/

use log::*;

use crate::bus::{Bus, Drive, Level, Line, Mode, Port, Pull};


/// one memory control input and the level its wiring makes active
#[derive(Copy, Clone, Debug)]
pub struct Control {
    pub line: Line,
    pub active: Level,
}
impl Control {
    /// control wired active low, the usual convention of eprom control inputs
    pub const fn active_low(line: Line) -> Self {
        Self {line, active: Level::Low}
    }
    pub const fn active_high(line: Line) -> Self {
        Self {line, active: Level::High}
    }
    /// drive the line to its active level
    pub fn assert(&self, port: &mut impl Port) {
        port.set(self.line, self.active);
    }
    /// drive the line to its released level
    pub fn deassert(&self, port: &mut impl Port) {
        port.set(self.line, !self.active);
    }
}

/// the three control inputs of a parallel memory
#[derive(Copy, Clone, Debug)]
pub struct Controls {
    pub output_enable: Control,
    pub chip_enable: Control,
    /// wired so it can be parked released, never asserted by any sequencer
    pub write_enable: Control,
}
impl Controls {
    /// park every control at its released level
    pub fn deassert_all(&self, port: &mut impl Port) {
        self.output_enable.deassert(port);
        self.chip_enable.deassert(port);
        self.write_enable.deassert(port);
    }
    /// switch every control to open drain output
    pub fn configure(&self, port: &mut impl Port) {
        for control in [self.output_enable, self.chip_enable, self.write_enable] {
            port.configure(control.line, Mode::Output(Drive::OpenDrain));
        }
    }
}

/// complete wiring of one memory device: address bus, data bus, control lines
#[derive(Copy, Clone, Debug)]
pub struct Pinout<const ADDRESS: usize, const DATA: usize> {
    pub address: Bus<ADDRESS>,
    pub data: Bus<DATA>,
    pub control: Controls,
}
impl<const ADDRESS: usize, const DATA: usize> Pinout<ADDRESS, DATA> {
    pub const fn new(address: Bus<ADDRESS>, data: Bus<DATA>, control: Controls) -> Self {
        Self {address, data, control}
    }
    /**
        configure every line for its role

        control lines are driven to their released level before being switched
        to output mode, the device must never catch an asserted control while
        its lines are still changing direction.
    */
    pub fn configure(&self, port: &mut impl Port) {
        debug!("configuring {} address and {} data lines", ADDRESS, DATA);
        self.control.deassert_all(port);
        self.control.configure(port);
        self.address.configure(port, Mode::Output(Drive::PushPull));
        self.data.configure(port, Mode::Input(Pull::Floating));
    }
}
