/*!
    address bus exercise mode

    drives the address bus from a free running counter with the memory kept
    released, for checking address line wiring with a scope or a logic
    analyzer before attempting a capture. nothing is sampled, nothing is sent.
*/

use log::*;

use crate::{
    bus::Port,
    wiring::Pinout,
    };


/**
    reduced sequencer driving only the address bus

    unlike [Dumper](crate::dump::Dumper) the counter free runs and wraps,
    there is no terminal condition and the chip stays released the whole
    time.
*/
pub struct Scanner<const ADDRESS: usize, const DATA: usize> {
    pinout: Pinout<ADDRESS, DATA>,
    counter: u32,
}
impl<const ADDRESS: usize, const DATA: usize> Scanner<ADDRESS, DATA> {
    pub const fn new(pinout: Pinout<ADDRESS, DATA>) -> Self {
        Self {pinout, counter: 0}
    }
    /// ticks elapsed since the scan started
    pub fn counter(&self) -> u32 {self.counter}

    /// configure the wiring, every control line stays released
    pub fn bring_up(&self, port: &mut impl Port) {
        debug!("bring up, scanning {} addresses", self.pinout.address.range());
        self.pinout.configure(port);
    }
    /// present the current address, then advance. the bus truncates to its width
    pub fn tick(&mut self, port: &mut impl Port) {
        self.pinout.address.write(port, self.counter);
        self.counter = self.counter.wrapping_add(1);
    }
}
