/*!
    the dump sequencer, streaming the whole device as hexadecimal text

    one address costs [PHASES] ticks: present the address, then stream the
    sampled byte as two hex digits and a separator, one byte per tick. run
    from a periodic timer at the serial character rate, the dump flows with no
    buffering at all and throttles itself to the link.
*/

use bilge::prelude::*;
use log::*;

use crate::{
    bus::Port,
    relay::Relay,
    utils::xdigit,
    wiring::Pinout,
    };


/// ticks spent per address
pub const PHASES: u32 = 4;
/// addresses per output row
pub const ROW: u32 = 16;

const LINE_FEED: u8 = 0x0a;
const RETURN: u8 = 0x0d;
const SPACE: u8 = b' ';

/// work done by one tick, decoded from the low two bits of the tick counter
#[bitsize(2)]
#[derive(Copy, Clone, FromBits, PartialEq, Debug)]
pub enum Phase {
    /// present the address, open a row when needed, let the device drive data
    Address = 0,
    /// sample the data bus, send the high digit
    High = 1,
    /// send the low digit
    Low = 2,
    /// send the column or row separator
    Separator = 3,
}

/**
    dump sequencer state

    owns the wiring and the tick counter everything derives from: the address
    is `counter / 4` and the phase `counter % 4`. the counter only moves when
    a tick fully ran, so a tick refused by the relay runs again verbatim on
    the next call. address widths past 29 would wrap the counter.
*/
pub struct Dumper<const ADDRESS: usize, const DATA: usize> {
    pinout: Pinout<ADDRESS, DATA>,
    counter: u32,
    byte: u8,
}

impl<const ADDRESS: usize, const DATA: usize> Dumper<ADDRESS, DATA> {
    pub const fn new(pinout: Pinout<ADDRESS, DATA>) -> Self {
        Self {pinout, counter: 0, byte: 0}
    }

    /// ticks completed since the dump started
    pub fn counter(&self) -> u32 {self.counter}
    /// address currently dumped
    pub fn address(&self) -> u32 {self.counter / PHASES}
    /// step of the current address
    pub fn phase(&self) -> Phase {Phase::from(u2::new((self.counter % PHASES) as u8))}
    /// whether every address has been dumped
    pub fn done(&self) -> bool {self.address() == self.pinout.address.range()}

    /**
        configure the wiring and select the device

        to be called once, before the timer is armed and with the counter
        still at 0. chip enable stays asserted for the whole dump.
    */
    pub fn bring_up(&self, port: &mut impl Port) {
        debug!("bring up, {} addresses to dump", self.pinout.address.range());
        self.pinout.configure(port);
        self.pinout.control.chip_enable.assert(port);
    }

    /**
        run one phase of the dump

        meant to be called from a periodic timer, at the rate of one serial
        character time per tick. at most one byte goes to the relay per call.
        when the relay refuses it the tick is abandoned without advancing and
        the same phase runs again on the next call, once every address has
        been dumped calls do nothing forever.
    */
    pub fn tick(&mut self, port: &mut impl Port, relay: &mut impl Relay) {
        let address = self.address();
        if address == self.pinout.address.range()
            {return}

        match self.phase() {
            Phase::Address => {
                self.pinout.address.write(port, address);
                if address % ROW == 0 && !relay.try_send(LINE_FEED)
                    {return}
                // the device drives the data bus from here until the sample
                self.pinout.control.output_enable.assert(port);
            }
            Phase::High => {
                self.byte = self.pinout.data.read(port) as u8;
                self.pinout.control.output_enable.deassert(port);
                if !relay.try_send(xdigit(self.byte >> 4))
                    {return}
            }
            Phase::Low => {
                if !relay.try_send(xdigit(self.byte))
                    {return}
            }
            Phase::Separator => {
                if !relay.try_send(if address % ROW == ROW - 1 {RETURN} else {SPACE})
                    {return}
            }
        }
        self.counter += 1;
    }
}
