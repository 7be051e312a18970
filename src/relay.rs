/*!
    non blocking, one byte at a time delivery to the host
*/

use embedded_io::{Read, Write, WriteReady};
use log::*;


/// byte the host sends to start the dump
pub const START: u8 = 0x0d;

/**
    outgoing side of the serial link, fed by a sequencer

    the sequencer produces at most one byte per tick and owns no buffer, so
    delivery is a single slot: either the transport takes the byte now, or the
    caller keeps it and offers it again on a later tick. a refusal is
    backpressure, not an error.
*/
pub trait Relay {
    /// offer one byte, true when the transport accepted it
    fn try_send(&mut self, byte: u8) -> bool;
}

/// relay over any byte transport exposing transmit readiness
pub struct Serial<B> {
    bus: B,
}
impl<B> Serial<B> {
    pub fn new(bus: B) -> Self {
        Self {bus}
    }
    /// give back the wrapped transport
    pub fn release(self) -> B {self.bus}
}
impl<B: Write + WriteReady> Relay for Serial<B> {
    fn try_send(&mut self, byte: u8) -> bool {
        // ready means the holding register has room, the write cannot block
        match self.bus.write_ready() {
            Ok(true) => matches!(self.bus.write(&[byte]), Ok(n) if n > 0),
            _ => false,
        }
    }
}

/**
    block until the host sends [START], discarding anything else

    this is the only place the receiving direction is used at all, and the
    only blocking call in the crate. it runs in the bring up flow, before any
    timer is armed, where blocking indefinitely is acceptable.
*/
pub fn wait_start<B: Read>(bus: &mut B) -> Result<(), B::Error> {
    debug!("waiting for start byte");
    let mut byte = [0];
    loop {
        if bus.read(&mut byte)? == 0
            {continue}
        if byte[0] == START
            {return Ok(())}
        debug!("ignoring byte {:#04x}", byte[0]);
    }
}
