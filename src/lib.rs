#![no_std]

mod utils;

pub mod bus;
pub mod wiring;
pub mod relay;
pub mod dump;
pub mod scan;
pub mod sim;
