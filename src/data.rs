//! Parallel byte transport on DIO1..DIO8.
//!
//! GPIB data lines use negative logic: a 1 bit is carried by asserting
//! (pulling low) the corresponding line. No handshake happens here.

use crate::line::{Line, LineInterface};

/// Release all eight data lines.
pub fn clear<IO: LineInterface + ?Sized>(io: &mut IO) {
    for line in Line::DATA.iter() {
        io.deassert(*line);
    }
}

/// Put `byte` on the data lines, bit `i` on DIO(`i`+1).
pub fn write_byte<IO: LineInterface + ?Sized>(io: &mut IO, byte: u8) {
    for (bit, line) in Line::DATA.iter().enumerate() {
        io.set(*line, byte & (1u8 << bit) != 0);
    }
}

/// Release our own data lines, then sample the byte another participant drives.
pub fn read_byte<IO: LineInterface + ?Sized>(io: &mut IO) -> u8 {
    clear(io);
    Line::DATA
        .iter()
        .enumerate()
        .filter(|(_, line)| io.is_asserted(**line))
        .fold(0, |byte, (bit, _)| byte | (1u8 << bit))
}
