//! [`LineInterface`] over `embedded-hal` GPIO pins.
//!
//! The pins must be configured as open-drain outputs with the input buffer
//! enabled (and a pull-up, unless the bus transceivers provide one), so that
//! `set_high` releases the line and `is_low` reads the wired state.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::line::{Line, LineInterface, LineState};

/// The pins wired to the IEEE-488 connector.
#[derive(Debug)]
pub struct BusPins<P> {
    /// DIO1..DIO8, in bit order.
    pub data: [P; 8],
    pub eoi: P,
    pub dav: P,
    pub nrfd: P,
    pub ndac: P,
    pub ifc: P,
    pub atn: P,
    pub srq: Option<P>,
    pub ren: Option<P>,
}

/// GPIO backed bus interface.
#[derive(Debug)]
pub struct PinBus<P> {
    pins: BusPins<P>,
}

impl<P> PinBus<P>
where
    P: InputPin + OutputPin + ErrorType<Error = Infallible>,
{
    /// Take ownership of the pins and release every line.
    pub fn new(pins: BusPins<P>) -> Self {
        let mut bus = Self { pins };
        for line in Line::all() {
            if bus.supports(line) {
                bus.deassert(line);
            }
        }
        bus
    }

    pub fn into_pins(self) -> BusPins<P> {
        self.pins
    }

    fn pin(&mut self, line: Line) -> Option<&mut P> {
        let pins = &mut self.pins;
        match line {
            Line::Dio1
            | Line::Dio2
            | Line::Dio3
            | Line::Dio4
            | Line::Dio5
            | Line::Dio6
            | Line::Dio7
            | Line::Dio8 => Some(&mut pins.data[line.index()]),
            Line::Eoi => Some(&mut pins.eoi),
            Line::Dav => Some(&mut pins.dav),
            Line::Nrfd => Some(&mut pins.nrfd),
            Line::Ndac => Some(&mut pins.ndac),
            Line::Ifc => Some(&mut pins.ifc),
            Line::Atn => Some(&mut pins.atn),
            Line::Srq => pins.srq.as_mut(),
            Line::Ren => pins.ren.as_mut(),
        }
    }
}

fn infallible<T>(res: Result<T, Infallible>) -> T {
    match res {
        Ok(v) => v,
        Err(never) => match never {},
    }
}

impl<P> LineInterface for PinBus<P>
where
    P: InputPin + OutputPin + ErrorType<Error = Infallible>,
{
    fn assert(&mut self, line: Line) {
        if let Some(pin) = self.pin(line) {
            infallible(pin.set_low());
        }
    }

    fn deassert(&mut self, line: Line) {
        if let Some(pin) = self.pin(line) {
            infallible(pin.set_high());
        }
    }

    /// Lines that aren't wired read as released.
    fn read(&mut self, line: Line) -> LineState {
        match self.pin(line) {
            Some(pin) => LineState::from(infallible(pin.is_low())),
            None => LineState::Deasserted,
        }
    }

    fn supports(&self, line: Line) -> bool {
        match line {
            Line::Srq => self.pins.srq.is_some(),
            Line::Ren => self.pins.ren.is_some(),
            _ => true,
        }
    }
}
