use log::debug;

use crate::clock::Clock;
use crate::config::Config;
use crate::data;
use crate::line::{Line, LineInterface};
use crate::types::Timeout;

/// Handle to a GPIB bus, owning the line interface and the clock.
///
/// Every bus operation takes `&mut self`, so only one transfer can be in
/// flight per handle. Share a handle between tasks by putting it behind a
/// lock held for a whole transaction, otherwise commands and data from
/// different callers will interleave on the bus.
#[derive(Debug)]
pub struct Gpib<IO, C> {
    pub(crate) io: IO,
    pub(crate) clock: C,
    config: Config,
}

impl<IO, C> Gpib<IO, C>
where
    IO: LineInterface,
    C: Clock,
{
    /// Create a handle with the default [`Config`]. The bus is not touched.
    pub fn new(io: IO, clock: C) -> Self {
        Self::with_config(io, clock, Config::default())
    }

    pub fn with_config(io: IO, clock: C, config: Config) -> Self {
        Self { io, clock, config }
    }

    /// The configured default handshake timeout.
    pub fn timeout(&self) -> Timeout {
        self.config.timeout
    }

    /// Access the line interface, e.g. to sample SRQ.
    pub fn io(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Give back the line interface and clock.
    pub fn into_parts(self) -> (IO, C) {
        (self.io, self.clock)
    }

    /// Reset the bus: release every line, then pulse IFC.
    ///
    /// IFC is held for `Config::ifc_settle_ms`. Call this at startup and
    /// after a handshake timeout the caller can't otherwise recover from.
    pub fn reset_bus(&mut self) {
        debug!("Bus reset, IFC for {} ms", self.config.ifc_settle_ms);
        data::clear(&mut self.io);
        for line in Line::CONTROL.iter() {
            if self.io.supports(*line) {
                self.io.deassert(*line);
            }
        }

        self.io.assert(Line::Ifc);
        self.clock.delay_ms(self.config.ifc_settle_ms);
        self.io.deassert(Line::Ifc);
    }
}
