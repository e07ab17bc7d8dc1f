//! Three-wire DAV/NRFD/NDAC handshake for a single byte.

use log::trace;

use crate::clock::Clock;
use crate::controller::Gpib;
use crate::data;
use crate::handshake::{wait_until_asserted, wait_until_deasserted};
use crate::line::{Line, LineInterface};
use crate::types::{Received, Timeout, TransferKind};
use crate::Error;

impl<IO, C> Gpib<IO, C>
where
    IO: LineInterface,
    C: Clock,
{
    /// Send one byte as the source of the handshake.
    ///
    /// With `kind == TransferKind::Command` the byte is sent with ATN
    /// asserted and `eoi` is ignored. Each of the three handshake waits gets
    /// the full `timeout`.
    ///
    /// # Errors
    /// Returns [`Error::Timeout`] if no listener becomes ready, or the
    /// listener doesn't accept the byte, in time. The lines are returned to
    /// the idle configuration in either case.
    #[doc(alias = "transfer_byte")]
    pub fn send_byte(
        &mut self,
        byte: u8,
        kind: TransferKind,
        eoi: bool,
        timeout: Timeout,
    ) -> Result<(), Error> {
        let command = kind == TransferKind::Command;
        let eoi = eoi && !command;
        self.io.set(Line::Atn, command);
        for line in [Line::Eoi, Line::Dav, Line::Nrfd, Line::Ndac].iter() {
            self.io.deassert(*line);
        }

        let res = self.source_handshake(byte, eoi, timeout);

        self.io.deassert(Line::Dav);
        self.io.assert(Line::Ndac);
        self.io.assert(Line::Nrfd);
        data::clear(&mut self.io);
        if command {
            self.io.deassert(Line::Atn);
        } else if eoi {
            self.io.deassert(Line::Eoi);
        }

        if res.is_ok() {
            trace!("Sent {:#04x} ({:?}, eoi: {})", byte, kind, eoi);
        }
        res
    }

    fn source_handshake(&mut self, byte: u8, eoi: bool, timeout: Timeout) -> Result<(), Error> {
        // A listener holds NDAC until it has taken the byte, and releases
        // NRFD once it's ready for the next one.
        wait_until_asserted(&mut self.io, &mut self.clock, Line::Ndac, timeout)?;
        wait_until_deasserted(&mut self.io, &mut self.clock, Line::Nrfd, timeout)?;

        data::write_byte(&mut self.io, byte);
        if eoi {
            self.io.assert(Line::Eoi);
        }
        self.io.assert(Line::Dav);

        wait_until_deasserted(&mut self.io, &mut self.clock, Line::Ndac, timeout)
    }

    /// Accept one byte as the acceptor of the handshake.
    ///
    /// Only the wait for DAV is bounded by `timeout`. Once the byte has been
    /// accepted, this blocks until the source releases DAV, however long that
    /// takes: a source stuck with DAV asserted has hung the bus, and only
    /// [`reset_bus`](Self::reset_bus) can recover from that.
    ///
    /// # Errors
    /// Returns [`Error::Timeout`] if no source puts a byte on the bus in time.
    #[doc(alias = "transfer_byte")]
    pub fn receive_byte(&mut self, timeout: Timeout) -> Result<Received, Error> {
        self.io.assert(Line::Ndac);
        self.io.deassert(Line::Nrfd);

        let res = self.acceptor_handshake(timeout);

        self.io.assert(Line::Ndac);

        if let Ok(received) = &res {
            trace!(
                "Received {:#04x} ({:?}, eoi: {})",
                received.byte,
                received.kind,
                received.eoi
            );
        }
        res
    }

    fn acceptor_handshake(&mut self, timeout: Timeout) -> Result<Received, Error> {
        wait_until_asserted(&mut self.io, &mut self.clock, Line::Dav, timeout)?;

        self.io.assert(Line::Nrfd);
        let byte = data::read_byte(&mut self.io);
        let eoi = self.io.is_asserted(Line::Eoi);
        let kind = if self.io.is_asserted(Line::Atn) {
            TransferKind::Command
        } else {
            TransferKind::Data
        };
        self.io.deassert(Line::Ndac);

        wait_until_deasserted(&mut self.io, &mut self.clock, Line::Dav, Timeout::Forever)?;
        Ok(Received { byte, eoi, kind })
    }

    /// Send a command byte with ATN asserted.
    ///
    /// # Errors
    /// Returns [`Error::Timeout`] on a handshake timeout, see [`send_byte`](Self::send_byte).
    pub fn send_command(&mut self, cmd: impl Into<u8>, timeout: Timeout) -> Result<(), Error> {
        self.send_byte(cmd.into(), TransferKind::Command, false, timeout)
    }
}
