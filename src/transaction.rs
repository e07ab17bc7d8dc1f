//! TALK/LISTEN addressing around a sequence of data transfers.

use log::debug;

use crate::clock::Clock;
use crate::command::Command;
use crate::controller::Gpib;
use crate::line::LineInterface;
use crate::types::{Address, Timeout};
use crate::Error;

impl<IO, C> Gpib<IO, C>
where
    IO: LineInterface,
    C: Clock,
{
    /// Address `talk` as talker and `listen` as listener.
    ///
    /// Data bytes are then moved with [`send_byte`](Self::send_byte) (when
    /// we are the talker) or [`receive_byte`](Self::receive_byte) (when we
    /// are the listener), and the transaction is closed with
    /// [`end_transaction`](Self::end_transaction).
    ///
    /// # Errors
    /// Returns [`Error::Timeout`] from the first command that times out; the
    /// listen address isn't sent if the talk address failed.
    pub fn begin_transaction(
        &mut self,
        talk: Address,
        listen: Address,
        timeout: Timeout,
    ) -> Result<(), Error> {
        debug!("Talker {}, listener {}", *talk, *listen);
        self.send_commands(&[Command::Talk(talk), Command::Listen(listen)], timeout)
    }

    /// Send UNTALK and UNLISTEN.
    ///
    /// # Errors
    /// Returns [`Error::Timeout`] from the first command that times out.
    pub fn end_transaction(&mut self, timeout: Timeout) -> Result<(), Error> {
        self.send_commands(&[Command::Untalk, Command::Unlisten], timeout)
    }

    /// Send `commands` in order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns [`Error::Timeout`] from the first command that times out.
    pub fn send_commands(&mut self, commands: &[Command], timeout: Timeout) -> Result<(), Error> {
        commands
            .iter()
            .try_for_each(|cmd| self.send_command(*cmd, timeout))
    }
}
