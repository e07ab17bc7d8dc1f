//! IEEE-488.1 interface messages sent with ATN asserted.
//!
//! Command codes are fixed by the standard and only use the low seven bits.

use crate::types::{self, Address};

/// Talk address group base, OR'ed with the device address.
pub const TAD: u8 = 0x40;
/// Listen address group base, OR'ed with the device address.
pub const LAD: u8 = 0x20;
/// Secondary address group base.
pub const SAD: u8 = 0x60;

/// Unlisten.
pub const UNL: u8 = 0x3f;
/// Untalk.
pub const UNT: u8 = 0x5f;
/// Local lockout.
pub const LLO: u8 = 0x11;
/// Device clear.
pub const DCL: u8 = 0x14;
/// Parallel poll unconfigure.
pub const PPU: u8 = 0x15;
/// Serial poll enable.
pub const SPE: u8 = 0x18;
/// Serial poll disable.
pub const SPD: u8 = 0x19;

/// Go to local.
pub const GTL: u8 = 0x01;
/// Selected device clear.
pub const SDC: u8 = 0x04;
/// Parallel poll configure.
pub const PPC: u8 = 0x05;
/// Group execute trigger.
pub const GET: u8 = 0x08;
/// Take control.
pub const TCT: u8 = 0x09;

/// A command byte, in typed form.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum Command {
    /// Make the device at the address the talker.
    Talk(Address),
    /// Make the device at the address a listener.
    Listen(Address),
    /// Secondary address, follows a talk or listen address. Range \[0, 31\].
    Secondary(u8),
    Untalk,
    Unlisten,
    LocalLockout,
    DeviceClear,
    ParallelPollUnconfigure,
    SerialPollEnable,
    SerialPollDisable,
    GoToLocal,
    SelectedDeviceClear,
    ParallelPollConfigure,
    GroupExecuteTrigger,
    TakeControl,
}

impl Command {
    /// Create a `Secondary` command, checking the range.
    /// # Errors
    /// Returns [`types::Error::InvalidSecondary`] if `sa` is above 31.
    pub fn secondary(sa: u8) -> Result<Self, types::Error> {
        Ok(Command::Secondary(types::secondary(sa)?))
    }

    /// The byte put on DIO1..DIO8.
    pub fn to_byte(self) -> u8 {
        match self {
            Command::Talk(a) => TAD | *a,
            Command::Listen(a) => LAD | *a,
            Command::Secondary(sa) => SAD | (sa & 0x1f),
            Command::Untalk => UNT,
            Command::Unlisten => UNL,
            Command::LocalLockout => LLO,
            Command::DeviceClear => DCL,
            Command::ParallelPollUnconfigure => PPU,
            Command::SerialPollEnable => SPE,
            Command::SerialPollDisable => SPD,
            Command::GoToLocal => GTL,
            Command::SelectedDeviceClear => SDC,
            Command::ParallelPollConfigure => PPC,
            Command::GroupExecuteTrigger => GET,
            Command::TakeControl => TCT,
        }
    }

    /// True for commands every device on the bus obeys, addressed or not.
    pub fn is_universal(self) -> bool {
        matches!(
            self,
            Command::Untalk
                | Command::Unlisten
                | Command::LocalLockout
                | Command::DeviceClear
                | Command::ParallelPollUnconfigure
                | Command::SerialPollEnable
                | Command::SerialPollDisable
        )
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> Self {
        cmd.to_byte()
    }
}
