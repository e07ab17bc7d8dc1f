//! Bit-level implementation of the IEEE-488 (GPIB) bus handshake, for a
//! controller that talks to a single device at a time.
//!
//! The crate is layered from the wires up:
//! - [`line`]: assert/deassert/read of the open-collector lines, behind the
//!   [`LineInterface`] trait,
//! - [`handshake`]: polling waits with timeout and cooperative yield,
//! - [`data`]: parallel byte transport on DIO1..DIO8,
//! - [`Gpib`]: the three-wire DAV/NRFD/NDAC byte handshake, TALK/LISTEN
//!   transactions and IFC bus reset.
//!
//! ## Example
//!
//! ```
//! # #[cfg(feature = "std")]
//! # mod example {
//! use gpib_proto::{addr, Error, Gpib, LineInterface, StdClock, TransferKind};
//!
//! /// Send a plotter program to the device at address 5.
//! fn plot<IO: LineInterface>(adapter: IO, program: &[u8]) -> Result<(), Error> {
//!     let mut bus = Gpib::new(adapter, StdClock::new());
//!     let timeout = bus.timeout();
//!     bus.reset_bus();
//!
//!     bus.begin_transaction(addr(0), addr(5), timeout)?;
//!     for (i, byte) in program.iter().enumerate() {
//!         let last = i + 1 == program.len();
//!         bus.send_byte(*byte, TransferKind::Data, last, timeout)?;
//!     }
//!     bus.end_transaction(timeout)
//! }
//! # }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

use snafu::Snafu;

pub mod clock;
pub mod command;
mod config;
mod controller;
pub mod data;
mod engine;
#[cfg(feature = "hal")]
pub mod hal;
pub mod handshake;
pub mod line;
pub mod nom_parser;
mod transaction;
pub mod types;

pub use crate::clock::Clock;
#[cfg(feature = "std")]
pub use crate::clock::StdClock;
pub use crate::command::Command;
pub use crate::config::Config;
pub use crate::controller::Gpib;
pub use crate::line::{Line, LineInterface, LineState};
pub use crate::types::{addr, Address, Received, Timeout, TransferKind};

/// Error type for bus operations.
///
/// A handshake timeout is the only failure the protocol reports. The bus
/// lines are back in their idle configuration when it is returned, so the
/// caller may retry the operation or call [`Gpib::reset_bus`].
#[derive(Debug, Snafu, PartialEq, Eq, Copy, Clone)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// A peer did not move a handshake line within the allotted time.
    #[snafu(display(
        "Handshake timeout: {} not {} within {} ms",
        line,
        expected,
        timeout_ms
    ))]
    Timeout {
        line: Line,
        expected: LineState,
        timeout_ms: u32,
    },
}
