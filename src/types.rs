//! This module defines range-checked types for GPIB addresses, timeouts
//! and transfer results, meant to simplify correct usage of the API.

use snafu::{ensure, OptionExt, Snafu};

use core::convert::{TryFrom, TryInto};
use core::ops::Deref;
use core::time::Duration;

/// Error type for this module
#[derive(Debug, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The value isn't a valid GPIB primary address.
    #[snafu(display("Invalid address"))]
    InvalidAddress,
    /// The value isn't a valid GPIB secondary address.
    #[snafu(display("Invalid secondary address"))]
    InvalidSecondary,
}

const fn invalid_address() -> InvalidAddressSnafu {
    InvalidAddressSnafu
}

const fn invalid_secondary() -> InvalidSecondarySnafu {
    InvalidSecondarySnafu
}

/// Highest usable primary address. 31 would collide with UNL/UNT.
pub(crate) const MAX_ADDRESS: u8 = 30;

/// Address is a range-checked [0, 30] integer, representing a primary device address.
///
/// ## Example
/// ```
/// use gpib_proto::{addr, Address};
/// let a = Address::new(5).unwrap();
/// assert_eq!(a, addr(5));
/// assert!(Address::new(31).is_err());
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
#[repr(transparent)]
pub struct Address(u8);

/// Create a new [`Address`], panics if it is out of range.
pub const fn addr(a: u8) -> Address {
    if a <= MAX_ADDRESS {
        return Address(a);
    }
    panic!("Invalid address.")
}

impl Address {
    /// Create a new address, checking that the address is in \[0, 30\].
    /// # Errors
    /// Returns [`Error::InvalidAddress`] if `address` is out of range.
    pub fn new(address: impl TryInto<u8>) -> Result<Self, Error> {
        let address = address.try_into().ok().with_context(invalid_address)?;
        ensure!(address <= MAX_ADDRESS, invalid_address());
        Ok(Self(address))
    }
}

impl Deref for Address {
    type Target = u8;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq<u8> for Address {
    fn eq(&self, other: &u8) -> bool {
        self.0 == *other
    }
}

/// Check a secondary address, valid range is \[0, 31\].
pub(crate) fn secondary(sa: u8) -> Result<u8, Error> {
    ensure!(sa <= 31, invalid_secondary());
    Ok(sa)
}


/// Handshake timeout: a bound in milliseconds, or block forever.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum Timeout {
    /// Give up after this many milliseconds.
    Millis(u32),
    /// Never give up.
    Forever,
}

impl Timeout {
    pub const fn from_millis(ms: u32) -> Self {
        Timeout::Millis(ms)
    }

    /// True once `elapsed_ms` has passed the bound.
    pub(crate) fn expired(self, elapsed_ms: u64) -> bool {
        match self {
            Timeout::Millis(ms) => elapsed_ms > u64::from(ms),
            Timeout::Forever => false,
        }
    }
}

impl From<u32> for Timeout {
    fn from(ms: u32) -> Self {
        Timeout::Millis(ms)
    }
}

impl From<Duration> for Timeout {
    /// Durations longer than `u32::MAX` ms are clamped.
    fn from(d: Duration) -> Self {
        Timeout::Millis(u32::try_from(d.as_millis()).unwrap_or(u32::MAX))
    }
}


/// Whether a byte travels as a command (ATN asserted) or as device data.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum TransferKind {
    Command,
    Data,
}

/// A byte accepted from the bus.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub struct Received {
    /// The byte on DIO1..DIO8.
    pub byte: u8,
    /// EOI was asserted, i.e. this is the last byte of a message.
    pub eoi: bool,
    /// ATN state while the byte was valid.
    pub kind: TransferKind,
}
