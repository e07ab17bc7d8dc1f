//! Decoder for command bytes received with ATN asserted.
//!
//! Useful on the device side of a transfer, or for a bus monitor that
//! logs what the controller is doing.

use nom::branch::alt;
use nom::combinator::{map, map_res, value, verify};
use nom::number::streaming::u8 as any_byte;
use nom::Err::Incomplete;
use nom::IResult;

use crate::command::*;
use crate::types::Address;

type Buf = [u8];

/// Result of decoding one byte.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum CommandToken {
    Command(Command),
    /// A code with no assigned meaning.
    Unknown(u8),
    /// The buffer is empty.
    NeedData,
}

/// Decode the first command in `buf`.
///
/// Returns the number of bytes consumed together with the token, `(0, NeedData)`
/// when there is nothing to decode.
pub fn parse_command(buf: &Buf) -> (usize, CommandToken) {
    match command_token(buf) {
        Ok((remaining, token)) => (buf.len() - remaining.len(), token),
        Err(Incomplete(_)) => (0, CommandToken::NeedData),
        Err(_) => match buf.first() {
            Some(byte) => (1, CommandToken::Unknown(*byte)),
            None => (0, CommandToken::NeedData),
        },
    }
}

/// Decode every command in `buf`.
pub fn decode_commands(buf: &Buf) -> impl Iterator<Item = CommandToken> + '_ {
    let mut buf = buf;
    core::iter::from_fn(move || match parse_command(buf) {
        (0, _) => None,
        (consumed, token) => {
            buf = &buf[consumed..];
            Some(token)
        }
    })
}

fn command_token(buf: &Buf) -> IResult<&Buf, CommandToken> {
    alt((
        map(
            alt((
                universal,
                addressed,
                map(address_group(TAD), Command::Talk),
                map(address_group(LAD), Command::Listen),
                secondary,
            )),
            CommandToken::Command,
        ),
        map(any_byte, CommandToken::Unknown),
    ))(buf)
}

fn universal(buf: &Buf) -> IResult<&Buf, Command> {
    alt((
        value(Command::Unlisten, code(UNL)),
        value(Command::Untalk, code(UNT)),
        value(Command::LocalLockout, code(LLO)),
        value(Command::DeviceClear, code(DCL)),
        value(Command::ParallelPollUnconfigure, code(PPU)),
        value(Command::SerialPollEnable, code(SPE)),
        value(Command::SerialPollDisable, code(SPD)),
    ))(buf)
}

fn addressed(buf: &Buf) -> IResult<&Buf, Command> {
    alt((
        value(Command::GoToLocal, code(GTL)),
        value(Command::SelectedDeviceClear, code(SDC)),
        value(Command::ParallelPollConfigure, code(PPC)),
        value(Command::GroupExecuteTrigger, code(GET)),
        value(Command::TakeControl, code(TCT)),
    ))(buf)
}

fn secondary(buf: &Buf) -> IResult<&Buf, Command> {
    map(verify(seven_bit, |b: &u8| b & 0x60 == SAD), |b| {
        Command::Secondary(b & 0x1f)
    })(buf)
}

/// Talk or listen address group. Address 31 is UNT/UNL, which `universal` has
/// already matched, so it's rejected here.
fn address_group<'a>(base: u8) -> impl FnMut(&'a Buf) -> IResult<&'a Buf, Address> {
    map_res(verify(seven_bit, move |b: &u8| b & 0x60 == base), |b| {
        Address::new(b & 0x1f)
    })
}

fn code<'a>(expected: u8) -> impl FnMut(&'a Buf) -> IResult<&'a Buf, u8> {
    verify(seven_bit, move |b: &u8| *b == expected)
}

/// Bit 8 (DIO8) isn't part of the command code.
fn seven_bit(buf: &Buf) -> IResult<&Buf, u8> {
    map(any_byte, |b: u8| b & 0x7f)(buf)
}
