//! Polling waits used to follow a peer's handshake line transitions.
//!
//! These are the only places where the protocol suspends: each poll that
//! doesn't see the awaited state hands control to [`Clock::yield_now`].

use log::debug;

use crate::clock::Clock;
use crate::line::{Line, LineInterface, LineState};
use crate::types::Timeout;
use crate::{Error, TimeoutSnafu};

/// Release `line` locally, then wait until some other participant asserts it.
///
/// # Errors
/// Returns [`Error::Timeout`] if `timeout` ms pass without the line being asserted.
pub fn wait_until_asserted<IO, C>(
    io: &mut IO,
    clock: &mut C,
    line: Line,
    timeout: Timeout,
) -> Result<(), Error>
where
    IO: LineInterface + ?Sized,
    C: Clock + ?Sized,
{
    wait_for(io, clock, line, LineState::Asserted, timeout)
}

/// Release `line` locally, then wait until every participant has released it.
///
/// # Errors
/// Returns [`Error::Timeout`] if `timeout` ms pass with the line still asserted.
pub fn wait_until_deasserted<IO, C>(
    io: &mut IO,
    clock: &mut C,
    line: Line,
    timeout: Timeout,
) -> Result<(), Error>
where
    IO: LineInterface + ?Sized,
    C: Clock + ?Sized,
{
    wait_for(io, clock, line, LineState::Deasserted, timeout)
}

fn wait_for<IO, C>(
    io: &mut IO,
    clock: &mut C,
    line: Line,
    expected: LineState,
    timeout: Timeout,
) -> Result<(), Error>
where
    IO: LineInterface + ?Sized,
    C: Clock + ?Sized,
{
    let start = clock.now_ms();
    io.deassert(line);
    while io.read(line) != expected {
        let elapsed = clock.now_ms().saturating_sub(start);
        if timeout.expired(elapsed) {
            debug!("Gave up after {} ms waiting for {} {}", elapsed, line, expected);
            let timeout_ms = match timeout {
                Timeout::Millis(ms) => ms,
                Timeout::Forever => u32::MAX,
            };
            return TimeoutSnafu {
                line,
                expected,
                timeout_ms,
            }
            .fail();
        }
        clock.yield_now();
    }
    Ok(())
}
