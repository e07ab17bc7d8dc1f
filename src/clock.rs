//! Time source and cooperative scheduling hooks used by the handshake waits.

/// Monotonic millisecond clock plus the scheduler hooks the protocol needs.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed point in the past.
    fn now_ms(&self) -> u64;

    /// Give other tasks a chance to run between two polls of a line.
    ///
    /// Without a scheduler this is a no-op and the wait becomes a busy loop.
    fn yield_now(&mut self) {}

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn yield_now(&mut self) {
        (**self).yield_now()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

#[cfg(feature = "std")]
pub use self::std_clock::StdClock;

#[cfg(feature = "std")]
mod std_clock {
    use super::Clock;
    use std::convert::TryFrom;
    use std::time::{Duration, Instant};

    /// [`Clock`] backed by `std::time::Instant` and OS thread scheduling.
    #[derive(Debug, Copy, Clone)]
    pub struct StdClock {
        epoch: Instant,
    }

    impl StdClock {
        pub fn new() -> Self {
            Self {
                epoch: Instant::now(),
            }
        }
    }

    impl Default for StdClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for StdClock {
        fn now_ms(&self) -> u64 {
            u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
        }

        fn yield_now(&mut self) {
            std::thread::yield_now();
        }

        fn delay_ms(&mut self, ms: u32) {
            std::thread::sleep(Duration::from_millis(ms.into()));
        }
    }

}
