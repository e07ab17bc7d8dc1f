use crate::types::Timeout;

/// Bus timing settings for a [`Gpib`](crate::Gpib) handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default handshake timeout handed out by [`Gpib::timeout`](crate::Gpib::timeout).
    ///
    /// Slow instruments (pen plotters drawing labels, for instance) may hold
    /// NRFD for many seconds, so this is long.
    pub timeout: Timeout,
    /// How long IFC is held asserted by [`Gpib::reset_bus`](crate::Gpib::reset_bus).
    pub ifc_settle_ms: u32,
}

impl Config {
    pub const DEFAULT_TIMEOUT: Timeout = Timeout::Millis(30_000);
    pub const DEFAULT_IFC_SETTLE_MS: u32 = 100;

    pub const fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            ifc_settle_ms: Self::DEFAULT_IFC_SETTLE_MS,
        }
    }

    pub const fn with_timeout(mut self, timeout: Timeout) -> Self {
        self.timeout = timeout;
        self
    }

    pub const fn with_ifc_settle_ms(mut self, ms: u32) -> Self {
        self.ifc_settle_ms = ms;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
