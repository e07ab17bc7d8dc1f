//! Electrical primitives for the open-collector IEEE-488 bus.
//!
//! Every signal on the bus is wired-OR: any participant may pull a line low
//! (assert it), and the line only reads high (deasserted) when every
//! participant has released it. [`LineInterface`] is the only way the rest of
//! the crate touches the bus, so a simulated bus can stand in for real pins.

use core::fmt;

/// One signal line of the bus.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Copy, Clone, Hash)]
#[repr(u8)]
pub enum Line {
    Dio1 = 0,
    Dio2,
    Dio3,
    Dio4,
    Dio5,
    Dio6,
    Dio7,
    Dio8,
    /// End or identify.
    Eoi,
    /// Data valid.
    Dav,
    /// Not ready for data.
    Nrfd,
    /// Not data accepted.
    Ndac,
    /// Interface clear.
    Ifc,
    /// Service request.
    Srq,
    /// Attention.
    Atn,
    /// Remote enable.
    Ren,
}

impl Line {
    /// The data lines, `DATA[i]` carries bit `i` of a byte.
    pub const DATA: [Line; 8] = [
        Line::Dio1,
        Line::Dio2,
        Line::Dio3,
        Line::Dio4,
        Line::Dio5,
        Line::Dio6,
        Line::Dio7,
        Line::Dio8,
    ];

    /// Handshake and management lines.
    pub const CONTROL: [Line; 8] = [
        Line::Eoi,
        Line::Dav,
        Line::Nrfd,
        Line::Ndac,
        Line::Ifc,
        Line::Srq,
        Line::Atn,
        Line::Ren,
    ];

    /// Number of distinct lines.
    pub const COUNT: usize = 16;

    /// Index of the line in `0..Line::COUNT`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit mask of the line, for implementations that pack line state into a word.
    pub const fn mask(self) -> u16 {
        1 << (self as u16)
    }

    /// Pin number on the 24-pin IEEE-488 connector.
    pub const fn connector_pin(self) -> u8 {
        match self {
            Line::Dio1 => 1,
            Line::Dio2 => 2,
            Line::Dio3 => 3,
            Line::Dio4 => 4,
            Line::Eoi => 5,
            Line::Dav => 6,
            Line::Nrfd => 7,
            Line::Ndac => 8,
            Line::Ifc => 9,
            Line::Srq => 10,
            Line::Atn => 11,
            Line::Dio5 => 13,
            Line::Dio6 => 14,
            Line::Dio7 => 15,
            Line::Dio8 => 16,
            Line::Ren => 17,
        }
    }

    /// Iterate over all lines, data lines first.
    pub fn all() -> impl Iterator<Item = Line> {
        ALL_LINES.iter().copied()
    }

    const fn name(self) -> &'static str {
        match self {
            Line::Dio1 => "DIO1",
            Line::Dio2 => "DIO2",
            Line::Dio3 => "DIO3",
            Line::Dio4 => "DIO4",
            Line::Dio5 => "DIO5",
            Line::Dio6 => "DIO6",
            Line::Dio7 => "DIO7",
            Line::Dio8 => "DIO8",
            Line::Eoi => "EOI",
            Line::Dav => "DAV",
            Line::Nrfd => "NRFD",
            Line::Ndac => "NDAC",
            Line::Ifc => "IFC",
            Line::Srq => "SRQ",
            Line::Atn => "ATN",
            Line::Ren => "REN",
        }
    }
}

static ALL_LINES: [Line; Line::COUNT] = [
    Line::Dio1,
    Line::Dio2,
    Line::Dio3,
    Line::Dio4,
    Line::Dio5,
    Line::Dio6,
    Line::Dio7,
    Line::Dio8,
    Line::Eoi,
    Line::Dav,
    Line::Nrfd,
    Line::Ndac,
    Line::Ifc,
    Line::Srq,
    Line::Atn,
    Line::Ren,
];

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pin {})", self.name(), self.connector_pin())
    }
}

/// Logical state of a line.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Hash)]
pub enum LineState {
    /// Actively pulled low by at least one participant.
    Asserted,
    /// Released by every participant, held high by the pull-up.
    Deasserted,
}

impl LineState {
    pub const fn is_asserted(self) -> bool {
        matches!(self, LineState::Asserted)
    }
}

impl From<bool> for LineState {
    /// `true` maps to `Asserted`.
    fn from(asserted: bool) -> Self {
        if asserted {
            LineState::Asserted
        } else {
            LineState::Deasserted
        }
    }
}

impl fmt::Display for LineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineState::Asserted => write!(f, "asserted"),
            LineState::Deasserted => write!(f, "deasserted"),
        }
    }
}

/// Access to the physical (or simulated) bus lines.
///
/// Implementations must never drive a line high: `deassert` releases the
/// line to a pull-up terminated input so other participants can pull it low.
pub trait LineInterface {
    /// Pull `line` low.
    fn assert(&mut self, line: Line);

    /// Release `line` so that it floats high unless someone else holds it low.
    fn deassert(&mut self, line: Line);

    /// Sample the wired state of `line`.
    fn read(&mut self, line: Line) -> LineState;

    /// Whether `line` is wired at all. SRQ and REN are optional on many adapters.
    fn supports(&self, _line: Line) -> bool {
        true
    }

    fn is_asserted(&mut self, line: Line) -> bool {
        self.read(line).is_asserted()
    }

    fn is_deasserted(&mut self, line: Line) -> bool {
        !self.is_asserted(line)
    }

    /// Drive `line` asserted if `asserted`, release it otherwise.
    fn set(&mut self, line: Line, asserted: bool) {
        if asserted {
            self.assert(line);
        } else {
            self.deassert(line);
        }
    }
}

impl<T: LineInterface + ?Sized> LineInterface for &mut T {
    fn assert(&mut self, line: Line) {
        (**self).assert(line)
    }

    fn deassert(&mut self, line: Line) {
        (**self).deassert(line)
    }

    fn read(&mut self, line: Line) -> LineState {
        (**self).read(line)
    }

    fn supports(&self, line: Line) -> bool {
        (**self).supports(line)
    }
}
