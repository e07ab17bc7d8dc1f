#![allow(dead_code)]

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering::SeqCst;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use gpib_proto::{Clock, Line, LineInterface, LineState};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A change of the wired level of a line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Edge {
    pub line: Line,
    pub asserted: bool,
    pub at_ms: u64,
}

#[derive(Default)]
struct BusState {
    /// Lines pulled low by each port.
    drivers: Vec<u16>,
    edges: Vec<Edge>,
}

impl BusState {
    fn wired(&self) -> u16 {
        self.drivers.iter().fold(0, |acc, d| acc | d)
    }
}

/// Open-collector bus model: a line is asserted while any port pulls it low.
#[derive(Default)]
pub struct SimBus {
    state: Mutex<BusState>,
    now: Arc<AtomicU64>,
}

impl SimBus {
    pub fn new() -> Arc<SimBus> {
        Default::default()
    }

    /// Bus whose edge timestamps come from `clock`.
    pub fn with_clock(clock: &ManualClock) -> Arc<SimBus> {
        Arc::new(SimBus {
            state: Default::default(),
            now: Arc::clone(&clock.now),
        })
    }

    pub fn new_port(self: &Arc<Self>) -> SimPort {
        let mut state = self.state.lock().unwrap();
        state.drivers.push(0);
        SimPort {
            bus: Arc::clone(self),
            id: state.drivers.len() - 1,
        }
    }

    /// Lines currently asserted by anyone.
    pub fn asserted(&self) -> u16 {
        self.state.lock().unwrap().wired()
    }

    pub fn is_asserted(&self, line: Line) -> bool {
        self.asserted() & line.mask() != 0
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.state.lock().unwrap().edges.clone()
    }

    pub fn edges_of(&self, line: Line) -> Vec<Edge> {
        self.edges().into_iter().filter(|e| e.line == line).collect()
    }

    pub fn clear_edges(&self) {
        self.state.lock().unwrap().edges.clear();
    }

    fn drive(&self, id: usize, line: Line, asserted: bool) {
        let mut state = self.state.lock().unwrap();
        let before = state.wired();
        if asserted {
            state.drivers[id] |= line.mask();
        } else {
            state.drivers[id] &= !line.mask();
        }
        let after = state.wired();
        if (before ^ after) & line.mask() != 0 {
            let at_ms = self.now.load(SeqCst);
            state.edges.push(Edge {
                line,
                asserted,
                at_ms,
            });
        }
    }
}

/// One participant's connection to a [`SimBus`].
pub struct SimPort {
    bus: Arc<SimBus>,
    id: usize,
}

impl SimPort {
    /// Lines this port itself pulls low.
    pub fn driven(&self) -> u16 {
        self.bus.state.lock().unwrap().drivers[self.id]
    }

    pub fn assert_lines(&mut self, lines: &[Line]) {
        for line in lines {
            self.assert(*line);
        }
    }

    /// Poll `line` until it reaches `state`, giving up after `limit`.
    pub fn wait(&mut self, line: Line, state: LineState, limit: Duration) -> bool {
        let start = Instant::now();
        while self.read(line) != state {
            if start.elapsed() > limit {
                return false;
            }
            thread::yield_now();
        }
        true
    }
}

impl LineInterface for SimPort {
    fn assert(&mut self, line: Line) {
        self.bus.drive(self.id, line, true);
    }

    fn deassert(&mut self, line: Line) {
        self.bus.drive(self.id, line, false);
    }

    fn read(&mut self, line: Line) -> LineState {
        LineState::from(self.bus.is_asserted(line))
    }
}

/// Deterministic clock: every yield moves time forward by one millisecond,
/// every delay by its length.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
    pub delays: Arc<Mutex<Vec<u32>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(SeqCst)
    }

    fn yield_now(&mut self) {
        self.now.fetch_add(1, SeqCst);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.lock().unwrap().push(ms);
        self.now.fetch_add(ms.into(), SeqCst);
    }
}

/// What a scripted peer saw while a byte was valid.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Observed {
    pub byte: u8,
    pub atn: bool,
    pub eoi: bool,
}

const PEER_LIMIT: Duration = Duration::from_secs(5);

fn sample_data(port: &mut SimPort) -> u8 {
    Line::DATA
        .iter()
        .enumerate()
        .filter(|(_, line)| port.is_asserted(**line))
        .fold(0, |b, (bit, _)| b | (1u8 << bit))
}

/// Listener that accepts `count` bytes with the acceptor handshake, or stops
/// early if the source goes quiet.
pub fn accept_bytes(mut port: SimPort, count: usize) -> Vec<Observed> {
    let mut seen = Vec::new();
    port.assert(Line::Ndac);
    port.assert(Line::Nrfd);
    for _ in 0..count {
        port.deassert(Line::Nrfd);
        if !port.wait(Line::Dav, LineState::Asserted, PEER_LIMIT) {
            break;
        }
        port.assert(Line::Nrfd);
        seen.push(Observed {
            byte: sample_data(&mut port),
            atn: port.is_asserted(Line::Atn),
            eoi: port.is_asserted(Line::Eoi),
        });
        port.deassert(Line::Ndac);
        if !port.wait(Line::Dav, LineState::Deasserted, PEER_LIMIT) {
            break;
        }
        port.assert(Line::Ndac);
    }
    port.deassert(Line::Ndac);
    port.deassert(Line::Nrfd);
    seen
}

/// Talker that sends `bytes` with the source handshake, EOI on the last one
/// if `eoi` is set. Returns how many bytes were accepted.
pub fn source_bytes(mut port: SimPort, bytes: &[u8], eoi: bool) -> usize {
    for (i, byte) in bytes.iter().enumerate() {
        if !port.wait(Line::Ndac, LineState::Asserted, PEER_LIMIT)
            || !port.wait(Line::Nrfd, LineState::Deasserted, PEER_LIMIT)
        {
            return i;
        }
        for (bit, line) in Line::DATA.iter().enumerate() {
            port.set(*line, byte & (1u8 << bit) != 0);
        }
        port.set(Line::Eoi, eoi && i + 1 == bytes.len());
        port.assert(Line::Dav);
        let accepted = port.wait(Line::Ndac, LineState::Deasserted, PEER_LIMIT);
        port.deassert(Line::Dav);
        port.deassert(Line::Eoi);
        for line in Line::DATA.iter() {
            port.deassert(*line);
        }
        if !accepted {
            return i;
        }
    }
    bytes.len()
}
