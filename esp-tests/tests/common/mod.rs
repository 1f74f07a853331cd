//! Mock-Peripherie für Host-Tests
//!
//! Alle Mocks teilen ihren Zustand über `Rc`, damit der Test ihn nach dem
//! Übergeben an `Device` weiter beobachten und steuern kann.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use esp_core::{
    ByteSink, ByteSource, Clock, Device, DeviceConfig, DeviceIdentity, OutputError, OutputPin,
    Period, Tick,
};
use serde_json::Value;

// ============================================================================
// Mock Clock
// ============================================================================

#[derive(Clone)]
pub struct MockClock {
    now: Rc<Cell<Tick>>,
    ticks_per_ms: u32,
}

impl MockClock {
    pub fn new(start: Tick, ticks_per_ms: u32) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
            ticks_per_ms,
        }
    }

    pub fn advance_ms(&self, ms: u32) {
        let ticks = ms.wrapping_mul(self.ticks_per_ms);
        self.now.set(self.now.get().wrapping_add(ticks));
    }
}

impl Clock for MockClock {
    fn now(&self) -> Tick {
        self.now.get()
    }

    fn ticks_per_ms(&self) -> u32 {
        self.ticks_per_ms
    }
}

// ============================================================================
// Mock Output Pin
// ============================================================================

#[derive(Default, Debug)]
pub struct PinState {
    pub on: bool,
    pub toggle_count: usize,
    pub set_count: usize,
    /// Simuliere Fehler beim nächsten Schreibzugriff
    pub fail_next_write: bool,
}

#[derive(Clone, Default)]
pub struct MockPin(Rc<RefCell<PinState>>);

impl MockPin {
    pub fn is_on(&self) -> bool {
        self.0.borrow().on
    }

    pub fn toggle_count(&self) -> usize {
        self.0.borrow().toggle_count
    }

    pub fn set_count(&self) -> usize {
        self.0.borrow().set_count
    }

    pub fn fail_next_write(&self) {
        self.0.borrow_mut().fail_next_write = true;
    }

    fn check_failure(&self) -> Result<(), OutputError> {
        let mut state = self.0.borrow_mut();
        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(OutputError::WriteFailed);
        }
        Ok(())
    }
}

impl OutputPin for MockPin {
    fn set(&mut self, on: bool) -> Result<(), OutputError> {
        self.check_failure()?;
        let mut state = self.0.borrow_mut();
        state.on = on;
        state.set_count += 1;
        Ok(())
    }

    fn toggle(&mut self) -> Result<(), OutputError> {
        self.check_failure()?;
        let mut state = self.0.borrow_mut();
        state.on = !state.on;
        state.toggle_count += 1;
        Ok(())
    }
}

// ============================================================================
// Mock Byte Sink / Source
// ============================================================================

#[derive(Clone, Default)]
pub struct MockSink(Rc<RefCell<Vec<u8>>>);

impl MockSink {
    /// Alle bisher gesendeten Frames als JSON
    pub fn frames(&self) -> Vec<Value> {
        let bytes = self.0.borrow();
        bytes
            .split(|b| *b == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_slice(line).expect("outbound frame is valid JSON"))
            .collect()
    }

    /// Nur Antworten (Frames ohne `method`)
    pub fn responses(&self) -> Vec<Value> {
        self.frames()
            .into_iter()
            .filter(|frame| frame.get("method").is_none())
            .collect()
    }

    /// Nur ausgehende Calls/Notifications
    pub fn calls(&self) -> Vec<Value> {
        self.frames()
            .into_iter()
            .filter(|frame| frame.get("method").is_some())
            .collect()
    }

    pub fn raw(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }
}

impl ByteSink for MockSink {
    fn write(&mut self, bytes: &[u8]) -> usize {
        self.0.borrow_mut().extend_from_slice(bytes);
        bytes.len()
    }
}

#[derive(Clone, Default)]
pub struct MockSource(Rc<RefCell<VecDeque<u8>>>);

impl MockSource {
    pub fn push_line(&self, line: &str) {
        let mut queue = self.0.borrow_mut();
        queue.extend(line.bytes());
        queue.push_back(b'\n');
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl ByteSource for MockSource {
    fn try_read_byte(&mut self, _timeout_ms: u32) -> Option<u8> {
        self.0.borrow_mut().pop_front()
    }
}

// ============================================================================
// Test-Fixture
// ============================================================================

pub type TestDevice = Device<MockClock, MockSource, MockSink, MockPin, MockPin>;

pub struct Fixture {
    pub device: TestDevice,
    pub clock: MockClock,
    pub source: MockSource,
    pub sink: MockSink,
    pub led: MockPin,
    pub aux: MockPin,
}

impl Fixture {
    pub fn new(config: DeviceConfig) -> Self {
        Self::with_clock(config, MockClock::new(0, 1))
    }

    pub fn with_clock(config: DeviceConfig, clock: MockClock) -> Self {
        let source = MockSource::default();
        let sink = MockSink::default();
        let led = MockPin::default();
        let aux = MockPin::default();
        let device = Device::bootstrap(
            config,
            clock.clone(),
            source.clone(),
            sink.clone(),
            led.clone(),
            aux.clone(),
        )
        .expect("bootstrap succeeds");
        Self {
            device,
            clock,
            source,
            sink,
            led,
            aux,
        }
    }

    /// Schickt eine Zeile und tickt, bis alle Bytes verarbeitet sind
    /// (die Uhr bleibt dabei stehen)
    pub fn deliver(&mut self, line: &str) {
        self.source.push_line(line);
        while !self.source.is_empty() {
            self.device.tick();
        }
    }

    pub fn advance_and_tick(&mut self, ms: u32) {
        self.clock.advance_ms(ms);
        self.device.tick();
    }
}

pub fn identity(topic: Option<&'static str>) -> DeviceIdentity {
    DeviceIdentity {
        name: "esp32c6-demo",
        version: "1.0.0",
        publish_topic: topic,
    }
}

pub fn config(blink_ms: i64, report_ms: i64, topic: Option<&'static str>) -> DeviceConfig {
    DeviceConfig {
        blink_period: Period::from_millis(blink_ms),
        report_period: Period::from_millis(report_ms),
        ..DeviceConfig::new(identity(topic))
    }
}
