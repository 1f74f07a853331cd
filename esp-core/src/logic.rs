//! Pure Zeit-Logik
//!
//! Alle Deadline-Vergleiche laufen über Subtraktion, damit sie auch
//! über den Überlauf des Tick-Zählers hinweg stimmen.

use crate::types::Tick;

/// Größter Abstand zwischen `now` und einer Deadline, der noch eindeutig
/// vergleichbar ist (halber Zählerbereich)
pub const MAX_DEADLINE_SPAN: Tick = i32::MAX as Tick;

/// `a` liegt vor `b`, auch über den Zähler-Überlauf hinweg
///
/// # Beispiele
///
/// ```
/// # use esp_core::tick_is_before;
/// assert!(tick_is_before(100, 200));
/// assert!(tick_is_before(u32::MAX - 50, 50)); // über den Überlauf
/// assert!(!tick_is_before(100, 100));
/// ```
pub fn tick_is_before(a: Tick, b: Tick) -> bool {
    (a.wrapping_sub(b) as i32) < 0
}

/// Periode in Ticks, begrenzt auf `MAX_DEADLINE_SPAN`
pub fn period_ticks(period_ms: u32, ticks_per_ms: u32) -> Tick {
    let ticks = u64::from(period_ms) * u64::from(ticks_per_ms.max(1));
    ticks.min(u64::from(MAX_DEADLINE_SPAN)) as Tick
}

/// Laufzeit seit dem Start, unabhängig vom Überlauf des Tick-Zählers
///
/// Summiert die Tick-Differenzen in 64 Bit auf. `advance()` muss mindestens
/// einmal pro Überlauf-Intervall aufgerufen werden (bei 1 MHz: ~71 Minuten).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uptime {
    last: Tick,
    ticks: u64,
}

impl Uptime {
    pub fn start(now: Tick) -> Self {
        Self { last: now, ticks: 0 }
    }

    /// Übernimmt die seit dem letzten Aufruf vergangenen Ticks
    pub fn advance(&mut self, now: Tick) {
        self.ticks += u64::from(now.wrapping_sub(self.last));
        self.last = now;
    }

    /// Laufzeit bis `now` in Millisekunden, ohne den Zähler zu verändern
    ///
    /// Wird wie ein 32-Bit Millisekunden-Tick nach ~49 Tagen wieder 0.
    pub fn millis_at(&self, now: Tick, ticks_per_ms: u32) -> u32 {
        let ticks = self.ticks + u64::from(now.wrapping_sub(self.last));
        (ticks / u64::from(ticks_per_ms.max(1))) as u32
    }
}

/// Nächster Zeitpunkt, an dem ein zyklischer Task feuern darf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Beim nächsten Auswerten fällig
    Due,
    At(Tick),
}

impl Deadline {
    /// Deadline ab dem aktuellen Feuerzeitpunkt (nicht ab der alten Deadline)
    pub fn after(now: Tick, period_ms: u32, ticks_per_ms: u32) -> Self {
        Self::At(now.wrapping_add(period_ticks(period_ms, ticks_per_ms)))
    }

    /// `now` hat die Deadline erreicht oder überschritten
    pub fn is_reached(self, now: Tick) -> bool {
        match self {
            Self::Due => true,
            Self::At(deadline) => !tick_is_before(now, deadline),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Deadline {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Deadline::Due => defmt::write!(fmt, "due"),
            Deadline::At(tick) => defmt::write!(fmt, "at {}", tick),
        }
    }
}
