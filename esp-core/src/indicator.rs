//! Blink-Task - toggelt die Status-LED mit konfigurierbarer Periode

use crate::logging::{debug, warn};
use crate::logic::Deadline;
use crate::traits::OutputPin;
use crate::types::{Period, Tick};

/// Blink-Task
///
/// Besitzt den Indikator-Ausgang exklusiv. Von außen (Remote-Konfiguration)
/// lässt sich nur die Periode ändern, nie der Ausgangszustand.
pub struct IndicatorTask<L> {
    led: L,
    period: Period,
    deadline: Deadline,
}

impl<L: OutputPin> IndicatorTask<L> {
    /// Neuer Task, erste Auswertung ist sofort fällig
    pub fn new(led: L, period: Period) -> Self {
        Self {
            led,
            period,
            deadline: Deadline::Due,
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn output(&self) -> &L {
        &self.led
    }

    /// Setzt eine neue Periode und erzwingt die Neuberechnung der Deadline
    /// beim nächsten `evaluate()`
    pub fn set_period(&mut self, period: Period) {
        self.period = period;
        self.deadline = Deadline::Due;
    }

    /// Wertet den Task zum Zeitpunkt `now` aus
    ///
    /// - Deaktiviert: LED aus, keine neue Deadline
    /// - Fällig: genau ein Toggle, Deadline = `now` + Periode
    ///   (verpasste Perioden werden zusammengefasst)
    ///
    /// Gibt `true` zurück wenn getoggelt wurde.
    pub fn evaluate(&mut self, now: Tick, ticks_per_ms: u32) -> bool {
        let Period::Millis(period_ms) = self.period else {
            if self.led.set(false).is_err() {
                warn!("Blink: Failed to switch LED off");
            }
            return false;
        };

        if !self.deadline.is_reached(now) {
            return false;
        }

        if self.led.toggle().is_err() {
            warn!("Blink: Failed to toggle LED");
        }
        self.deadline = Deadline::after(now, period_ms.get(), ticks_per_ms);
        debug!("Blink: Toggled at {}, next {}", now, self.deadline);
        true
    }
}
