// Zeitquelle auf Basis von embassy-time

use embassy_time::{Instant, TICK_HZ};
use esp_core::{Clock, Tick};

/// Tick-Zähler aus `embassy_time::Instant`, auf 32 Bit gekürzt
///
/// Läuft je nach `TICK_HZ` nach wenigen Minuten bis Stunden über;
/// der Scheduler vergleicht Deadlines überlaufsicher.
#[derive(Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Tick {
        Instant::now().as_ticks() as Tick
    }

    fn ticks_per_ms(&self) -> u32 {
        (TICK_HZ / 1000).max(1) as u32
    }
}
