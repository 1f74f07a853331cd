//! Remote-Kommandos der Anwendung
//!
//! - `Shadow.Delta` (Notification): neue Blink-/Report-Periode
//! - `LED.Set` (Call): Zusatz-LED an/aus
//! - `LED.Toggle` (Call): Zusatz-LED umschalten

use crate::device::DeviceState;
use crate::logging::{info, warn};
use crate::rpc::{Reply, Request, RpcError};
use crate::traits::OutputPin;
use crate::types::Period;

pub const SHADOW_DELTA: &str = "Shadow.Delta";
pub const LED_SET: &str = "LED.Set";
pub const LED_TOGGLE: &str = "LED.Toggle";

/// Übernimmt geänderte Perioden aus dem Shadow
///
/// Negative oder fehlende Werte lassen die Periode unverändert, 0 deaktiviert.
/// Die neue Periode greift noch im selben `tick()`.
pub fn shadow_delta<L: OutputPin, A: OutputPin>(
    request: &Request<'_>,
    state: &mut DeviceState<L, A>,
) -> Reply {
    let params = request.params();

    let blink_ms = params.get_int("$.app.blink_period_ms", -1);
    if blink_ms >= 0 {
        state.indicator.set_period(Period::from_millis(blink_ms));
        info!("Shadow: Blink period set to {}", state.indicator.period());
    }

    let report_ms = params.get_int("$.app.report_period_ms", -1);
    if report_ms >= 0 {
        state.reporter.set_period(Period::from_millis(report_ms));
        info!("Shadow: Report period set to {}", state.reporter.period());
    }

    Reply::Silent
}

/// Setzt die Zusatz-LED auf `$.on` (Default: aus)
pub fn led_set<L: OutputPin, A: OutputPin>(request: &Request<'_>, state: &mut DeviceState<L, A>) -> Reply {
    let on = request.params().get_bool("$.on", false);
    match state.aux.set(on) {
        Ok(()) => Reply::ok(),
        Err(_) => {
            warn!("LED.Set: Failed to write output");
            Reply::Error(RpcError::INTERNAL_ERROR)
        }
    }
}

/// Schaltet die Zusatz-LED um
pub fn led_toggle<L: OutputPin, A: OutputPin>(_request: &Request<'_>, state: &mut DeviceState<L, A>) -> Reply {
    match state.aux.toggle() {
        Ok(()) => Reply::ok(),
        Err(_) => {
            warn!("LED.Toggle: Failed to write output");
            Reply::Error(RpcError::INTERNAL_ERROR)
        }
    }
}
