//! Device - Scheduler der kooperativen Run-Loop
//!
//! Pro `tick()`:
//! 1. höchstens ein Byte lesen (kurzer, begrenzter Timeout) und an den Dispatcher geben
//! 2. Blink-Task auswerten
//! 3. Report-Task auswerten
//!
//! Eingehende Kommandos werden also immer vor den zyklischen Tasks verarbeitet,
//! eine neue Periode wirkt im selben Tick.

use crate::handlers::{self, LED_SET, LED_TOGGLE, SHADOW_DELTA};
use crate::indicator::IndicatorTask;
use crate::logging::{debug, info, warn};
use crate::logic::Uptime;
use crate::report::{ReportAction, ReportTask};
use crate::rpc::{Dispatcher, RegistryError};
use crate::traits::{ByteSink, ByteSource, Clock, OutputPin};
use crate::types::{DeviceConfig, DeviceIdentity};

/// Zustand, auf dem die RPC-Handler arbeiten
pub struct DeviceState<L, A> {
    pub indicator: IndicatorTask<L>,
    pub reporter: ReportTask,
    /// Zusatz-Ausgang, nur per RPC geschaltet
    pub aux: A,
}

/// Device-Runtime
///
/// # Generische Parameter
/// - `K`: Zeitquelle
/// - `R`/`S`: eingehender bzw. ausgehender Byte-Stream (UART)
/// - `L`: Status-LED (Blink-Task)
/// - `A`: Zusatz-Ausgang (`LED.Set` / `LED.Toggle`)
pub struct Device<K, R, S, L, A> {
    clock: K,
    source: R,
    rpc: Dispatcher<S, DeviceState<L, A>>,
    state: DeviceState<L, A>,
    identity: DeviceIdentity,
    uptime: Uptime,
    poll_timeout_ms: u32,
}

impl<K, R, S, L, A> Device<K, R, S, L, A>
where
    K: Clock,
    R: ByteSource,
    S: ByteSink,
    L: OutputPin,
    A: OutputPin,
{
    /// Einmaliges Setup: Handler registrieren, Ausgänge aus, beide Tasks sofort fällig
    ///
    /// # Fehlerbehandlung
    /// Ein Registry-Konflikt bricht die Initialisierung ab.
    pub fn bootstrap(
        config: DeviceConfig,
        clock: K,
        source: R,
        sink: S,
        mut indicator: L,
        mut aux: A,
    ) -> Result<Self, RegistryError> {
        let mut rpc = Dispatcher::new(sink, config.identity.version);
        rpc.register(SHADOW_DELTA, handlers::shadow_delta::<L, A>)?;
        rpc.register(LED_SET, handlers::led_set::<L, A>)?;
        rpc.register(LED_TOGGLE, handlers::led_toggle::<L, A>)?;

        if indicator.set(false).is_err() {
            warn!("Device: Failed to reset status LED");
        }
        if aux.set(false).is_err() {
            warn!("Device: Failed to reset aux output");
        }

        let uptime = Uptime::start(clock.now());
        info!(
            "Device: {} v{} ready (blink {}, report {})",
            config.identity.name,
            config.identity.version,
            config.blink_period,
            config.report_period
        );

        Ok(Self {
            clock,
            source,
            rpc,
            state: DeviceState {
                indicator: IndicatorTask::new(indicator, config.blink_period),
                reporter: ReportTask::new(config.report_period),
                aux,
            },
            identity: config.identity,
            uptime,
            poll_timeout_ms: config.poll_timeout_ms,
        })
    }

    /// Ein Durchlauf der Run-Loop
    ///
    /// Blockiert höchstens `poll_timeout_ms` beim Lesen. Fehler einzelner
    /// Requests erreichen den Scheduler nie.
    pub fn tick(&mut self) {
        if let Some(byte) = self.source.try_read_byte(self.poll_timeout_ms) {
            self.rpc.feed_byte(byte, &mut self.state);
        }

        let now = self.clock.now();
        let ticks_per_ms = self.clock.ticks_per_ms();

        self.state.indicator.evaluate(now, ticks_per_ms);

        self.uptime.advance(now);
        let uptime_ms = self.uptime.millis_at(now, ticks_per_ms);
        let blink_period = self.state.indicator.period();
        match self
            .state
            .reporter
            .evaluate(now, ticks_per_ms, &self.identity, uptime_ms, blink_period)
        {
            ReportAction::Send(report) => self.rpc.notify(report.method(), &report),
            ReportAction::Skipped => debug!("Device: No publish topic, report skipped"),
            ReportAction::Idle => {}
        }
    }

    pub fn state(&self) -> &DeviceState<L, A> {
        &self.state
    }

    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    pub fn dispatcher(&self) -> &Dispatcher<S, DeviceState<L, A>> {
        &self.rpc
    }

    /// Millisekunden seit `bootstrap()`
    pub fn uptime_ms(&self) -> u32 {
        self.uptime.millis_at(self.clock.now(), self.clock.ticks_per_ms())
    }
}
