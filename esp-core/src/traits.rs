//! Hardware Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen zur Peripherie
//! ohne konkrete Implementierung.
//!
//! # Implementierungen
//! - **Production:** UART, GPIO, RMT und embassy-time Adapter in `esp-firmware`
//! - **Testing:** Mocks in `esp-tests`

use crate::types::Tick;

/// Fehler-Typ für Ausgangs-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    WriteFailed,
}

/// Monotone Zeitquelle
pub trait Clock {
    /// Aktueller Tick-Zählerstand (läuft bei `u32::MAX` über)
    fn now(&self) -> Tick;

    /// Anzahl Ticks pro Millisekunde
    fn ticks_per_ms(&self) -> u32;
}

/// Schaltbarer Ausgang (LED, GPIO)
pub trait OutputPin {
    /// Setzt den Ausgang auf an (`true`) oder aus (`false`)
    ///
    /// # Fehlerbehandlung
    /// Gibt `OutputError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn set(&mut self, on: bool) -> Result<(), OutputError>;

    /// Invertiert den aktuellen Zustand
    fn toggle(&mut self) -> Result<(), OutputError>;
}

/// Senke für ausgehende Bytes (z.B. UART TX)
pub trait ByteSink {
    /// Schreibt den kompletten Buffer, gibt die Anzahl geschriebener Bytes zurück.
    ///
    /// Teil-Writes wiederholt die Implementierung selbst.
    fn write(&mut self, bytes: &[u8]) -> usize;
}

/// Quelle für eingehende Bytes (z.B. UART RX)
pub trait ByteSource {
    /// Wartet höchstens `timeout_ms` auf ein Byte
    fn try_read_byte(&mut self, timeout_ms: u32) -> Option<u8>;
}
