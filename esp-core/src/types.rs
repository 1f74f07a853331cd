//! Core Types für die Device-Runtime
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::num::NonZeroU32;

use serde::Serialize;

/// Monotoner Tick-Zähler der Zeitquelle (läuft über)
pub type Tick = u32;

/// Standard Blink-Periode in Millisekunden
pub const DEFAULT_BLINK_PERIOD_MS: u32 = 100;

/// Standard Report-Periode in Millisekunden
pub const DEFAULT_REPORT_PERIOD_MS: u32 = 2500;

/// Maximale Wartezeit auf ein eingehendes Byte pro `tick()`
pub const DEFAULT_POLL_TIMEOUT_MS: u32 = 1;

/// Methodenname für Shadow-Reports
pub const SHADOW_REPORT: &str = "Shadow.Report";

/// Methodenname für MQTT-Publishes
pub const MQTT_PUBLISH: &str = "MQTT.Pub";

/// Periode eines zyklischen Tasks
///
/// Werte ≤ 0 ms bedeuten "Task deaktiviert" (kein "feuere jeden Tick").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Disabled,
    Millis(NonZeroU32),
}

impl Period {
    /// Erzeugt eine Periode aus einem (evtl. negativen) Millisekunden-Wert
    ///
    /// ```
    /// # use esp_core::Period;
    /// assert_eq!(Period::from_millis(-5), Period::Disabled);
    /// assert_eq!(Period::from_millis(0), Period::Disabled);
    /// assert_eq!(Period::from_millis(250).as_millis(), 250);
    /// ```
    pub fn from_millis(ms: i64) -> Self {
        let clamped = if ms > i64::from(u32::MAX) {
            u32::MAX
        } else if ms > 0 {
            ms as u32
        } else {
            0
        };
        match NonZeroU32::new(clamped) {
            Some(ms) => Self::Millis(ms),
            None => Self::Disabled,
        }
    }

    /// Periode in Millisekunden (0 wenn deaktiviert)
    pub const fn as_millis(self) -> u32 {
        match self {
            Self::Disabled => 0,
            Self::Millis(ms) => ms.get(),
        }
    }

    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Millis(_))
    }
}

/// Kanal-Auswahl des Report-Tasks
///
/// Wechselt nach jedem Feuern: Shadow → Publish → Shadow → ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportChannel {
    #[default]
    Shadow,
    Publish,
}

impl ReportChannel {
    /// Reine Übergangsfunktion: liefert den Kanal für das nächste Feuern
    pub const fn next(self) -> Self {
        match self {
            Self::Shadow => Self::Publish,
            Self::Publish => Self::Shadow,
        }
    }
}

/// Geräte-Identität, wird einmal beim Bootstrap gesetzt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub name: &'static str,
    pub version: &'static str,
    /// Ohne Topic entfällt der Publish-Zweig des Report-Tasks
    pub publish_topic: Option<&'static str>,
}

/// Bootstrap-Konfiguration für `Device`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceConfig {
    pub identity: DeviceIdentity,
    pub blink_period: Period,
    pub report_period: Period,
    pub poll_timeout_ms: u32,
}

impl DeviceConfig {
    /// Konfiguration mit Standard-Perioden (100 ms Blink, 2500 ms Report)
    pub fn new(identity: DeviceIdentity) -> Self {
        Self {
            identity,
            blink_period: Period::from_millis(i64::from(DEFAULT_BLINK_PERIOD_MS)),
            report_period: Period::from_millis(i64::from(DEFAULT_REPORT_PERIOD_MS)),
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
        }
    }
}

/// Status-Payload für beide Report-Kanäle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppStatus {
    pub name: &'static str,
    pub version: &'static str,
    pub uptime_ms: u32,
    pub blink_period_ms: u32,
}

impl AppStatus {
    pub fn new(identity: &DeviceIdentity, uptime_ms: u32, blink_period: Period) -> Self {
        Self {
            name: identity.name,
            version: identity.version,
            uptime_ms,
            blink_period_ms: blink_period.as_millis(),
        }
    }
}

/// Ausgehender Report
///
/// Serialisiert direkt als `params` des jeweiligen Calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// `{"app": {...}}`
    Shadow { app: AppStatus },
    /// `{"topic": ..., "qos": 0, "message": {...}}`
    Publish {
        topic: &'static str,
        qos: u8,
        message: AppStatus,
    },
}

impl Report {
    pub fn method(&self) -> &'static str {
        match self {
            Report::Shadow { .. } => SHADOW_REPORT,
            Report::Publish { .. } => MQTT_PUBLISH,
        }
    }

    pub fn channel(&self) -> ReportChannel {
        match self {
            Report::Shadow { .. } => ReportChannel::Shadow,
            Report::Publish { .. } => ReportChannel::Publish,
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Period {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Period::Disabled => defmt::write!(fmt, "disabled"),
            Period::Millis(ms) => defmt::write!(fmt, "{}ms", ms.get()),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ReportChannel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ReportChannel::Shadow => defmt::write!(fmt, "Shadow"),
            ReportChannel::Publish => defmt::write!(fmt, "Publish"),
        }
    }
}
